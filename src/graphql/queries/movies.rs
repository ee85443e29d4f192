use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// Movies currently popular, by upstream popularity score
    async fn popular_movies(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("movie/popular", &[params::page(page)])
            .await
            .upstream()
    }

    /// Highest-rated movies of all time
    async fn top_rated_movies(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("movie/top_rated", &[params::page(page)])
            .await
            .upstream()
    }

    /// Movies with upcoming theatrical releases
    async fn upcoming_movies(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("movie/upcoming", &[params::page(page)])
            .await
            .upstream()
    }

    /// Movies currently in theaters
    async fn now_playing_movies(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("movie/now_playing", &[params::page(page)])
            .await
            .upstream()
    }

    /// Full details for one movie
    async fn movie_details(
        &self,
        ctx: &Context<'_>,
        id: i64,
        language: Option<String>,
    ) -> Result<Option<MovieDetail>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("movie/{id}"), &[params::language(language)])
            .await
            .upstream()
    }

    /// Cast and crew for one movie
    async fn movie_credits(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Credits>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("movie/{id}/credits"), &[])
            .await
            .upstream()
    }

    /// User reviews for one movie
    async fn movie_reviews(
        &self,
        ctx: &Context<'_>,
        id: i64,
        page: Option<i32>,
    ) -> Result<Option<Vec<Review>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results(&format!("movie/{id}/reviews"), &[params::page(page)])
            .await
            .upstream()
    }

    /// Posters and backdrops for one movie
    async fn movie_images(&self, ctx: &Context<'_>, id: i64) -> Result<Option<ImageSet>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("movie/{id}/images"), &[])
            .await
            .upstream()
    }

    /// Trailers and other videos for one movie
    async fn movie_videos(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Vec<Video>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_field(&format!("movie/{id}/videos"), "results", &[])
            .await
            .upstream()
    }

    /// Movies similar to the given one
    async fn similar_movies(
        &self,
        ctx: &Context<'_>,
        id: i64,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results(&format!("movie/{id}/similar"), &[params::page(page)])
            .await
            .upstream()
    }

    /// Recommendations based on the given movie
    async fn recommended_movies(
        &self,
        ctx: &Context<'_>,
        id: i64,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results(
            &format!("movie/{id}/recommendations"),
            &[params::page(page)],
        )
        .await
        .upstream()
    }

    /// Search movies by title
    async fn search_movies(
        &self,
        ctx: &Context<'_>,
        query: String,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("search/movie", &[params::query(&query), params::page(page)])
            .await
            .upstream()
    }

    /// The movie genre catalog
    async fn movie_genres(
        &self,
        ctx: &Context<'_>,
        language: Option<String>,
    ) -> Result<Option<Vec<Genre>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_field("genre/movie/list", "genres", &[params::language(language)])
            .await
            .upstream()
    }
}
