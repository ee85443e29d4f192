use super::prelude::*;

#[derive(Default)]
pub struct TvQueries;

#[Object]
impl TvQueries {
    /// Shows currently popular, by upstream popularity score
    async fn popular_shows(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("tv/popular", &[params::page(page)])
            .await
            .upstream()
    }

    /// Highest-rated shows of all time
    async fn top_rated_shows(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("tv/top_rated", &[params::page(page)])
            .await
            .upstream()
    }

    /// Shows with an episode airing today
    async fn airing_today(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("tv/airing_today", &[params::page(page)])
            .await
            .upstream()
    }

    /// Shows with an episode airing in the next week
    async fn on_the_air(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("tv/on_the_air", &[params::page(page)])
            .await
            .upstream()
    }

    /// Full details for one show, including its season list
    async fn show_details(
        &self,
        ctx: &Context<'_>,
        id: i64,
        language: Option<String>,
    ) -> Result<Option<ShowDetail>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("tv/{id}"), &[params::language(language)])
            .await
            .upstream()
    }

    /// One season of a show with its episode list
    async fn season_details(
        &self,
        ctx: &Context<'_>,
        show_id: i64,
        season_number: i32,
    ) -> Result<Option<Season>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("tv/{show_id}/season/{season_number}"), &[])
            .await
            .upstream()
    }

    /// One episode with crew and guest stars
    async fn episode_details(
        &self,
        ctx: &Context<'_>,
        show_id: i64,
        season_number: i32,
        episode_number: i32,
    ) -> Result<Option<Episode>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(
            &format!("tv/{show_id}/season/{season_number}/episode/{episode_number}"),
            &[],
        )
        .await
        .upstream()
    }

    /// Cast and crew for one show
    async fn show_credits(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Credits>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("tv/{id}/credits"), &[]).await.upstream()
    }

    /// User reviews for one show
    async fn show_reviews(
        &self,
        ctx: &Context<'_>,
        id: i64,
        page: Option<i32>,
    ) -> Result<Option<Vec<Review>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results(&format!("tv/{id}/reviews"), &[params::page(page)])
            .await
            .upstream()
    }

    /// Posters and backdrops for one show
    async fn show_images(&self, ctx: &Context<'_>, id: i64) -> Result<Option<ImageSet>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("tv/{id}/images"), &[]).await.upstream()
    }

    /// Trailers and other videos for one show
    async fn show_videos(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Vec<Video>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_field(&format!("tv/{id}/videos"), "results", &[])
            .await
            .upstream()
    }

    /// Shows similar to the given one
    async fn similar_shows(
        &self,
        ctx: &Context<'_>,
        id: i64,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results(&format!("tv/{id}/similar"), &[params::page(page)])
            .await
            .upstream()
    }

    /// Recommendations based on the given show
    async fn recommended_shows(
        &self,
        ctx: &Context<'_>,
        id: i64,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results(&format!("tv/{id}/recommendations"), &[params::page(page)])
            .await
            .upstream()
    }

    /// Search shows by name
    async fn search_shows(
        &self,
        ctx: &Context<'_>,
        query: String,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("search/tv", &[params::query(&query), params::page(page)])
            .await
            .upstream()
    }

    /// The TV genre catalog
    async fn tv_genres(&self, ctx: &Context<'_>, language: Option<String>) -> Result<Option<Vec<Genre>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_field("genre/tv/list", "genres", &[params::language(language)])
            .await
            .upstream()
    }
}
