use super::prelude::*;

#[derive(Default)]
pub struct TrendingQueries;

#[Object]
impl TrendingQueries {
    /// Trending media for a time window (defaults to the past week)
    async fn trending(
        &self,
        ctx: &Context<'_>,
        kind: MediaKind,
        window: Option<TimeWindow>,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        let window = window.unwrap_or(TimeWindow::Week);
        tmdb.fetch_results(
            &format!("trending/{}/{}", kind.as_path(), window.as_path()),
            &[params::page(page)],
        )
        .await
        .upstream()
    }

    /// Search movies, shows, and people in one query
    ///
    /// Each row carries a `media_type` discriminator.
    async fn search_multi(
        &self,
        ctx: &Context<'_>,
        query: String,
        page: Option<i32>,
    ) -> Result<Option<Vec<MediaSummary>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("search/multi", &[params::query(&query), params::page(page)])
            .await
            .upstream()
    }
}
