use super::prelude::*;

#[derive(Default)]
pub struct PeopleQueries;

#[Object]
impl PeopleQueries {
    /// People currently popular, with their known-for listings
    async fn popular_people(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<Option<Vec<Person>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("person/popular", &[params::page(page)])
            .await
            .upstream()
    }

    /// Full biography record for one person
    async fn person_details(
        &self,
        ctx: &Context<'_>,
        id: i64,
        language: Option<String>,
    ) -> Result<Option<Person>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("person/{id}"), &[params::language(language)])
            .await
            .upstream()
    }

    /// Movie filmography for one person
    async fn person_movie_credits(&self, ctx: &Context<'_>, id: i64) -> Result<Option<PersonCredits>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("person/{id}/movie_credits"), &[])
            .await
            .upstream()
    }

    /// TV filmography for one person
    async fn person_tv_credits(&self, ctx: &Context<'_>, id: i64) -> Result<Option<PersonCredits>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch(&format!("person/{id}/tv_credits"), &[])
            .await
            .upstream()
    }

    /// Profile images for one person
    async fn person_images(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Vec<ImageInfo>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_field(&format!("person/{id}/images"), "profiles", &[])
            .await
            .upstream()
    }

    /// Search people by name
    async fn search_people(
        &self,
        ctx: &Context<'_>,
        query: String,
        page: Option<i32>,
    ) -> Result<Option<Vec<Person>>> {
        let tmdb = ctx.data_unchecked::<TmdbClient>();
        tmdb.fetch_results("search/person", &[params::query(&query), params::page(page)])
            .await
            .upstream()
    }
}
