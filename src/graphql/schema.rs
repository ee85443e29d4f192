//! GraphQL schema definition
//!
//! The catalog API is read-only: one resolver per query field, each a
//! single upstream fetch. All writes (accounts, watchlists) go through
//! the REST surface instead.

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use crate::services::TmdbClient;

use super::queries::{MovieQueries, PeopleQueries, TrendingQueries, TvQueries};

#[derive(MergedObject, Default)]
pub struct QueryRoot(MovieQueries, TvQueries, PeopleQueries, TrendingQueries);

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the GraphQL schema with the upstream client injected
pub fn build_schema(tmdb: TmdbClient) -> CatalogSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(tmdb)
        .finish()
}
