pub mod movies;
pub mod people;
pub mod trending;
pub mod tv;

pub use movies::MovieQueries;
pub use people::PeopleQueries;
pub use trending::TrendingQueries;
pub use tv::TvQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::graphql::helpers::UpstreamResultExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::tmdb::params;
    pub(crate) use crate::services::TmdbClient;
}
