//! GraphQL catalog API
//!
//! One query field per upstream TMDB endpoint; resolvers are stateless
//! pass-throughs with per-field argument defaults. No caching happens at
//! this layer.

mod helpers;
pub mod queries;
mod schema;
pub mod types;

pub use schema::{build_schema, CatalogSchema};
