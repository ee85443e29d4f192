//! Helpers shared across GraphQL query modules

use async_graphql::ErrorExtensions;

use crate::services::TmdbError;

/// Uniform conversion from an upstream failure to a GraphQL field error
///
/// Every resolver goes through this one seam, so the whole surface has a
/// single failure shape: an opaque message plus an `UPSTREAM_ERROR` code.
///
/// Success is wrapped in `Some` to keep each top-level field nullable:
/// an upstream failure then nulls only its own field, and sibling fields
/// in the same query still resolve.
pub(crate) trait UpstreamResultExt<T> {
    fn upstream(self) -> async_graphql::Result<Option<T>>;
}

impl<T> UpstreamResultExt<T> for Result<T, TmdbError> {
    fn upstream(self) -> async_graphql::Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(error = %e, "Upstream fetch failed");
                Err(async_graphql::Error::new(e.to_string())
                    .extend_with(|_, ext| ext.set("code", "UPSTREAM_ERROR")))
            }
        }
    }
}
