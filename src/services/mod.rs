//! Service layer: upstream client, auth, and shared caches

pub mod auth;
pub mod image_cache;
pub mod rate_limiter;
pub mod tmdb;

pub use auth::{AuthConfig, AuthError, AuthService, RegisterInput};
pub use image_cache::ImageCache;
pub use tmdb::{HttpTransport, TmdbClient, TmdbError, TmdbTransport};
