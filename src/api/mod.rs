//! REST route definitions
//!
//! The catalog is GraphQL at /graphql; the account/watchlist service and
//! the image proxy are plain REST because they are cookie-scoped CRUD and
//! binary delivery respectively.

pub mod auth;
pub mod error;
pub mod health;
pub mod image;
pub mod lists;
pub mod movies;
pub mod session;

pub use error::ApiError;
pub use session::{CurrentUser, SESSION_COOKIE};
