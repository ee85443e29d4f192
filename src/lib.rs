//! Flickdeck backend
//!
//! A movie/TV browsing service: a GraphQL catalog API proxying TMDB, a
//! cookie-session account and watchlist REST service on SQLite, and an
//! image transcoding proxy.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;
