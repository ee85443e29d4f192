//! Shared test harness: in-memory app construction and body helpers
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use flickdeck::app::{build_router, AppState};
use flickdeck::config::Config;
use flickdeck::db::Database;
use flickdeck::services::TmdbClient;
use serde_json::Value;

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        tmdb_api_token: None,
        client_origin: "http://localhost:3000".to_string(),
        session_lifetime_secs: 3600,
        image_cache_max_bytes: 1024 * 1024,
        // Minimum cost keeps the password hashing in tests fast.
        bcrypt_cost: 4,
    }
}

pub async fn build_app(tmdb: TmdbClient) -> Router {
    let (app, _) = build_app_with_state(tmdb).await;
    app
}

/// Like `build_app`, but also hands back the state for tests that need
/// to reach behind the router (e.g. seeding the image cache).
pub async fn build_app_with_state(tmdb: TmdbClient) -> (Router, AppState) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let state = AppState::new(Arc::new(test_config()), db, tmdb);
    (build_router(state.clone()), state)
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
