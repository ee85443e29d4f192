//! Flickdeck backend entry point
//!
//! The catalog API is GraphQL at /graphql; accounts and watchlists live
//! under /api; image transcoding at /image.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flickdeck::app::{build_router, AppState};
use flickdeck::config::Config;
use flickdeck::db::Database;
use flickdeck::services::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flickdeck=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Flickdeck backend");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    if config.tmdb_api_token.is_none() {
        tracing::warn!("TMDB_API_TOKEN is not set - catalog queries will fail upstream");
    }
    let tmdb = TmdbClient::from_token(config.tmdb_api_token.clone());

    let state = AppState::new(config.clone(), db, tmdb);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
