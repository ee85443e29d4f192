//! Application state and router assembly
//!
//! Kept separate from `main` so integration tests can build the router
//! against a fake upstream transport and an in-memory database.

use std::sync::Arc;
use std::time::Duration;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::graphql::{self, CatalogSchema};
use crate::services::{AuthConfig, AuthService, ImageCache, TmdbClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub schema: CatalogSchema,
    pub auth: AuthService,
    /// Plain client for the image proxy's source fetches
    pub http: reqwest::Client,
    pub image_cache: Arc<ImageCache>,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: Database, tmdb: TmdbClient) -> Self {
        let auth = AuthService::new(
            db.clone(),
            AuthConfig {
                session_lifetime_secs: config.session_lifetime_secs,
                bcrypt_cost: config.bcrypt_cost,
            },
        );
        let image_cache = Arc::new(ImageCache::new(config.image_cache_max_bytes));
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            db,
            schema: graphql::build_schema(tmdb),
            auth,
            http,
            image_cache,
        }
    }
}

/// Assemble the full router: health, REST account service, GraphQL
/// catalog, and the image proxy
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .client_origin
                .parse::<HeaderValue>()
                .expect("CLIENT_ORIGIN is not a valid header value"),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .merge(api::health::router())
        .nest(
            "/api",
            api::auth::router()
                .merge(api::movies::router())
                .merge(api::lists::router()),
        )
        .route("/graphql", get(graphiql).post(graphql_handler))
        .merge(api::image::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GraphQL query handler
async fn graphql_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: axum::http::HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
            .into_response()
    } else {
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}
