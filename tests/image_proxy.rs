//! Image proxy tests at the HTTP surface
//!
//! The rejection paths need no upstream; the success path is driven by
//! seeding the cache so no network fetch happens.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use tower::util::ServiceExt;

use flickdeck::services::TmdbClient;

async fn app() -> (Router, flickdeck::app::AppState) {
    common::build_app_with_state(TmdbClient::from_token(None)).await
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn unknown_format_is_rejected() {
    let (app, _) = app().await;

    let response = get(&app, "/image?url=http://img.example/a.png&format=gif").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unsupported format");
}

#[tokio::test]
async fn non_http_source_url_is_rejected() {
    let (app, _) = app().await;

    let response = get(&app, "/image?url=ftp://img.example/a.png&format=png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "url must be http or https");

    let response = get(&app, "/image?url=not%20a%20url&format=png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cached_image_is_served_with_cache_headers() {
    let (app, state) = app().await;

    let payload = vec![0x89, 0x50, 0x4E, 0x47];
    state
        .image_cache
        .insert("http://img.example/a.png", "png", payload.clone());

    let response = get(&app, "/image?url=http://img.example/a.png&format=png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), payload.as_slice());
}

#[tokio::test]
async fn format_aliases_hit_the_same_cache_entry() {
    let (app, state) = app().await;

    state
        .image_cache
        .insert("http://img.example/b.png", "jpeg", vec![0xFF, 0xD8]);

    // "jpg" canonicalizes to the same key as "jpeg".
    let response = get(&app, "/image?url=http://img.example/b.png&format=jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn missing_query_parameters_are_rejected() {
    let (app, _) = app().await;

    let response = get(&app, "/image?format=png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, "/image?url=http://img.example/a.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
