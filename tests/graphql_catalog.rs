//! Catalog surface tests against a fake upstream transport
//!
//! The fake records every outgoing path and query so the tests can
//! assert both the projected response and the exact upstream request.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use flickdeck::services::{TmdbClient, TmdbError, TmdbTransport};

#[derive(Default)]
struct FakeTmdb {
    responses: HashMap<String, Value>,
    failing_paths: Vec<String>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeTmdb {
    fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }

    fn fail(mut self, path: &str) -> Self {
        self.failing_paths.push(path.to_string());
        self
    }

    fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    fn call_for(&self, path: &str) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q)
            .unwrap_or_else(|| panic!("no upstream call recorded for {path}"))
    }
}

#[async_trait]
impl TmdbTransport for FakeTmdb {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, TmdbError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), query.to_vec()));
        if self.failing_paths.iter().any(|p| p == path) {
            return Err(TmdbError::Status(500));
        }
        Ok(self
            .responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| json!({ "results": [] })))
    }
}

async fn app_with(fake: Arc<FakeTmdb>) -> Router {
    common::build_app(TmdbClient::new(fake)).await
}

async fn post_query(app: &Router, query: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::post("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "query": query }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    common::body_json(response).await
}

fn query_param<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn listing_is_a_projection_of_the_upstream_results() {
    let fake = Arc::new(FakeTmdb::default().respond(
        "movie/popular",
        json!({
            "page": 2,
            "results": [
                { "id": 5, "title": "X", "vote_average": 8.3, "vote_count": 1234 },
                { "id": 7, "title": "Y", "overview": "second", "vote_average": "6", "vote_count": 2 }
            ],
            "total_pages": 40
        }),
    ));
    let app = app_with(fake.clone()).await;

    let body = post_query(
        &app,
        "{ popularMovies(page: 2) { id title overview voteAverage voteCount } }",
    )
    .await;

    assert_eq!(
        body["data"]["popularMovies"],
        json!([
            { "id": 5, "title": "X", "overview": null, "voteAverage": "8.3", "voteCount": "1234" },
            { "id": 7, "title": "Y", "overview": "second", "voteAverage": "6", "voteCount": "2" }
        ])
    );

    let query = fake.call_for("movie/popular");
    assert_eq!(query_param(&query, "page"), Some("2"));
}

#[tokio::test]
async fn display_title_resolves_whichever_name_is_set() {
    let fake = Arc::new(FakeTmdb::default().respond(
        "search/multi",
        json!({
            "results": [
                { "id": 1, "title": "Heat", "media_type": "movie" },
                { "id": 2, "name": "The Wire", "media_type": "tv" },
                { "id": 3 }
            ]
        }),
    ));
    let app = app_with(fake).await;

    let body = post_query(&app, r#"{ searchMulti(query: "the") { id displayTitle } }"#).await;

    assert_eq!(
        body["data"]["searchMulti"],
        json!([
            { "id": 1, "displayTitle": "Heat" },
            { "id": 2, "displayTitle": "The Wire" },
            { "id": 3, "displayTitle": null }
        ])
    );
}

#[tokio::test]
async fn omitted_arguments_fall_back_to_defaults() {
    let fake = Arc::new(FakeTmdb::default().respond("movie/603", json!({ "id": 603 })));
    let app = app_with(fake.clone()).await;

    post_query(
        &app,
        "{ popularMovies { id } movieDetails(id: 603) { id } trending(kind: MOVIE) { id } }",
    )
    .await;

    let listing = fake.call_for("movie/popular");
    assert_eq!(query_param(&listing, "page"), Some("1"));

    let details = fake.call_for("movie/603");
    assert_eq!(query_param(&details, "language"), Some("en-US"));

    // Window defaults to the past week, and it travels in the path.
    let trending = fake.call_for("trending/movie/week");
    assert_eq!(query_param(&trending, "page"), Some("1"));
}

#[tokio::test]
async fn search_sends_the_query_verbatim() {
    let fake = Arc::new(FakeTmdb::default());
    let app = app_with(fake.clone()).await;

    post_query(&app, r#"{ searchMovies(query: "blade runner", page: 3) { id } }"#).await;

    let query = fake.call_for("search/movie");
    assert_eq!(query_param(&query, "query"), Some("blade runner"));
    assert_eq!(query_param(&query, "page"), Some("3"));
}

#[tokio::test]
async fn nested_identifiers_compose_the_upstream_path() {
    let fake = Arc::new(
        FakeTmdb::default().respond(
            "tv/100/season/2/episode/7",
            json!({ "id": 9, "name": "Chapter Seven", "episode_number": 7 }),
        ),
    );
    let app = app_with(fake.clone()).await;

    let body = post_query(
        &app,
        "{ episodeDetails(showId: 100, seasonNumber: 2, episodeNumber: 7) { name episodeNumber } }",
    )
    .await;

    assert_eq!(
        body["data"]["episodeDetails"],
        json!({ "name": "Chapter Seven", "episodeNumber": 7 })
    );
    assert_eq!(fake.calls()[0].0, "tv/100/season/2/episode/7");
}

#[tokio::test]
async fn one_failing_field_leaves_its_siblings_intact() {
    let fake = Arc::new(
        FakeTmdb::default()
            .respond("movie/popular", json!({ "results": [{ "id": 5 }] }))
            .fail("tv/popular"),
    );
    let app = app_with(fake).await;

    let body = post_query(&app, "{ popularMovies { id } popularShows { id } }").await;

    assert_eq!(body["data"]["popularMovies"], json!([{ "id": 5 }]));
    assert_eq!(body["data"]["popularShows"], Value::Null);

    let errors = body["errors"].as_array().expect("errors present");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!(["popularShows"]));
    assert_eq!(errors[0]["extensions"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn graphql_get_without_a_browser_accept_header_is_rejected() {
    let app = app_with(Arc::new(FakeTmdb::default())).await;

    let response = app
        .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
