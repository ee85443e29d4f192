//! TMDB (The Movie Database) API client
//!
//! All catalog data is sourced live from TMDB; nothing is cached or
//! persisted at this layer. Base URL: https://api.themoviedb.org/3
//!
//! The transport is a trait so integration tests can substitute a fake
//! and observe exactly which path and query parameters a resolver sends.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::rate_limiter::RateLimitedClient;

const TMDB_BASE: &str = "https://api.themoviedb.org/3";

/// Failure kinds for upstream fetches
///
/// Externally every variant surfaces as a single opaque GraphQL field
/// error; the distinction only matters for server-side logs.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("upstream request failed with status {0}")]
    Status(u16),
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to decode upstream response")]
    Decode(#[source] serde_json::Error),
}

/// One-method seam between the client and the wire
#[async_trait]
pub trait TmdbTransport: Send + Sync {
    /// Issue a GET against `{base}/{path}` with the given query string
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, TmdbError>;
}

/// Real transport: bearer-authenticated, rate-limited reqwest
pub struct HttpTransport {
    client: RateLimitedClient,
    base_url: String,
    token: String,
}

impl HttpTransport {
    pub fn new(token: String) -> Self {
        Self {
            client: RateLimitedClient::for_tmdb(),
            base_url: TMDB_BASE.to_string(),
            token,
        }
    }

    #[cfg(test)]
    fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: RateLimitedClient::for_tmdb(),
            base_url,
            token,
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl TmdbTransport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, TmdbError> {
        let url = self.url_for(path);

        let response = self
            .client
            .get(&url)
            .await
            .query(query)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(path = %path, status = %status, "TMDB request failed");
            return Err(TmdbError::Status(status.as_u16()));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

/// TMDB client: path + query in, typed JSON out
///
/// Defaults for optional arguments (`page`, `language`, trending window)
/// are applied by the resolvers; this layer only shapes requests and
/// projects responses.
#[derive(Clone)]
pub struct TmdbClient {
    transport: Arc<dyn TmdbTransport>,
}

impl TmdbClient {
    pub fn new(transport: Arc<dyn TmdbTransport>) -> Self {
        Self { transport }
    }

    /// Client backed by the real HTTP transport
    ///
    /// An absent token still builds a client; every call will then come
    /// back as an upstream 401.
    pub fn from_token(token: Option<String>) -> Self {
        Self::new(Arc::new(HttpTransport::new(token.unwrap_or_default())))
    }

    /// Fetch a path and decode the whole response body
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, TmdbError> {
        let value = self.transport.get(path, query).await?;
        serde_json::from_value(value).map_err(TmdbError::Decode)
    }

    /// Fetch a path and decode only the `results` array
    ///
    /// The inner array is returned unmodified in content and order.
    pub async fn fetch_results<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<T>, TmdbError> {
        let mut value = self.transport.get(path, query).await?;
        let results = value
            .get_mut("results")
            .map(Value::take)
            .unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(results).map_err(TmdbError::Decode)
    }

    /// Fetch a path and decode a named array field (e.g. `genres`)
    pub async fn fetch_field<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        query: &[(String, String)],
    ) -> Result<T, TmdbError> {
        let mut value = self.transport.get(path, query).await?;
        let inner = value.get_mut(field).map(Value::take).unwrap_or(Value::Null);
        serde_json::from_value(inner).map_err(TmdbError::Decode)
    }
}

/// Query-parameter helpers shared by the resolvers
pub mod params {
    /// `page` defaults to 1 when omitted
    pub fn page(page: Option<i32>) -> (String, String) {
        ("page".to_string(), page.unwrap_or(1).to_string())
    }

    /// `language` defaults to en-US when omitted
    pub fn language(language: Option<String>) -> (String, String) {
        (
            "language".to_string(),
            language.unwrap_or_else(|| "en-US".to_string()),
        )
    }

    /// Free-text search query
    pub fn query(q: &str) -> (String, String) {
        ("query".to_string(), q.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticTransport(Value);

    #[async_trait]
    impl TmdbTransport for StaticTransport {
        async fn get(&self, _path: &str, _query: &[(String, String)]) -> Result<Value, TmdbError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        let transport =
            HttpTransport::with_base_url("t".into(), "https://api.example.com/3".into());
        assert_eq!(
            transport.url_for("/movie/popular"),
            "https://api.example.com/3/movie/popular"
        );
        assert_eq!(
            transport.url_for("movie/popular"),
            "https://api.example.com/3/movie/popular"
        );
    }

    #[tokio::test]
    async fn fetch_results_projects_inner_array() {
        let client = TmdbClient::new(Arc::new(StaticTransport(json!({
            "page": 1,
            "results": [{"id": 5}, {"id": 7}],
            "total_pages": 1
        }))));

        #[derive(serde::Deserialize)]
        struct Row {
            id: i64,
        }

        let rows: Vec<Row> = client.fetch_results("movie/popular", &[]).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 5);
        assert_eq!(rows[1].id, 7);
    }

    #[tokio::test]
    async fn fetch_results_tolerates_missing_results() {
        let client = TmdbClient::new(Arc::new(StaticTransport(json!({"page": 1}))));
        let rows: Vec<Value> = client.fetch_results("movie/popular", &[]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn page_param_defaults_to_one() {
        assert_eq!(params::page(None), ("page".to_string(), "1".to_string()));
        assert_eq!(params::page(Some(3)), ("page".to_string(), "3".to_string()));
    }

    #[test]
    fn language_param_defaults_to_en_us() {
        assert_eq!(
            params::language(None),
            ("language".to_string(), "en-US".to_string())
        );
    }
}
