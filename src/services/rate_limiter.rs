//! Rate limiting for outbound API calls
//!
//! Wraps a reqwest client with a governor quota so the upstream API's
//! published request limits are never exceeded, no matter how many
//! concurrent GraphQL fields fan out to it.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

/// Configuration for rate limiting
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per second
    pub requests_per_second: u32,
    /// Burst capacity (allows short bursts above the rate)
    pub burst_size: u32,
}

/// A rate-limited HTTP client wrapper
pub struct RateLimitedClient {
    client: Client,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    name: String,
}

impl RateLimitedClient {
    /// Create a new rate-limited client
    pub fn new(name: &str, config: RateLimitConfig) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));

        let limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            limiter,
            name: name.to_string(),
        }
    }

    /// Create a client for the TMDB API
    pub fn for_tmdb() -> Self {
        // TMDB allows ~40 requests per 10 seconds, so ~4/sec with burst of 10
        Self::new(
            "tmdb",
            RateLimitConfig {
                requests_per_second: 4,
                burst_size: 10,
            },
        )
    }

    /// Start building a GET request; waits for rate-limit capacity first
    pub async fn get(&self, url: &str) -> RequestBuilder {
        self.limiter.until_ready().await;
        debug!(api = %self.name, url = %url, "Outbound request");
        self.client.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_clamps_to_minimum() {
        // NonZeroU32::MIN fallback keeps a misconfigured quota usable
        let client = RateLimitedClient::new(
            "test",
            RateLimitConfig {
                requests_per_second: 0,
                burst_size: 0,
            },
        );
        assert_eq!(client.name, "test");
    }
}
