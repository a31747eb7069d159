//! Goodreads search API client
//!
//! One GET per uncached query against the title search endpoint, first
//! result page only. Fixed timeout, no retries, at most one request per
//! `min_request_interval_ms`.

use crate::error::{ResolveError, ResolveResult};
use async_trait::async_trait;
use picks_common::config::GoodreadsConfig;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const USER_AGENT: &str = concat!("bookpicks/", env!("CARGO_PKG_VERSION"));

/// Network side of the search gateway
///
/// Returns the raw response body on success. Implementations must not cache;
/// [`SearchGateway`](super::SearchGateway) owns the disk cache.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, query: &str) -> ResolveResult<String>;
}

/// Rate limiter enforcing a minimum spacing between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with rate limit
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Goodreads API client
pub struct GoodreadsClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    rate_limiter: RateLimiter,
}

impl GoodreadsClient {
    /// Build a client; a missing key only fails once a request is attempted
    pub fn new(config: &GoodreadsConfig, api_key: Option<String>) -> ResolveResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key,
            rate_limiter: RateLimiter::new(config.min_request_interval_ms),
        })
    }

    fn api_key(&self) -> ResolveResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ResolveError::Config(
                "Goodreads API key not configured. Please configure using one of:\n\
                 1. Command line: --api-key your-key\n\
                 2. Environment: GOODREADS_API_KEY=your-key\n\
                 3. TOML config: ~/.config/bookpicks/config.toml ([goodreads] api_key = \"your-key\")"
                    .to_string(),
            )
        })
    }
}

#[async_trait]
impl SearchApi for GoodreadsClient {
    async fn search(&self, query: &str) -> ResolveResult<String> {
        let key = self.api_key()?;

        self.rate_limiter.wait().await;

        tracing::debug!(query = %query, endpoint = %self.endpoint, "Querying Goodreads search API");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("key", key), ("search", "title"), ("page", "1"), ("q", query)])
            .send()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ResolveError::Gateway {
                query: query.to_string(),
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))
    }
}
