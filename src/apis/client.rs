/// Base HTTP client shared by the provider clients
use super::stats::{ApiStats, ApiStatsTracker};
use crate::cache::TtlCache;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use crate::services::support::{ListingEndpoints, ListingLookup};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest response body echoed at verbose level
const MAX_LOGGED_BODY: usize = 400;

/// HTTP client wrapper with timeout
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("tokenscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body into `T`, recording the outcome in `stats`
    pub async fn get_json<T>(
        &self,
        provider: &str,
        url: &str,
        stats: &ApiStatsTracker,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        logger::debug(LogTag::Api, &format!("{} GET {}", provider, url));

        let response = match self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                stats
                    .record_request(false, start.elapsed().as_millis() as f64)
                    .await;
                stats.record_error(format!("Request failed: {}", err)).await;
                return Err(ApiError::from(err));
            }
        };

        let status = response.status();
        if !status.is_success() {
            stats
                .record_request(false, start.elapsed().as_millis() as f64)
                .await;
            stats.record_error(format!("HTTP {}", status)).await;
            return Err(ApiError::HttpStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                stats
                    .record_request(false, start.elapsed().as_millis() as f64)
                    .await;
                return Err(ApiError::from(err));
            }
        };
        let elapsed = start.elapsed().as_millis() as f64;

        logger::verbose(
            LogTag::Api,
            &format!(
                "{} response ({} bytes): {}",
                provider,
                body.len(),
                truncate(&body, MAX_LOGGED_BODY)
            ),
        );

        match serde_json::from_str::<T>(&body) {
            Ok(value) => {
                stats.record_request(true, elapsed).await;
                Ok(value)
            }
            Err(err) => {
                stats.record_request(false, elapsed).await;
                stats.record_error(format!("Parse error: {}", err)).await;
                Err(ApiError::InvalidResponse(format!(
                    "{} returned malformed JSON: {}",
                    provider, err
                )))
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    }
}

// ============================================================================
// CACHED JSON FETCHER
// ============================================================================

/// JSON GET fronted by the long-lived raw-response cache, keyed by URL
///
/// Only successful responses are cached.
pub struct CachedFetcher {
    http: HttpClient,
    cache: TtlCache<serde_json::Value>,
    stats: Arc<ApiStatsTracker>,
    endpoints: ListingEndpoints,
}

impl CachedFetcher {
    pub fn new(timeout_secs: u64, ttl: Duration) -> Result<Self, ApiError> {
        Ok(Self::with_cache(
            HttpClient::new(timeout_secs)?,
            TtlCache::new("api-cache", ttl),
        ))
    }

    pub fn with_cache(http: HttpClient, cache: TtlCache<serde_json::Value>) -> Self {
        Self {
            http,
            cache,
            stats: Arc::new(ApiStatsTracker::new()),
            endpoints: ListingEndpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: ListingEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn cache(&self) -> &TtlCache<serde_json::Value> {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }
}

#[async_trait]
impl ListingLookup for CachedFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        if let Some(cached) = self.cache.get(url) {
            self.stats.record_cache_hit().await;
            logger::debug(LogTag::Cache, &format!("Listing cache hit: {}", url));
            return Ok(cached);
        }

        let value: serde_json::Value = self.http.get_json("listing", url, &self.stats).await?;
        self.cache.set(url, value.clone());
        Ok(value)
    }

    fn endpoints(&self) -> ListingEndpoints {
        self.endpoints.clone()
    }
}
