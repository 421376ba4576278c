/// DexScreener API client
///
/// API Documentation: https://docs.dexscreener.com/api/reference
///
/// Endpoints implemented:
/// 1. /latest/dex/search?q={query} - Search pairs by token address, pair address or symbol
pub mod types;

pub use self::types::{DexScreenerPair, SearchResponse};

use crate::apis::client::HttpClient;
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::ProviderConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use std::sync::Arc;

// ============================================================================
// API CONFIGURATION
// ============================================================================

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

/// Request timeout in seconds - DexScreener is fast, 10s is sufficient
pub const TIMEOUT_SECS: u64 = 10;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct DexScreenerClient {
    http_client: HttpClient,
    stats: Arc<ApiStatsTracker>,
    base_url: String,
    enabled: bool,
}

impl DexScreenerClient {
    pub fn new(enabled: bool, timeout_secs: u64) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            stats: Arc::new(ApiStatsTracker::new()),
            base_url: DEXSCREENER_BASE_URL.to_string(),
            enabled,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        let mut client = Self::new(config.enabled, config.timeout_secs)?;
        client.base_url = config.base_url_or(DEXSCREENER_BASE_URL).to_string();
        Ok(client)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }

    /// Search pairs matching `query`, in DexScreener's own ranking order
    ///
    /// An empty result is `Ok(vec![])`, not an error.
    pub async fn search_pairs(&self, query: &str) -> Result<Vec<DexScreenerPair>, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let url = format!("{}/latest/dex/search?q={}", self.base_url, encoded);

        let response: SearchResponse = self
            .http_client
            .get_json("DexScreener", &url, &self.stats)
            .await?;

        let pairs = response.pairs.unwrap_or_default();
        logger::debug(
            LogTag::Api,
            &format!("DexScreener search '{}' returned {} pairs", query, pairs.len()),
        );
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_client_short_circuits() {
        let client = DexScreenerClient::new(false, TIMEOUT_SECS).unwrap();
        assert!(!client.is_enabled());
        let err = client.search_pairs("bonk").await.unwrap_err();
        assert_eq!(err, ApiError::Disabled);
        assert_eq!(client.get_stats().await.total_requests, 0);
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = DexScreenerClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
