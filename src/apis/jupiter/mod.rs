/// Jupiter API client for Solana token lookups
///
/// API Documentation: https://dev.jup.ag/docs/token-api/v2
///
/// Endpoints implemented:
/// 1. /tokens/v2/search?query={mint} - Search tokens by mint, symbol or name
pub mod types;

pub use self::types::JupiterToken;

use crate::apis::client::HttpClient;
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::ProviderConfig;
use crate::errors::ApiError;
use std::sync::Arc;

// ============================================================================
// API CONFIGURATION
// ============================================================================

pub const JUPITER_BASE_URL: &str = "https://lite-api.jup.ag/tokens/v2";

/// Request timeout - Jupiter API is fast, 15s is sufficient
pub const TIMEOUT_SECS: u64 = 15;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct JupiterClient {
    http_client: HttpClient,
    stats: Arc<ApiStatsTracker>,
    base_url: String,
    enabled: bool,
}

impl JupiterClient {
    pub fn new(enabled: bool) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(TIMEOUT_SECS)?,
            stats: Arc::new(ApiStatsTracker::new()),
            base_url: JUPITER_BASE_URL.to_string(),
            enabled,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(config.timeout_secs)?,
            stats: Arc::new(ApiStatsTracker::new()),
            base_url: config.base_url_or(JUPITER_BASE_URL).to_string(),
            enabled: config.enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }

    /// Look up a single mint
    ///
    /// Search is fuzzy, so only a hit whose id equals `mint` counts.
    pub async fn fetch_token(&self, mint: &str) -> Result<Option<JupiterToken>, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let encoded: String = url::form_urlencoded::byte_serialize(mint.as_bytes()).collect();
        let url = format!("{}/search?query={}", self.base_url, encoded);

        let tokens: Vec<JupiterToken> = self
            .http_client
            .get_json("Jupiter", &url, &self.stats)
            .await?;

        Ok(pick_token(tokens, mint))
    }
}

fn pick_token(tokens: Vec<JupiterToken>, mint: &str) -> Option<JupiterToken> {
    tokens.into_iter().find(|token| token.id == mint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: &str, symbol: &str) -> JupiterToken {
        JupiterToken {
            id: id.to_string(),
            name: None,
            symbol: Some(symbol.to_string()),
            icon: None,
            decimals: None,
            usd_price: None,
            is_verified: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_pick_token_requires_exact_mint() {
        let tokens = vec![token("other", "OTH"), token("mint", "MNT")];
        assert_eq!(pick_token(tokens, "mint").unwrap().symbol.as_deref(), Some("MNT"));

        // a fuzzy hit for another mint is a different token
        let tokens = vec![token("So11111111111111111111111111111111111111112", "SOL")];
        assert!(pick_token(tokens, "DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263").is_none());

        assert!(pick_token(Vec::new(), "mint").is_none());
    }

    #[tokio::test]
    async fn test_disabled_client() {
        let client = JupiterClient::new(false).unwrap();
        assert_eq!(client.fetch_token("mint").await.unwrap_err(), ApiError::Disabled);
    }
}
