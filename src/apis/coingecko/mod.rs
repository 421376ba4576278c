/// CoinGecko API client
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Endpoints implemented:
/// 1. /api/v3/coins/{id} - Coin detail (name, symbol, description, links, market data)
/// 2. /api/v3/coins/{platform}/contract/{address} - Coin detail by contract address
pub mod types;

pub use self::types::CoinGeckoCoinDetail;

use crate::apis::client::HttpClient;
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::ProviderConfig;
use crate::errors::ApiError;
use std::sync::Arc;

// ============================================================================
// API CONFIGURATION
// ============================================================================

pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Request timeout - CoinGecko can be slow, 20s recommended
pub const TIMEOUT_SECS: u64 = 20;

/// URL of the coin detail endpoint
pub fn coin_url(base_url: &str, id: &str) -> String {
    endpoint_url(base_url, &["coins", id])
}

/// URL of the contract lookup endpoint used by the listing support check
pub fn contract_url(base_url: &str, platform: &str, address: &str) -> String {
    endpoint_url(base_url, &["coins", platform, "contract", address])
}

/// Append percent-encoded path segments to `base_url`
fn endpoint_url(base_url: &str, segments: &[&str]) -> String {
    let joined = || format!("{}/{}", base_url.trim_end_matches('/'), segments.join("/"));

    let Ok(mut url) = url::Url::parse(base_url) else {
        return joined();
    };
    match url.path_segments_mut() {
        Ok(mut path) => {
            path.pop_if_empty().extend(segments);
        }
        Err(()) => return joined(),
    }
    url.to_string()
}

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct CoinGeckoClient {
    http_client: HttpClient,
    stats: Arc<ApiStatsTracker>,
    base_url: String,
    enabled: bool,
}

impl CoinGeckoClient {
    pub fn new(enabled: bool) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(TIMEOUT_SECS)?,
            stats: Arc::new(ApiStatsTracker::new()),
            base_url: COINGECKO_BASE_URL.to_string(),
            enabled,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(config.timeout_secs)?,
            stats: Arc::new(ApiStatsTracker::new()),
            base_url: config.base_url_or(COINGECKO_BASE_URL).to_string(),
            enabled: config.enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }

    /// Fetch coin detail by CoinGecko id; unknown ids are `Ok(None)`
    pub async fn fetch_coin(&self, id: &str) -> Result<Option<CoinGeckoCoinDetail>, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let url = coin_url(&self.base_url, id);
        match self
            .http_client
            .get_json::<CoinGeckoCoinDetail>("CoinGecko", &url, &self.stats)
            .await
        {
            Ok(coin) if coin.error.is_some() => Ok(None),
            Ok(coin) => Ok(Some(coin)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
