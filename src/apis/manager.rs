/// API manager - builds every provider client from one configuration
///
/// Owned by the caller (the binary builds one per run); there is no global instance.
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use crate::services::support::ListingEndpoints;
use crate::tokens::provider::MetadataProvider;

use super::client::{CachedFetcher, HttpClient};
use super::coingecko::{CoinGeckoClient, COINGECKO_BASE_URL};
use super::coinmarketcap::COINMARKETCAP_BASE_URL;
use super::dexscreener::DexScreenerClient;
use super::jupiter::JupiterClient;
use super::stats::ApiStats;
use crate::cache::TtlCache;

pub struct ApiManager {
    pub dexscreener: Arc<DexScreenerClient>,
    pub jupiter: Arc<JupiterClient>,
    pub coingecko: Arc<CoinGeckoClient>,
    /// Cached fetcher behind the CoinGecko / CoinMarketCap listing checks
    pub listings: Arc<CachedFetcher>,
}

impl ApiManager {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let providers = &config.providers;

        logger::debug(
            LogTag::Api,
            &format!(
                "Initializing API clients (dexscreener={}, jupiter={}, coingecko={}, coinmarketcap={})",
                providers.dexscreener.enabled,
                providers.jupiter.enabled,
                providers.coingecko.enabled,
                providers.coinmarketcap.enabled
            ),
        );

        let endpoints = ListingEndpoints {
            coingecko: providers
                .coingecko
                .enabled
                .then(|| providers.coingecko.base_url_or(COINGECKO_BASE_URL).to_string()),
            coinmarketcap: providers.coinmarketcap.enabled.then(|| {
                providers
                    .coinmarketcap
                    .base_url_or(COINMARKETCAP_BASE_URL)
                    .to_string()
            }),
        };

        let listing_timeout = providers
            .coingecko
            .timeout_secs
            .max(providers.coinmarketcap.timeout_secs);
        let listings = CachedFetcher::with_cache(
            HttpClient::new(listing_timeout)?,
            TtlCache::new(
                "api-cache",
                Duration::from_secs(config.resolver.api_cache_ttl_secs),
            ),
        )
        .with_endpoints(endpoints);

        Ok(Self {
            dexscreener: Arc::new(DexScreenerClient::from_config(&providers.dexscreener)?),
            jupiter: Arc::new(JupiterClient::from_config(&providers.jupiter)?),
            coingecko: Arc::new(CoinGeckoClient::from_config(&providers.coingecko)?),
            listings: Arc::new(listings),
        })
    }

    /// Metadata providers in fallback order; disabled clients are left out
    pub fn metadata_providers(&self) -> Vec<Arc<dyn MetadataProvider>> {
        let mut providers: Vec<Arc<dyn MetadataProvider>> = Vec::new();
        if self.dexscreener.is_enabled() {
            providers.push(self.dexscreener.clone());
        }
        if self.jupiter.is_enabled() {
            providers.push(self.jupiter.clone());
        }
        if self.coingecko.is_enabled() {
            providers.push(self.coingecko.clone());
        }
        providers
    }

    /// Get aggregated stats from all API clients
    pub async fn get_all_stats(&self) -> ApiManagerStats {
        ApiManagerStats {
            dexscreener: self.dexscreener.get_stats().await,
            jupiter: self.jupiter.get_stats().await,
            coingecko: self.coingecko.get_stats().await,
            listings: self.listings.get_stats().await,
        }
    }
}

/// Aggregated stats from all API clients
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiManagerStats {
    pub dexscreener: ApiStats,
    pub jupiter: ApiStats,
    pub coingecko: ApiStats,
    pub listings: ApiStats,
}
