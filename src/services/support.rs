/// Asynchronous per-service support checks
///
/// Services with [`SupportCheck::Always`] are shown whenever they support the
/// chain. The listing checks reach out to CoinGecko / CoinMarketCap through a
/// [`ListingLookup`], which the API layer backs with the long-lived response
/// cache.
use super::urls::UrlParams;
use crate::apis::coingecko::{self, COINGECKO_BASE_URL};
use crate::apis::coinmarketcap::{self, CmcInfoResponse, COINMARKETCAP_BASE_URL};
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportCheck {
    /// No check; chain support is enough
    Always,
    /// Base token must be a pump.fun mint (ends in `pump`)
    PumpFunToken,
    /// CoinGecko must know the base token's contract on its chain
    CoinGeckoListing,
    /// CoinMarketCap must know the base token
    CoinMarketCapListing,
}

/// Listing API base URLs; `None` disables the corresponding check
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEndpoints {
    pub coingecko: Option<String>,
    pub coinmarketcap: Option<String>,
}

impl Default for ListingEndpoints {
    fn default() -> Self {
        Self {
            coingecko: Some(COINGECKO_BASE_URL.to_string()),
            coinmarketcap: Some(COINMARKETCAP_BASE_URL.to_string()),
        }
    }
}

/// Source of listing JSON for the support checks
#[async_trait]
pub trait ListingLookup: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, ApiError>;

    fn endpoints(&self) -> ListingEndpoints {
        ListingEndpoints::default()
    }
}

/// True for pump.fun mints, which always end in `pump` (any case)
pub fn is_pump_fun_address(address: &str) -> bool {
    address.to_lowercase().ends_with("pump")
}

/// Run `check` against the identity; failures count as unsupported
pub async fn is_supported(
    check: SupportCheck,
    params: &UrlParams,
    lookup: &dyn ListingLookup,
) -> bool {
    let base_token = params.base_token.as_deref().unwrap_or("");

    match check {
        SupportCheck::Always => true,
        SupportCheck::PumpFunToken => is_pump_fun_address(base_token),
        SupportCheck::CoinGeckoListing => {
            let Some(base_url) = lookup.endpoints().coingecko else {
                return false;
            };
            let Some(platform) = params.chain.and_then(|chain| chain.coingecko_platform()) else {
                return false;
            };
            if base_token.is_empty() {
                return false;
            }
            let address = contract_key(params, base_token);
            let url = coingecko::contract_url(&base_url, platform, &address);
            match lookup.fetch_json(&url).await {
                Ok(value) => value.get("error").is_none(),
                Err(e) => {
                    log_check_failure("CoinGecko", base_token, &e);
                    false
                }
            }
        }
        SupportCheck::CoinMarketCapListing => {
            let Some(base_url) = lookup.endpoints().coinmarketcap else {
                return false;
            };
            if base_token.is_empty() {
                return false;
            }
            let value = match lookup
                .fetch_json(&coinmarketcap::info_url(&base_url, base_token))
                .await
            {
                Ok(value) => value,
                Err(e) => {
                    log_check_failure("CoinMarketCap", base_token, &e);
                    return false;
                }
            };
            match serde_json::from_value::<CmcInfoResponse>(value) {
                Ok(response) => response.has_listing(),
                Err(e) => {
                    logger::debug(
                        LogTag::Links,
                        &format!("Unexpected CoinMarketCap payload for {}: {}", base_token, e),
                    );
                    false
                }
            }
        }
    }
}

/// EVM addresses are case-insensitive; lower-case them so checksum variants
/// share one cache entry
fn contract_key(params: &UrlParams, address: &str) -> String {
    match params.chain {
        Some(chain) if chain.is_evm() => address.to_lowercase(),
        _ => address.to_string(),
    }
}

fn log_check_failure(provider: &str, token: &str, error: &ApiError) {
    if error.is_not_found() {
        logger::debug(
            LogTag::Links,
            &format!("{} has no listing for {}", provider, token),
        );
    } else {
        logger::warning(
            LogTag::Links,
            &format!("{} listing check failed for {}: {}", provider, token, error),
        );
    }
}
