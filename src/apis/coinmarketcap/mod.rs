/// CoinMarketCap public info endpoint
///
/// Only used to decide whether a CoinMarketCap link is worth showing; the
/// request goes through the cached listing fetcher, not a dedicated client.
pub mod types;

pub use self::types::CmcInfoResponse;

// ============================================================================
// API CONFIGURATION
// ============================================================================

pub const COINMARKETCAP_BASE_URL: &str = "https://api.coinmarketcap.com";

/// `/v2/cryptocurrency/info?address=` lookup URL for a contract address
pub fn info_url(base_url: &str, address: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(address.as_bytes()).collect();
    format!("{}/v2/cryptocurrency/info?address={}", base_url, encoded)
}
