/// DexScreener API response types - raw JSON mappings
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub pairs: Option<Vec<DexScreenerPair>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerPair {
    #[serde(rename = "chainId")]
    pub chain_id: String,
    #[serde(rename = "dexId", default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "pairAddress", default)]
    pub pair_address: Option<String>,
    #[serde(rename = "baseToken")]
    pub base_token: DexScreenerToken,
    #[serde(rename = "quoteToken", default)]
    pub quote_token: Option<DexScreenerToken>,
    /// Sent as a decimal string; some mirrors send a number
    #[serde(rename = "priceUsd", default)]
    pub price_usd: Option<serde_json::Value>,
    #[serde(rename = "priceChange", default)]
    pub price_change: Option<DexScreenerPriceChange>,
    #[serde(default)]
    pub liquidity: Option<DexScreenerLiquidity>,
    #[serde(default)]
    pub info: Option<DexScreenerInfo>,
}

impl DexScreenerPair {
    /// USD price as a float, whichever JSON type carried it
    pub fn price_usd_f64(&self) -> Option<f64> {
        let price = match self.price_usd.as_ref()? {
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        };
        price.filter(|price| price.is_finite())
    }

    pub fn price_change_24h(&self) -> Option<f64> {
        self.price_change.as_ref().and_then(|change| change.h24)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexScreenerToken {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexScreenerPriceChange {
    #[serde(default)]
    pub m5: Option<f64>,
    #[serde(default)]
    pub h1: Option<f64>,
    #[serde(default)]
    pub h6: Option<f64>,
    #[serde(default)]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexScreenerLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexScreenerInfo {
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub websites: Option<Vec<DexScreenerWebsite>>,
    #[serde(default)]
    pub socials: Option<Vec<DexScreenerSocial>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerWebsite {
    #[serde(default)]
    pub label: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerSocial {
    #[serde(rename = "type")]
    pub social_type: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "schemaVersion": "1.0.0",
            "pairs": [{
                "chainId": "solana",
                "dexId": "raydium",
                "pairAddress": "8sLbNZoA1cfnvMJLPfp98ZLAnFSYCFApfJKMbiXNLwxj",
                "baseToken": {"address": "DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263", "name": "Bonk", "symbol": "Bonk"},
                "quoteToken": {"address": "So11111111111111111111111111111111111111112", "name": "Wrapped SOL", "symbol": "SOL"},
                "priceUsd": "0.00002291",
                "priceChange": {"h24": -3.5},
                "info": {
                    "websites": [{"label": "Website", "url": "https://bonkcoin.com"}],
                    "socials": [{"type": "twitter", "url": "https://x.com/bonk_inu"}]
                }
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let pairs = response.pairs.unwrap();
        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.base_token.symbol.as_deref(), Some("Bonk"));
        assert_eq!(pair.price_usd_f64(), Some(0.00002291));
        assert_eq!(pair.price_change_24h(), Some(-3.5));
    }

    #[test]
    fn test_numeric_price_and_missing_fields() {
        let pair: DexScreenerPair = serde_json::from_str(
            r#"{"chainId": "ethereum", "baseToken": {"address": "0xabc"}, "priceUsd": 1.25}"#,
        )
        .unwrap();
        assert_eq!(pair.price_usd_f64(), Some(1.25));
        assert!(pair.info.is_none());
        assert!(pair.price_change_24h().is_none());
    }

    #[test]
    fn test_null_pairs() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"schemaVersion": "1.0.0", "pairs": null}"#).unwrap();
        assert!(response.pairs.is_none());
    }
}
