/// CoinGecko API response types
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `/coins/{id}` detail payload (only the fields the resolver reads)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinGeckoCoinDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub links: Option<CoinGeckoLinks>,
    #[serde(default)]
    pub market_data: Option<CoinGeckoMarketData>,
    /// Present instead of the coin fields when the id is unknown
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinGeckoLinks {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub twitter_screen_name: Option<String>,
    #[serde(default)]
    pub telegram_channel_identifier: Option<String>,
    #[serde(default)]
    pub chat_url: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinGeckoMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinGeckoCoinDetail {
    pub fn price_usd(&self) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|data| data.current_price.get("usd").copied())
    }

    pub fn price_change_24h(&self) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|data| data.price_change_percentage_24h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detail() {
        let body = r#"{
            "id": "dogecoin",
            "symbol": "doge",
            "name": "Dogecoin",
            "description": {"en": "Much wow"},
            "links": {
                "homepage": ["https://dogecoin.com/", ""],
                "twitter_screen_name": "dogecoin",
                "telegram_channel_identifier": "",
                "chat_url": ["https://discord.gg/dogecoin", ""]
            },
            "market_data": {
                "current_price": {"usd": 0.12, "eur": 0.11},
                "price_change_percentage_24h": 1.5
            }
        }"#;
        let coin: CoinGeckoCoinDetail = serde_json::from_str(body).unwrap();
        assert_eq!(coin.price_usd(), Some(0.12));
        assert_eq!(coin.price_change_24h(), Some(1.5));
        assert_eq!(coin.links.unwrap().homepage[0], "https://dogecoin.com/");
    }

    #[test]
    fn test_parse_error_body() {
        let coin: CoinGeckoCoinDetail =
            serde_json::from_str(r#"{"error": "coin not found"}"#).unwrap();
        assert_eq!(coin.error.as_deref(), Some("coin not found"));
        assert!(coin.name.is_none());
    }
}
