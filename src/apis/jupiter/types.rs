/// Jupiter token API v2 response types
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JupiterToken {
    /// Mint address
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(rename = "usdPrice", default)]
    pub usd_price: Option<f64>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}
