/// CoinMarketCap info endpoint response types
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmcInfoResponse {
    #[serde(default)]
    pub status: Option<CmcStatus>,
    /// Keyed by CMC id; shape varies by query type
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmcStatus {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl CmcInfoResponse {
    /// A successful status with a non-empty data payload
    pub fn has_listing(&self) -> bool {
        let ok = self
            .status
            .as_ref()
            .map(|status| status.error_code == 0)
            .unwrap_or(false);

        let has_data = match &self.data {
            Some(serde_json::Value::Object(map)) => !map.is_empty(),
            Some(serde_json::Value::Array(items)) => !items.is_empty(),
            _ => false,
        };

        ok && has_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_listing() {
        let listed: CmcInfoResponse = serde_json::from_str(
            r#"{"status": {"error_code": 0}, "data": {"74": {"name": "Dogecoin"}}}"#,
        )
        .unwrap();
        assert!(listed.has_listing());

        let empty: CmcInfoResponse =
            serde_json::from_str(r#"{"status": {"error_code": 0}, "data": {}}"#).unwrap();
        assert!(!empty.has_listing());

        let failed: CmcInfoResponse = serde_json::from_str(
            r#"{"status": {"error_code": 400, "error_message": "Invalid value for \"address\""}}"#,
        )
        .unwrap();
        assert!(!failed.has_listing());
    }
}
