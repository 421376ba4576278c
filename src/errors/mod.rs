/// Error types for tokenscope
///
/// Classification and link generation have no error channel of their own (an invalid
/// input is a flag, a missing chain is an empty list). Errors only exist at the I/O
/// edges: provider calls and configuration files.
use thiserror::Error;

// =============================================================================
// PROVIDER / HTTP ERRORS
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not found")]
    NotFound,

    #[error("API disabled")]
    Disabled,
}

impl ApiError {
    /// Whether the provider answered but had nothing for the key
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound | ApiError::HttpStatus { status: 404, .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {message}")]
    Invalid { path: String, message: String },

    #[error("Config already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(ApiError::HttpStatus {
            endpoint: "coins/doge".to_string(),
            status: 404
        }
        .is_not_found());
        assert!(!ApiError::HttpStatus {
            endpoint: "coins/doge".to_string(),
            status: 500
        }
        .is_not_found());
        assert!(!ApiError::Disabled.is_not_found());
    }

    #[test]
    fn test_display_messages() {
        let err = ApiError::HttpStatus {
            endpoint: "latest/dex/search".to_string(),
            status: 429,
        };
        assert_eq!(err.to_string(), "HTTP 429 from latest/dex/search");
        assert_eq!(
            ApiError::Network("connection reset".to_string()).to_string(),
            "Network error: connection reset"
        );
    }
}
