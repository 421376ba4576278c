/// Normalized token metadata shared by the resolver, analyzer and link generator
use crate::chains::Chain;
use serde::{Deserialize, Serialize};

// ============================================================================
// TOKEN METADATA - provider-independent view of one resolution
// ============================================================================

/// Everything the resolver learned about a lookup key
///
/// Created fresh per resolution and cached by `token_address`. Every field but
/// the key is optional: an empty record means no provider knew the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// The key the resolution was made for
    pub token_address: String,
    pub chain: Option<Chain>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    /// Ticker used by ledger-style links (XPMarket, XMagnetic)
    pub currency: Option<String>,
    /// Canonical token address behind a pair or ticker
    pub base_token: Option<String>,
    pub currency_id: Option<String>,
    pub issuer: Option<String>,
    pub price_usd: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub socials: Option<Socials>,
    pub website: Option<Website>,
}

impl TokenMetadata {
    /// Record for a key nobody knew
    pub fn empty(token_address: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into(),
            ..Default::default()
        }
    }

    /// True when the resolution identified the token at all
    pub fn has_identity(&self) -> bool {
        self.chain.is_some()
            || self.name.is_some()
            || self.currency.is_some()
            || self.symbol.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Socials {
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub discord: Option<String>,
}

impl Socials {
    pub fn is_empty(&self) -> bool {
        self.twitter.is_none() && self.telegram.is_none() && self.discord.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Website {
    pub url: String,
    pub name: String,
}
