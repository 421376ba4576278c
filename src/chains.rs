/// Chain registry: identifiers, address shapes, path aliases, explorers
///
/// Pure data plus lookups. The order of [`Chain::ALL`] is the order the classifier
/// tries direct address patterns in, so it is load-bearing:
/// - Ethereum leads the EVM chains (they all share one shape)
/// - Tron precedes Solana (Tron addresses are base58-shaped too)
use crate::services::ServiceId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ============================================================================
// ADDRESS SHAPES
// ============================================================================

/// Unanchored address pattern sources, reused inside service URL patterns
pub mod patterns {
    pub const EVM: &str = r"0x[a-fA-F0-9]{40}";
    pub const SOLANA: &str = r"[1-9A-HJ-NP-Za-km-z]{32,44}";
    pub const XRPL_ACCOUNT: &str = r"r[1-9A-HJ-NP-Za-km-z]{24,34}";
    pub const XRPL_CURRENCY_ID: &str = r"[0-9A-Fa-f]{40}\.?(?:r[1-9A-Za-z]{8,})?";
    pub const TRON: &str = r"T[A-Za-z0-9]{33}";
    pub const SUI: &str = r"0x[a-fA-F0-9]{64}";

    /// Either XRPL form: account or currency code with optional issuer
    pub fn xrpl() -> String {
        format!("(?:{}|{})", XRPL_ACCOUNT, XRPL_CURRENCY_ID)
    }
}

fn anchored(source: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", source)).expect("static address pattern")
}

pub static EVM_REGEX: Lazy<Regex> = Lazy::new(|| anchored(patterns::EVM));
pub static SOLANA_REGEX: Lazy<Regex> = Lazy::new(|| anchored(patterns::SOLANA));
pub static XRPL_REGEX: Lazy<Regex> = Lazy::new(|| anchored(&patterns::xrpl()));
pub static TRON_REGEX: Lazy<Regex> = Lazy::new(|| anchored(patterns::TRON));
pub static SUI_REGEX: Lazy<Regex> = Lazy::new(|| anchored(patterns::SUI));

/// XRPL composite identifier: `<40-hex currency code>[.]<issuer r-address>`
pub static XRPL_CURRENCY_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<currency>[0-9A-Fa-f]{40})\.?(?P<issuer>r[1-9A-Za-z]{8,})?$")
        .expect("static xrpl currency pattern")
});

/// True when the string has the Solana/base58 mint shape
pub fn is_base58_address(value: &str) -> bool {
    SOLANA_REGEX.is_match(value)
}

// ============================================================================
// CHAIN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chain {
    Ethereum,
    Arbitrum,
    Avalanche,
    Base,
    Blast,
    Bsc,
    Optimism,
    Polygon,
    Zksync,
    Sui,
    Tron,
    Solana,
    Xrpl,
}

impl Chain {
    /// Registry order; also the direct-address detection order
    pub const ALL: [Chain; 13] = [
        Chain::Ethereum,
        Chain::Arbitrum,
        Chain::Avalanche,
        Chain::Base,
        Chain::Blast,
        Chain::Bsc,
        Chain::Optimism,
        Chain::Polygon,
        Chain::Zksync,
        Chain::Sui,
        Chain::Tron,
        Chain::Solana,
        Chain::Xrpl,
    ];

    /// Internal identifier, also the path segment most services use
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Arbitrum => "arbitrum",
            Chain::Avalanche => "avalanche",
            Chain::Base => "base",
            Chain::Blast => "blast",
            Chain::Bsc => "bsc",
            Chain::Optimism => "optimism",
            Chain::Polygon => "polygon",
            Chain::Zksync => "zksync",
            Chain::Sui => "sui",
            Chain::Tron => "tron",
            Chain::Solana => "solana",
            Chain::Xrpl => "xrpl",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Arbitrum => "Arbitrum",
            Chain::Avalanche => "Avalanche",
            Chain::Base => "Base",
            Chain::Blast => "Blast",
            Chain::Bsc => "BSC",
            Chain::Optimism => "Optimism",
            Chain::Polygon => "Polygon",
            Chain::Zksync => "zkSync",
            Chain::Sui => "Sui",
            Chain::Tron => "Tron",
            Chain::Solana => "Solana",
            Chain::Xrpl => "XRPL",
        }
    }

    /// Anchored address pattern for this chain
    pub fn address_regex(&self) -> &'static Regex {
        match self {
            Chain::Sui => &SUI_REGEX,
            Chain::Tron => &TRON_REGEX,
            Chain::Solana => &SOLANA_REGEX,
            Chain::Xrpl => &XRPL_REGEX,
            _ => &EVM_REGEX,
        }
    }

    /// Numeric chain id as used by BullX terminal URLs
    pub fn numeric_id(&self) -> &'static str {
        match self {
            Chain::Ethereum => "1",
            Chain::Arbitrum => "42161",
            Chain::Avalanche => "43114",
            Chain::Base => "8453",
            Chain::Blast => "81457",
            Chain::Bsc => "56",
            Chain::Optimism => "10",
            Chain::Polygon => "137",
            Chain::Zksync => "324",
            Chain::Sui => "784",
            Chain::Tron => "728126428",
            Chain::Solana => "1399811149",
            Chain::Xrpl => "1",
        }
    }

    /// URL path aliases; the first one is canonical
    pub fn path_aliases(&self) -> &'static [&'static str] {
        match self {
            Chain::Ethereum => &["eth", "ether", "ethereum"],
            Chain::Solana => &["sol", "solana"],
            Chain::Bsc => &["bsc", "binance", "bnb"],
            Chain::Polygon => &["polygon", "matic"],
            Chain::Arbitrum => &["arb", "arbitrum"],
            Chain::Optimism => &["op", "optimism"],
            Chain::Avalanche => &["avax", "avalanche"],
            Chain::Base => &["base"],
            Chain::Blast => &["blast"],
            Chain::Zksync => &["zksync", "zks"],
            Chain::Xrpl => &["xrpl", "ripple"],
            Chain::Tron => &["tron", "trx"],
            Chain::Sui => &["sui"],
        }
    }

    pub fn primary_path(&self) -> &'static str {
        self.path_aliases()[0]
    }

    pub fn is_evm(&self) -> bool {
        matches!(
            self,
            Chain::Ethereum
                | Chain::Arbitrum
                | Chain::Avalanche
                | Chain::Base
                | Chain::Blast
                | Chain::Bsc
                | Chain::Optimism
                | Chain::Polygon
                | Chain::Zksync
        )
    }

    /// CoinGecko asset platform id, for contract-address lookups
    pub fn coingecko_platform(&self) -> Option<&'static str> {
        match self {
            Chain::Ethereum => Some("ethereum"),
            Chain::Arbitrum => Some("arbitrum-one"),
            Chain::Avalanche => Some("avalanche"),
            Chain::Base => Some("base"),
            Chain::Blast => Some("blast"),
            Chain::Bsc => Some("binance-smart-chain"),
            Chain::Optimism => Some("optimistic-ethereum"),
            Chain::Polygon => Some("polygon-pos"),
            Chain::Zksync => Some("zksync"),
            Chain::Sui => Some("sui"),
            Chain::Tron => Some("tron"),
            Chain::Solana => Some("solana"),
            Chain::Xrpl => None,
        }
    }

    /// Block explorers of this chain, the first is the default explorer
    pub fn explorers(&self) -> &'static [ServiceId] {
        match self {
            Chain::Arbitrum => &[ServiceId::Arbiscan, ServiceId::Oklink],
            Chain::Avalanche => &[ServiceId::Snowtrace],
            Chain::Base => &[ServiceId::Basescan, ServiceId::Basescout],
            Chain::Blast => &[ServiceId::Blastscan],
            Chain::Bsc => &[ServiceId::Bscscan, ServiceId::Bsctrace],
            Chain::Ethereum => &[ServiceId::Etherscan, ServiceId::Ethplorer],
            Chain::Optimism => &[ServiceId::Optimismscan],
            Chain::Polygon => &[ServiceId::Polygonscan, ServiceId::Polygontrace],
            Chain::Solana => &[
                ServiceId::Solscan,
                ServiceId::Solanabeach,
                ServiceId::Solanaexplorer,
                ServiceId::Solanacompass,
            ],
            Chain::Sui => &[ServiceId::Suiexplorer],
            Chain::Tron => &[ServiceId::Tronscan],
            Chain::Xrpl => &[
                ServiceId::Xrpscan,
                ServiceId::Bithomp,
                ServiceId::Xrpledgerexplorer,
                ServiceId::Xrplpm,
            ],
            Chain::Zksync => &[ServiceId::Zkscan, ServiceId::Zkscout],
        }
    }

    pub fn default_explorer(&self) -> ServiceId {
        self.explorers()[0]
    }

    /// Map a URL path segment (`eth`, `matic`, `solana`, ...) back to a chain
    pub fn from_path(segment: &str) -> Option<Chain> {
        let segment = segment.to_lowercase();
        Chain::ALL
            .iter()
            .copied()
            .find(|chain| chain.path_aliases().contains(&segment.as_str()))
    }

    /// Map a numeric chain id back to a chain; ambiguous ids resolve to the
    /// first chain in registry order
    pub fn from_numeric_id(id: &str) -> Option<Chain> {
        Chain::ALL.iter().copied().find(|chain| chain.numeric_id() == id)
    }

    /// Map an aggregator (DexScreener) chain identifier to a chain
    pub fn from_provider_id(id: &str) -> Option<Chain> {
        match id {
            "ethereum" => Some(Chain::Ethereum),
            "bsc" => Some(Chain::Bsc),
            "polygon" => Some(Chain::Polygon),
            "arbitrum" => Some(Chain::Arbitrum),
            "optimism" => Some(Chain::Optimism),
            "base" => Some(Chain::Base),
            "avalanche" => Some(Chain::Avalanche),
            "solana" => Some(Chain::Solana),
            "blast" => Some(Chain::Blast),
            "zksync" => Some(Chain::Zksync),
            "sui" => Some(Chain::Sui),
            "tron" => Some(Chain::Tron),
            "xrpl" => Some(Chain::Xrpl),
            _ => None,
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Chain::ALL
            .iter()
            .copied()
            .find(|chain| chain.as_str() == lower)
            .or_else(|| Chain::from_path(&lower))
            .ok_or_else(|| format!("Unknown chain '{}'", s))
    }
}

// Plain strings so chains work as TOML/JSON map keys; aliases are accepted on input
impl Serialize for Chain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_shapes() {
        assert!(EVM_REGEX.is_match("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!EVM_REGEX.is_match("0xdAC17F958D2ee523a2206206994597C13D831ec"));
        assert!(SUI_REGEX.is_match(&format!("0x{}", "a".repeat(64))));
        assert!(TRON_REGEX.is_match("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"));
        assert!(SOLANA_REGEX.is_match("DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263"));
        assert!(XRPL_REGEX.is_match("rMxCKbEDwqr76QuheSUMdEGf4B9xJ8m5De"));
        assert!(!SOLANA_REGEX.is_match("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"));
    }

    #[test]
    fn test_xrpl_currency_id_captures() {
        let caps = XRPL_CURRENCY_ID_REGEX
            .captures("524C555344000000000000000000000000000000.rMxCKbEDwqr76QuheSUMdEGf4B9xJ8m5De")
            .expect("composite should match");
        assert_eq!(
            &caps["currency"],
            "524C555344000000000000000000000000000000"
        );
        assert_eq!(&caps["issuer"], "rMxCKbEDwqr76QuheSUMdEGf4B9xJ8m5De");

        let bare = XRPL_CURRENCY_ID_REGEX
            .captures("524C555344000000000000000000000000000000")
            .expect("bare currency code should match");
        assert!(bare.name("issuer").is_none());
    }

    #[test]
    fn test_path_lookup() {
        assert_eq!(Chain::from_path("eth"), Some(Chain::Ethereum));
        assert_eq!(Chain::from_path("MATIC"), Some(Chain::Polygon));
        assert_eq!(Chain::from_path("trx"), Some(Chain::Tron));
        assert_eq!(Chain::from_path("dex"), None);
    }

    #[test]
    fn test_numeric_and_provider_ids() {
        assert_eq!(Chain::from_numeric_id("1399811149"), Some(Chain::Solana));
        assert_eq!(Chain::from_numeric_id("1"), Some(Chain::Ethereum));
        assert_eq!(Chain::from_provider_id("bsc"), Some(Chain::Bsc));
        assert_eq!(Chain::from_provider_id("pulsechain"), None);
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("Solana".parse::<Chain>(), Ok(Chain::Solana));
        assert_eq!("arb".parse::<Chain>(), Ok(Chain::Arbitrum));
        assert!("moon".parse::<Chain>().is_err());
    }

    #[test]
    fn test_every_chain_has_a_default_explorer_supporting_it() {
        for chain in Chain::ALL {
            let explorer = chain.default_explorer();
            assert!(
                explorer.descriptor().supports(chain),
                "{} does not support {}",
                explorer,
                chain
            );
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Chain::Zksync).unwrap();
        assert_eq!(json, "\"zksync\"");
        let chain: Chain = serde_json::from_str("\"bsc\"").unwrap();
        assert_eq!(chain, Chain::Bsc);
        let alias: Chain = serde_json::from_str("\"matic\"").unwrap();
        assert_eq!(alias, Chain::Polygon);
    }
}
