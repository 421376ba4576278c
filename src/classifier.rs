/// Input classification: raw pasted text -> [`AddressIdentity`]
///
/// Precedence, first match wins:
/// 1. empty input
/// 2. cashtag (`$DOGE`)
/// 3. XRPL account or currency composite
/// 4. direct address shape, in [`Chain::ALL`] order
/// 5. absolute http(s) URL on a known service host, matched against each
///    service's URL pattern in registry order
///
/// Anything else is flagged `invalid`; classification never errors.
use crate::chains::{Chain, XRPL_CURRENCY_ID_REGEX, XRPL_REGEX};
use crate::logger::{self, LogTag};
use crate::services::patterns::{host_of, is_service_host, match_service_url};
use crate::services::ServiceId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\$([A-Za-z0-9_]+)").expect("static cashtag pattern"));

static URL_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/[^\s]*)?$")
        .expect("static url pattern")
});

/// Which rule classified the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Empty,
    Cashtag,
    LedgerAccount,
    LedgerComposite,
    DirectAddress,
    ServiceUrl(ServiceId),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressIdentity {
    pub address: String,
    pub chain: Option<Chain>,
    pub issuer: Option<String>,
    pub currency_id: Option<String>,
    /// Currency code from a `CODE-issuer` style DEX link
    pub currency: Option<String>,
    pub invalid: bool,
    pub kind: MatchKind,
}

impl AddressIdentity {
    fn new(address: impl Into<String>, chain: Option<Chain>, kind: MatchKind) -> Self {
        Self {
            address: address.into(),
            chain,
            issuer: None,
            currency_id: None,
            currency: None,
            invalid: false,
            kind,
        }
    }

    fn invalid(address: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            invalid: true,
            ..Self::new(address, None, kind)
        }
    }

    /// Fill issuer / currency id when `address` is an XRPL currency composite
    fn with_ledger_parts(mut self, address: &str) -> Self {
        if let Some(caps) = XRPL_CURRENCY_ID_REGEX.captures(address) {
            self.currency_id = caps.name("currency").map(|m| m.as_str().to_string());
            self.issuer = caps.name("issuer").map(|m| m.as_str().to_string());
        }
        self
    }
}

/// Classify raw user input
pub fn classify(input: &str) -> AddressIdentity {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return AddressIdentity::invalid("", MatchKind::Empty);
    }

    if let Some(caps) = CASHTAG_REGEX.captures(trimmed) {
        return AddressIdentity::new(&caps[1], None, MatchKind::Cashtag);
    }

    if XRPL_REGEX.is_match(trimmed) {
        let kind = if XRPL_CURRENCY_ID_REGEX.is_match(trimmed) {
            MatchKind::LedgerComposite
        } else {
            MatchKind::LedgerAccount
        };
        return AddressIdentity::new(trimmed, Some(Chain::Xrpl), kind).with_ledger_parts(trimmed);
    }

    if let Some(chain) = Chain::ALL
        .iter()
        .copied()
        .find(|chain| chain.address_regex().is_match(trimmed))
    {
        return AddressIdentity::new(trimmed, Some(chain), MatchKind::DirectAddress);
    }

    if !URL_SHAPE_REGEX.is_match(trimmed) {
        return AddressIdentity::invalid(trimmed, MatchKind::Unrecognized);
    }

    let host = match host_of(trimmed) {
        Some(host) => host,
        None => return AddressIdentity::invalid(trimmed, MatchKind::Unrecognized),
    };
    if !is_service_host(&host) {
        logger::debug(LogTag::Classifier, &format!("Unknown host '{}'", host));
        return AddressIdentity::invalid(trimmed, MatchKind::Unrecognized);
    }

    for id in ServiceId::ALL {
        if let Some(found) = match_service_url(id, trimmed) {
            logger::debug(
                LogTag::Classifier,
                &format!("Matched {} URL pattern: {}", id, found.address),
            );

            let composite = XRPL_CURRENCY_ID_REGEX.is_match(&found.address);
            let chain = if composite {
                Some(Chain::Xrpl)
            } else {
                found.chain
            };
            let mut identity =
                AddressIdentity::new(&found.address, chain, MatchKind::ServiceUrl(id))
                    .with_ledger_parts(&found.address);
            if let Some(currency) = found.currency {
                identity.issuer = Some(found.address.clone());
                identity.currency = Some(currency);
            }
            return identity;
        }
    }

    logger::debug(
        LogTag::Classifier,
        &format!("Known host '{}' but no pattern matched", host),
    );
    AddressIdentity::invalid(trimmed, MatchKind::Unrecognized)
}

/// Structural chain detection for an already-extracted address
///
/// XRPL forms are tested first (r-accounts are also base58-shaped), then each
/// chain in registry order.
pub fn detect_chain_from_regex(address: &str) -> Option<Chain> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }
    if XRPL_REGEX.is_match(address) {
        return Some(Chain::Xrpl);
    }
    Chain::ALL
        .iter()
        .copied()
        .find(|chain| chain.address_regex().is_match(address))
}

/// Shorten long addresses to `first8...last8`
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 16 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::services_for_chain;
    use crate::services::urls::{build_url, UrlParams};

    const EVM: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
    const SUI: &str = "0x06864a6f921804860930db6ddbe2e16acdf8504495ea7481637a1c8b9a8fe54b";
    const SOL: &str = "DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
    const TRON: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
    const XRPL_ACCOUNT: &str = "rMxCKbEDwqr76QuheSUMdEGf4B9xJ8m5De";
    const XRPL_CURRENCY: &str = "524C555344000000000000000000000000000000";

    #[test]
    fn test_empty_input() {
        for input in ["", "   ", "\n\t"] {
            let identity = classify(input);
            assert!(identity.invalid);
            assert_eq!(identity.address, "");
            assert_eq!(identity.kind, MatchKind::Empty);
        }
    }

    #[test]
    fn test_cashtag() {
        let identity = classify("$DOGE");
        assert_eq!(identity.address, "DOGE");
        assert!(!identity.invalid);
        assert_eq!(identity.chain, None);
        assert_eq!(identity.kind, MatchKind::Cashtag);

        assert_eq!(classify("  $pepe to the moon").address, "pepe");

        let cyrillic = classify("$ПЕПЕ");
        assert!(cyrillic.invalid);
        assert_eq!(cyrillic.kind, MatchKind::Unrecognized);
    }

    #[test]
    fn test_direct_addresses() {
        let cases = [
            (EVM, Chain::Ethereum),
            (SUI, Chain::Sui),
            (TRON, Chain::Tron),
            (SOL, Chain::Solana),
            (XRPL_ACCOUNT, Chain::Xrpl),
        ];
        for (address, chain) in cases {
            let identity = classify(&format!("  {}  ", address));
            assert!(!identity.invalid, "{} flagged invalid", address);
            assert_eq!(identity.chain, Some(chain), "{}", address);
            assert_eq!(identity.address, address);
        }
        assert_eq!(classify(EVM).kind, MatchKind::DirectAddress);
        assert_eq!(classify(XRPL_ACCOUNT).kind, MatchKind::LedgerAccount);
    }

    #[test]
    fn test_ledger_composite() {
        let composite = format!("{}.{}", XRPL_CURRENCY, XRPL_ACCOUNT);
        let identity = classify(&composite);
        assert_eq!(identity.kind, MatchKind::LedgerComposite);
        assert_eq!(identity.chain, Some(Chain::Xrpl));
        assert_eq!(identity.currency_id.as_deref(), Some(XRPL_CURRENCY));
        assert_eq!(identity.issuer.as_deref(), Some(XRPL_ACCOUNT));
    }

    #[test]
    fn test_service_urls() {
        let gmgn = classify(&format!("https://gmgn.ai/sol/token/{}", SOL));
        assert_eq!(gmgn.address, SOL);
        assert_eq!(gmgn.chain, Some(Chain::Solana));
        assert_eq!(gmgn.kind, MatchKind::ServiceUrl(ServiceId::Gmgn));

        let dexscreener = classify(&format!(
            "https://dexscreener.com/xrpl/{}.{}_xrp",
            XRPL_CURRENCY, XRPL_ACCOUNT
        ));
        assert_eq!(dexscreener.chain, Some(Chain::Xrpl));
        assert_eq!(dexscreener.issuer.as_deref(), Some(XRPL_ACCOUNT));
        assert_eq!(dexscreener.currency_id.as_deref(), Some(XRPL_CURRENCY));

        let etherscan = classify(&format!("https://etherscan.io/address/{}", EVM));
        assert_eq!(etherscan.chain, Some(Chain::Ethereum));
    }

    #[test]
    fn test_unknown_host_and_unmatched_path_are_invalid() {
        let unknown = classify(&format!("https://example.com/token/{}", SOL));
        assert!(unknown.invalid);
        assert_eq!(unknown.kind, MatchKind::Unrecognized);

        let known = classify("https://dexscreener.com/");
        assert!(known.invalid);
        assert_eq!(known.address, "https://dexscreener.com/");

        assert!(classify("hello world").invalid);
    }

    #[test]
    fn test_built_links_classify_back_to_their_address() {
        for (chain, address) in [(Chain::Ethereum, EVM), (Chain::Solana, SOL), (Chain::Tron, TRON)] {
            let params = UrlParams::new(Some(chain), address);
            for id in services_for_chain(chain) {
                let Some(link) = build_url(id, &params) else {
                    continue;
                };
                let identity = classify(&link);
                assert!(!identity.invalid, "{} link {} flagged invalid", id, link);
                assert_eq!(identity.address, address, "{} link {}", id, link);
            }
        }
    }

    #[test]
    fn test_currency_pair_links_classify_back_to_issuer() {
        let mut params = UrlParams::new(Some(Chain::Xrpl), XRPL_ACCOUNT);
        params.currency = Some("RLUSD".to_string());
        params.issuer = Some(XRPL_ACCOUNT.to_string());

        for id in [ServiceId::Xpmarket, ServiceId::Xmagnetic] {
            let link = build_url(id, &params).unwrap();
            let identity = classify(&link);
            assert!(!identity.invalid, "{} link {} flagged invalid", id, link);
            assert_eq!(identity.address, XRPL_ACCOUNT);
            assert_eq!(identity.chain, Some(Chain::Xrpl));
            assert_eq!(identity.issuer.as_deref(), Some(XRPL_ACCOUNT));
            assert_eq!(identity.currency.as_deref(), Some("RLUSD"));
            assert_eq!(identity.kind, MatchKind::ServiceUrl(id));
        }
    }

    #[test]
    fn test_detect_chain_from_regex() {
        assert_eq!(detect_chain_from_regex(EVM), Some(Chain::Ethereum));
        assert_eq!(detect_chain_from_regex(TRON), Some(Chain::Tron));
        assert_eq!(detect_chain_from_regex(SOL), Some(Chain::Solana));
        assert_eq!(detect_chain_from_regex(XRPL_ACCOUNT), Some(Chain::Xrpl));
        assert_eq!(detect_chain_from_regex("DOGE"), None);
        assert_eq!(detect_chain_from_regex(""), None);
    }

    #[test]
    fn test_format_address() {
        assert_eq!(format_address("short"), "short");
        assert_eq!(format_address(SOL), "DezXAZ8z...B1pPB263");
        assert_eq!(format_address(EVM), "0xdAC17F...3D831ec7");
    }
}
