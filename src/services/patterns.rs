/// URL recognition patterns
///
/// Each pattern is anchored at the scheme and host, so `optimistic.etherscan.io`
/// never matches as `etherscan.io` and `neo.bullx.io` never as `bullx.io`.
/// Named captures:
/// - `addr`: the token / account address
/// - `chain`: a chain path segment (`eth`, `solana`, ...)
/// - `chain_id`: a numeric chain id (BullX)
/// - `currency`: XRPL currency code in front of an issuer (`RLUSD-r...`)
use super::urls::{build_url, UrlParams};
use super::ServiceId;
use crate::chains::{patterns as shapes, Chain};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Characters that may follow an address inside a URL
const BOUNDARY: &str = r"(?:[/?#&]|$)";

/// A service URL pattern matched the input
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMatch {
    pub service: ServiceId,
    pub address: String,
    pub chain: Option<Chain>,
    /// Set when the address is an issuer paired with this currency code
    pub currency: Option<String>,
}

fn addr(alternatives: &[&str]) -> String {
    format!("(?P<addr>{})", alternatives.join("|"))
}

/// Pattern source for `id`, without the scheme/host prefix
fn pattern_source(id: ServiceId) -> String {
    let xrpl = shapes::xrpl();
    let any_token = addr(&[
        shapes::SUI,
        shapes::EVM,
        shapes::TRON,
        shapes::SOLANA,
        shapes::XRPL_CURRENCY_ID,
    ]);
    let evm = addr(&[shapes::EVM]);
    let solana = addr(&[shapes::SOLANA]);

    match id {
        ServiceId::Dextools => format!(
            r"dextools\.io/app/\w+/(?P<chain>[\w-]+)/pair-explorer/{}(?i:_xrp)?",
            any_token
        ),
        ServiceId::Dexscreener => format!(
            r"dexscreener\.com/(?P<chain>[\w-]+)/{}(?i:_xrp)?",
            any_token
        ),
        ServiceId::Honeypot => format!(r"honeypot\.is/(?P<chain>[\w-]+)\?address={}", evm),
        ServiceId::Trenchradar => format!(r"trench\.bot/bundles/{}", solana),
        ServiceId::Etherscan => format!(r"etherscan\.io/address/{}", evm),
        ServiceId::Bscscan => format!(r"bscscan\.com/address/{}", evm),
        ServiceId::Polygonscan => format!(r"polygonscan\.com/address/{}", evm),
        ServiceId::Arbiscan => format!(r"arbiscan\.io/address/{}", evm),
        ServiceId::Solscan => format!(r"solscan\.io/token/{}", solana),
        ServiceId::Birdeye => format!(
            r"birdeye\.so/token/{}(?:\?chain=(?P<chain>\w+))?",
            solana
        ),
        ServiceId::Solanabeach => format!(r"solanabeach\.io/address/{}", solana),
        ServiceId::Xrpscan => format!(r"xrpscan\.com/account/{}", addr(&[xrpl.as_str()])),
        ServiceId::Bithomp => format!(r"bithomp\.com/explorer/{}", addr(&[xrpl.as_str()])),
        ServiceId::Gmgn => format!(
            r"gmgn\.ai/(?P<chain>[\w-]+)/token/{}",
            addr(&[shapes::SUI, shapes::EVM, shapes::TRON, shapes::SOLANA])
        ),
        ServiceId::Xpmarket => format!(
            r"xpmarket\.com/(?:dex|token)/(?:(?P<currency>\w+)-)?{}",
            addr(&[xrpl.as_str()])
        ),
        ServiceId::Xmagnetic => format!(
            r"xmagnetic\.org/(?:dex|tokens)/(?:(?P<currency>\w+)\+)?{}",
            addr(&[xrpl.as_str()])
        ),
        ServiceId::Pumpfun => format!(r"pump\.fun/coin/{}", solana),
        ServiceId::Bullx => format!(
            r"bullx\.io/terminal\?chainId=(?P<chain_id>\d+)&address={}",
            addr(&[shapes::EVM, shapes::SOLANA])
        ),
        ServiceId::Bullxneo => format!(
            r"neo\.bullx\.io/terminal\?chainId=(?P<chain_id>\d+)&address={}",
            addr(&[shapes::TRON, shapes::SOLANA])
        ),
        ServiceId::Snowtrace => format!(r"snowtrace\.io/address/{}", evm),
        ServiceId::Blastscan => format!(r"blastscan\.io/address/{}", evm),
        ServiceId::Optimismscan => format!(r"optimistic\.etherscan\.io/address/{}", evm),
        ServiceId::Zkscan => format!(r"explorer\.zksync\.io/address/{}", evm),
        ServiceId::Oklink => format!(r"oklink\.com/(?P<chain>[\w-]+)/address/{}", evm),
        ServiceId::Basescan => format!(r"basescan\.org/address/{}", evm),
        ServiceId::Basescout => format!(r"basescout\.com/address/{}", evm),
        ServiceId::Solanaexplorer => format!(r"explorer\.solana\.com/address/{}", solana),
        ServiceId::Suiexplorer => format!(r"suiexplorer\.com/address/{}", addr(&[shapes::SUI])),
        ServiceId::Tronscan => format!(r"tronscan\.org/#/address/{}", addr(&[shapes::TRON])),
        ServiceId::Zkscout => format!(r"zkscout\.com/address/{}", evm),
        ServiceId::Ethplorer => format!(r"ethplorer\.io/address/{}", evm),
        ServiceId::Bsctrace => format!(r"bsctrace\.com/address/{}", evm),
        ServiceId::Polygontrace => format!(r"polygontrace\.com/address/{}", evm),
        ServiceId::Solanacompass => format!(r"solanacompass\.com/address/{}", solana),
        ServiceId::Xrpledgerexplorer => {
            format!(r"livenet\.xrpl\.org/accounts/{}", addr(&[xrpl.as_str()]))
        }
        ServiceId::Xrplpm => format!(r"xrpl\.pm/account/{}", addr(&[xrpl.as_str()])),
        ServiceId::Photon => format!(r"photon\.tinyastro\.io/\w+/lp/{}", evm),
        ServiceId::PhotonSol => format!(r"photon-sol\.tinyastro\.io/\w+/lp/{}", solana),
        ServiceId::AntiRugAgent => format!(r"antirugagent\.com/ca/{}", solana),
        ServiceId::Coingecko => {
            r"coingecko\.com/en/coins/(?P<chain>[^/?#]+)/(?P<addr>[^/?#]+)".to_string()
        }
        ServiceId::Coinmarketcap => {
            r"coinmarketcap\.com/currencies/(?P<chain>[^/?#]+)/(?P<addr>[^/?#]+)".to_string()
        }
    }
}

static URL_PATTERNS: Lazy<HashMap<ServiceId, Regex>> = Lazy::new(|| {
    ServiceId::ALL
        .iter()
        .filter_map(|id| {
            let source = format!(
                r"^https?://(?:www\.)?{}{}",
                pattern_source(*id),
                BOUNDARY
            );
            Regex::new(&source).ok().map(|regex| (*id, regex))
        })
        .collect()
});

/// Compiled recognition pattern for a service
pub fn url_pattern(id: ServiceId) -> Option<&'static Regex> {
    URL_PATTERNS.get(&id)
}

/// Try one service's pattern against a URL
///
/// Chain comes from the captured path segment or numeric id; otherwise a
/// single-chain service implies its chain.
pub fn match_service_url(id: ServiceId, url: &str) -> Option<UrlMatch> {
    let captures = url_pattern(id)?.captures(url)?;
    let address = captures.name("addr")?.as_str().to_string();

    let chain = captures
        .name("chain")
        .and_then(|m| Chain::from_path(m.as_str()))
        .or_else(|| {
            captures
                .name("chain_id")
                .and_then(|m| Chain::from_numeric_id(m.as_str()))
        })
        .or_else(|| id.descriptor().single_chain());

    Some(UrlMatch {
        service: id,
        address,
        chain,
        currency: captures.name("currency").map(|m| m.as_str().to_string()),
    })
}

/// First matching service in registry order
pub fn match_url(url: &str) -> Option<UrlMatch> {
    ServiceId::ALL
        .iter()
        .find_map(|id| match_service_url(*id, url))
}

// ============================================================================
// SERVICE HOSTS
// ============================================================================

/// Hosts of every service link template, lower-case, without a leading `www.`
static SERVICE_HOSTS: Lazy<HashSet<String>> = Lazy::new(|| {
    let sample = UrlParams::sample();
    ServiceId::ALL
        .iter()
        .filter_map(|id| build_url(*id, &sample))
        .filter_map(|link| host_of(&link))
        .collect()
});

pub fn service_hosts() -> &'static HashSet<String> {
    &SERVICE_HOSTS
}

/// Lower-case host of an absolute URL with any leading `www.` removed
pub fn host_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

pub fn is_service_host(host: &str) -> bool {
    SERVICE_HOSTS.contains(host)
}
