/// Outbound service registry
///
/// Static descriptor data keyed by [`ServiceId`], with behavior kept in separate
/// function tables:
/// - `urls`: link builder per service
/// - `patterns`: URL recognition pattern per service
/// - `support`: optional asynchronous support check per service
/// - `preferences`: per-chain ordered enable/disable map
pub mod patterns;
pub mod preferences;
pub mod support;
pub mod urls;

use crate::chains::Chain;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use support::SupportCheck;

// ============================================================================
// SERVICE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Explorer,
    Dex,
    Analytics,
    Social,
    Website,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Explorer => "explorer",
            ServiceType::Dex => "dex",
            ServiceType::Analytics => "analytics",
            ServiceType::Social => "social",
            ServiceType::Website => "website",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SERVICE IDS
// ============================================================================

/// Every linkable service, in registry order
///
/// Registry order is the URL-pattern matching order and the order default
/// preferences list services in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceId {
    Dextools,
    Dexscreener,
    Honeypot,
    Trenchradar,
    Etherscan,
    Bscscan,
    Polygonscan,
    Arbiscan,
    Solscan,
    Birdeye,
    Solanabeach,
    Xrpscan,
    Bithomp,
    Gmgn,
    Xpmarket,
    Xmagnetic,
    Pumpfun,
    Bullx,
    Bullxneo,
    Snowtrace,
    Blastscan,
    Optimismscan,
    Zkscan,
    Oklink,
    Basescan,
    Basescout,
    Solanaexplorer,
    Suiexplorer,
    Tronscan,
    Zkscout,
    Ethplorer,
    Bsctrace,
    Polygontrace,
    Solanacompass,
    Xrpledgerexplorer,
    Xrplpm,
    Photon,
    PhotonSol,
    AntiRugAgent,
    Coingecko,
    Coinmarketcap,
}

impl ServiceId {
    pub const ALL: [ServiceId; 41] = [
        ServiceId::Dextools,
        ServiceId::Dexscreener,
        ServiceId::Honeypot,
        ServiceId::Trenchradar,
        ServiceId::Etherscan,
        ServiceId::Bscscan,
        ServiceId::Polygonscan,
        ServiceId::Arbiscan,
        ServiceId::Solscan,
        ServiceId::Birdeye,
        ServiceId::Solanabeach,
        ServiceId::Xrpscan,
        ServiceId::Bithomp,
        ServiceId::Gmgn,
        ServiceId::Xpmarket,
        ServiceId::Xmagnetic,
        ServiceId::Pumpfun,
        ServiceId::Bullx,
        ServiceId::Bullxneo,
        ServiceId::Snowtrace,
        ServiceId::Blastscan,
        ServiceId::Optimismscan,
        ServiceId::Zkscan,
        ServiceId::Oklink,
        ServiceId::Basescan,
        ServiceId::Basescout,
        ServiceId::Solanaexplorer,
        ServiceId::Suiexplorer,
        ServiceId::Tronscan,
        ServiceId::Zkscout,
        ServiceId::Ethplorer,
        ServiceId::Bsctrace,
        ServiceId::Polygontrace,
        ServiceId::Solanacompass,
        ServiceId::Xrpledgerexplorer,
        ServiceId::Xrplpm,
        ServiceId::Photon,
        ServiceId::PhotonSol,
        ServiceId::AntiRugAgent,
        ServiceId::Coingecko,
        ServiceId::Coinmarketcap,
    ];

    /// Stable identifier used in preference maps and link output
    pub fn as_str(&self) -> &'static str {
        self.descriptor().key
    }

    pub fn descriptor(&self) -> &'static ServiceDescriptor {
        &SERVICES[*self as usize]
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ServiceId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown service '{}'", s))
    }
}

impl Serialize for ServiceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

#[derive(Debug)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub key: &'static str,
    pub name: &'static str,
    pub service_type: ServiceType,
    pub description: &'static str,
    pub supported_chains: &'static [Chain],
    pub support: SupportCheck,
}

impl ServiceDescriptor {
    pub fn supports(&self, chain: Chain) -> bool {
        self.supported_chains.contains(&chain)
    }

    /// The chain implied by a service that only lists one
    pub fn single_chain(&self) -> Option<Chain> {
        match self.supported_chains {
            [only] => Some(*only),
            _ => None,
        }
    }
}

use Chain::*;

const ALL_CHAINS: &[Chain] = &Chain::ALL;

const DEXTOOLS_CHAINS: &[Chain] = &[
    Arbitrum, Avalanche, Base, Blast, Bsc, Ethereum, Optimism, Polygon, Solana, Tron, Xrpl,
    Zksync,
];

const GMGN_CHAINS: &[Chain] = &[
    Avalanche, Base, Blast, Bsc, Ethereum, Optimism, Solana, Sui, Tron, Zksync,
];

const fn service(
    id: ServiceId,
    key: &'static str,
    name: &'static str,
    service_type: ServiceType,
    description: &'static str,
    supported_chains: &'static [Chain],
) -> ServiceDescriptor {
    ServiceDescriptor {
        id,
        key,
        name,
        service_type,
        description,
        supported_chains,
        support: SupportCheck::Always,
    }
}

const fn checked(mut descriptor: ServiceDescriptor, support: SupportCheck) -> ServiceDescriptor {
    descriptor.support = support;
    descriptor
}

/// Registry table, indexed by `ServiceId as usize`
pub static SERVICES: [ServiceDescriptor; 41] = [
    service(ServiceId::Dextools, "dextools", "Dextools", ServiceType::Analytics, "Real-time price charts and trading history", DEXTOOLS_CHAINS),
    service(ServiceId::Dexscreener, "dexscreener", "Dexscreener", ServiceType::Dex, "DEX trading pair explorer and analytics", ALL_CHAINS),
    service(ServiceId::Honeypot, "honeypot", "Honeypot", ServiceType::Analytics, "Smart contract security checker", &[Ethereum, Bsc, Base]),
    checked(
        service(ServiceId::Trenchradar, "trenchradar", "Trench Radar", ServiceType::Analytics, "Bundle analysis and MEV tracking", &[Solana]),
        SupportCheck::PumpFunToken,
    ),
    service(ServiceId::Etherscan, "etherscan", "Etherscan", ServiceType::Explorer, "Block explorer and analytics platform for Ethereum", &[Ethereum]),
    service(ServiceId::Bscscan, "bscscan", "BscScan", ServiceType::Explorer, "Block explorer for BNB Smart Chain", &[Bsc]),
    service(ServiceId::Polygonscan, "polygonscan", "PolygonScan", ServiceType::Explorer, "Block explorer for Polygon chain", &[Polygon]),
    service(ServiceId::Arbiscan, "arbiscan", "ArbiScan", ServiceType::Explorer, "Block explorer and analytics platform for Arbitrum", &[Arbitrum]),
    service(ServiceId::Solscan, "solscan", "SolScan", ServiceType::Explorer, "Solana blockchain explorer", &[Solana]),
    service(ServiceId::Birdeye, "birdeye", "Birdeye", ServiceType::Analytics, "View token on Birdeye", &[Solana]),
    service(ServiceId::Solanabeach, "solanabeach", "Solana Beach", ServiceType::Explorer, "Solana blockchain explorer", &[Solana]),
    service(ServiceId::Xrpscan, "xrpscan", "XRPScan", ServiceType::Explorer, "XRP Ledger block explorer", &[Xrpl]),
    service(ServiceId::Bithomp, "bithomp", "Bithomp", ServiceType::Explorer, "User-friendly XRP explorer", &[Xrpl]),
    service(ServiceId::Gmgn, "gmgn", "GMGN", ServiceType::Dex, "Multi-chain token analytics platform", GMGN_CHAINS),
    service(ServiceId::Xpmarket, "xpmarket", "XPMarket", ServiceType::Dex, "XRPL DEX and NFT marketplace", &[Xrpl]),
    service(ServiceId::Xmagnetic, "xmagnetic", "XMagnetic", ServiceType::Dex, "XRPL DEX trading platform", &[Xrpl]),
    checked(
        service(ServiceId::Pumpfun, "pumpfun", "PumpFun", ServiceType::Dex, "Solana token analytics platform", &[Solana]),
        SupportCheck::PumpFunToken,
    ),
    service(ServiceId::Bullx, "bullx", "BullX", ServiceType::Dex, "Multi-chain token analytics platform", &[Ethereum, Base, Bsc, Arbitrum, Blast, Solana]),
    service(ServiceId::Bullxneo, "bullxneo", "BullX NEO", ServiceType::Dex, "Next-gen token analytics platform", &[Tron, Solana]),
    service(ServiceId::Snowtrace, "snowtrace", "Snowtrace", ServiceType::Explorer, "Avalanche block explorer", &[Avalanche]),
    service(ServiceId::Blastscan, "blastscan", "Blastscan", ServiceType::Explorer, "Blast block explorer", &[Blast]),
    service(ServiceId::Optimismscan, "optimismscan", "Optimism Explorer", ServiceType::Explorer, "Optimism block explorer", &[Optimism]),
    service(ServiceId::Zkscan, "zkscan", "zkSync Explorer", ServiceType::Explorer, "zkSync block explorer", &[Zksync]),
    service(ServiceId::Oklink, "oklink", "OKLink", ServiceType::Explorer, "Alternative Arbitrum block explorer", &[Arbitrum]),
    service(ServiceId::Basescan, "basescan", "Basescan", ServiceType::Explorer, "Base block explorer", &[Base]),
    service(ServiceId::Basescout, "basescout", "Base Scout", ServiceType::Explorer, "Alternative Base block explorer", &[Base]),
    service(ServiceId::Solanaexplorer, "solanaexplorer", "Solana Explorer", ServiceType::Explorer, "Official Solana block explorer", &[Solana]),
    service(ServiceId::Suiexplorer, "suiexplorer", "Sui Explorer", ServiceType::Explorer, "Official Sui block explorer", &[Sui]),
    service(ServiceId::Tronscan, "tronscan", "Tronscan", ServiceType::Explorer, "Official Tron block explorer", &[Tron]),
    service(ServiceId::Zkscout, "zkscout", "zkScout", ServiceType::Explorer, "Alternative zkSync block explorer", &[Zksync]),
    service(ServiceId::Ethplorer, "ethplorer", "Ethplorer", ServiceType::Explorer, "Alternative Ethereum block explorer with token analytics", &[Ethereum]),
    service(ServiceId::Bsctrace, "bsctrace", "BscTrace", ServiceType::Explorer, "Alternative BSC block explorer", &[Bsc]),
    service(ServiceId::Polygontrace, "polygontrace", "PolygonTrace", ServiceType::Explorer, "Alternative Polygon block explorer", &[Polygon]),
    service(ServiceId::Solanacompass, "solanacompass", "Solana Compass", ServiceType::Explorer, "Alternative Solana block explorer", &[Solana]),
    service(ServiceId::Xrpledgerexplorer, "xrpledgerexplorer", "XRPL Explorer", ServiceType::Explorer, "Official XRPL block explorer", &[Xrpl]),
    service(ServiceId::Xrplpm, "xrplpm", "XRPL PM", ServiceType::Explorer, "Alternative XRPL block explorer", &[Xrpl]),
    service(ServiceId::Photon, "photon", "Photon", ServiceType::Dex, "View token analytics on Photon", &[Ethereum]),
    service(ServiceId::PhotonSol, "photonSol", "Photon", ServiceType::Dex, "View Solana token analytics on Photon", &[Solana]),
    checked(
        service(ServiceId::AntiRugAgent, "antiRugAgent", "Anti Rug Agent", ServiceType::Analytics, "Token analysis and rug detection", &[Solana]),
        SupportCheck::PumpFunToken,
    ),
    checked(
        service(ServiceId::Coingecko, "coingecko", "CoinGecko", ServiceType::Analytics, "View token on CoinGecko", ALL_CHAINS),
        SupportCheck::CoinGeckoListing,
    ),
    checked(
        service(ServiceId::Coinmarketcap, "coinmarketcap", "CoinMarketCap", ServiceType::Analytics, "View token on CoinMarketCap", ALL_CHAINS),
        SupportCheck::CoinMarketCapListing,
    ),
];

/// Services that support `chain`, in registry order
pub fn services_for_chain(chain: Chain) -> impl Iterator<Item = ServiceId> {
    ServiceId::ALL
        .into_iter()
        .filter(move |id| id.descriptor().supports(chain))
}

// ============================================================================
// SOCIAL SERVICES
// ============================================================================

/// Social destinations read straight from token metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialService {
    X,
    Telegram,
    Discord,
}

impl SocialService {
    /// Display order
    pub const ALL: [SocialService; 3] = [SocialService::X, SocialService::Telegram, SocialService::Discord];

    pub fn key(&self) -> &'static str {
        match self {
            SocialService::X => "x",
            SocialService::Telegram => "telegram",
            SocialService::Discord => "discord",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SocialService::X => "X",
            SocialService::Telegram => "Telegram",
            SocialService::Discord => "Discord",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SocialService::X => "X (formerly Twitter)",
            SocialService::Telegram => "Telegram",
            SocialService::Discord => "Discord",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_indexed_by_id() {
        for (index, id) in ServiceId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, index);
            assert_eq!(SERVICES[index].id, *id, "table out of order at {}", index);
        }
    }

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for id in ServiceId::ALL {
            assert_eq!(id.as_str().parse::<ServiceId>(), Ok(id));
        }
        assert_eq!("PHOTONSOL".parse::<ServiceId>(), Ok(ServiceId::PhotonSol));
        assert!("myspace".parse::<ServiceId>().is_err());
    }

    #[test]
    fn test_supported_chains() {
        assert!(!ServiceId::Dextools.descriptor().supports(Chain::Sui));
        assert!(ServiceId::Gmgn.descriptor().supports(Chain::Sui));
        assert!(!ServiceId::Gmgn.descriptor().supports(Chain::Xrpl));
        assert_eq!(
            ServiceId::Etherscan.descriptor().single_chain(),
            Some(Chain::Ethereum)
        );
        assert_eq!(ServiceId::Bullxneo.descriptor().single_chain(), None);
    }

    #[test]
    fn test_explorers_are_explorer_typed() {
        for chain in Chain::ALL {
            for explorer in chain.explorers() {
                let descriptor = explorer.descriptor();
                assert_eq!(descriptor.service_type, ServiceType::Explorer);
                assert!(descriptor.supports(chain));
            }
        }
    }

    #[test]
    fn test_services_for_chain_keeps_registry_order() {
        let xrpl: Vec<ServiceId> = services_for_chain(Chain::Xrpl).collect();
        assert_eq!(xrpl[0], ServiceId::Dextools);
        assert_eq!(xrpl[1], ServiceId::Dexscreener);
        assert!(xrpl.contains(&ServiceId::Xpmarket));
        assert!(!xrpl.contains(&ServiceId::Gmgn));
    }
}
