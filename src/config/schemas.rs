/// Configuration schemas
///
/// Every section is declared with `config_struct!`, so an empty or partial file
/// deserializes to the defaults below.
use crate::chains::Chain;
use crate::services::preferences::ServicePreferences;
use crate::services::ServiceId;
use std::collections::BTreeMap;

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    /// Logging configuration
    pub struct LoggingConfig {
        /// Minimum level: error, warning, info, debug, verbose
        level: String = "info".to_string(),
        /// Optional plain-text log file (appended)
        file: Option<String> = None,
        /// Console colors
        colored: bool = true,
    }
}

// ============================================================================
// RESOLVER CONFIGURATION
// ============================================================================

config_struct! {
    /// Metadata resolution and caching
    pub struct ResolverConfig {
        /// Lifetime of a resolved (or unresolved) metadata entry
        resolution_cache_ttl_secs: u64 = 300,
        /// Lifetime of raw listing lookups (CoinGecko/CoinMarketCap support checks)
        api_cache_ttl_secs: u64 = 14_400,
    }
}

// ============================================================================
// PROVIDER CONFIGURATION
// ============================================================================

config_struct! {
    /// One remote metadata provider
    pub struct ProviderConfig {
        enabled: bool = true,
        /// Empty means the client's built-in base URL
        base_url: String = String::new(),
        timeout_secs: u64 = 10,
    }
}

impl ProviderConfig {
    /// Configured base URL, or `fallback` when none is set
    pub fn base_url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.base_url.trim().is_empty() {
            fallback
        } else {
            self.base_url.trim_end_matches('/')
        }
    }
}

config_struct! {
    /// Remote providers, in fallback order for metadata resolution
    pub struct ProvidersConfig {
        dexscreener: ProviderConfig = ProviderConfig::default(),
        jupiter: ProviderConfig = ProviderConfig::default(),
        coingecko: ProviderConfig = ProviderConfig::default(),
        /// Only used for the CoinMarketCap listing check
        coinmarketcap: ProviderConfig = ProviderConfig::default(),
    }
}

// ============================================================================
// LINKS CONFIGURATION
// ============================================================================

config_struct! {
    /// Link generation preferences
    pub struct LinksConfig {
        /// Per-chain ordered service toggles; chains not listed use the defaults
        preferences: ServicePreferences = ServicePreferences::default(),
        /// Per-chain explorer override for the explorer link
        preferred_explorers: BTreeMap<Chain, ServiceId> = BTreeMap::new(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sections
    pub struct Config {
        logging: LoggingConfig = LoggingConfig::default(),
        resolver: ResolverConfig = ResolverConfig::default(),
        providers: ProvidersConfig = ProvidersConfig::default(),
        links: LinksConfig = LinksConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Config {
    /// Reject values that would make the resolver unusable
    pub fn validate(&self) -> Result<(), String> {
        if crate::logger::LogLevel::parse(&self.logging.level).is_none() {
            return Err(format!("Unknown logging level '{}'", self.logging.level));
        }

        for (name, provider) in [
            ("dexscreener", &self.providers.dexscreener),
            ("jupiter", &self.providers.jupiter),
            ("coingecko", &self.providers.coingecko),
            ("coinmarketcap", &self.providers.coinmarketcap),
        ] {
            if provider.timeout_secs == 0 {
                return Err(format!("providers.{}.timeout_secs must be > 0", name));
            }
        }

        for (chain, explorer) in &self.links.preferred_explorers {
            if !chain.explorers().contains(explorer) {
                return Err(format!(
                    "links.preferred_explorers: {} is not an explorer for {}",
                    explorer, chain
                ));
            }
        }

        Ok(())
    }
}
