/// Token resolver - cache-first provider fallback chain
///
/// Providers are asked in order until one knows the key. Every failure is
/// logged and treated as "no data", so `resolve` never errors; the result
/// (possibly empty) is always written to the resolution cache.
use super::provider::MetadataProvider;
use super::types::TokenMetadata;
use crate::apis::ApiManager;
use crate::cache::{TtlCache, RESOLUTION_CACHE_TTL};
use crate::chains::Chain;
use crate::classifier::detect_chain_from_regex;
use crate::config::ResolverConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Duration;

pub struct TokenResolver {
    providers: Vec<Arc<dyn MetadataProvider>>,
    cache: TtlCache<TokenMetadata>,
}

impl TokenResolver {
    pub fn new(providers: Vec<Arc<dyn MetadataProvider>>) -> Self {
        Self::with_cache(
            providers,
            TtlCache::new("resolution-cache", RESOLUTION_CACHE_TTL),
        )
    }

    pub fn with_cache(
        providers: Vec<Arc<dyn MetadataProvider>>,
        cache: TtlCache<TokenMetadata>,
    ) -> Self {
        Self { providers, cache }
    }

    /// Resolver over the manager's enabled providers
    pub fn from_manager(manager: &ApiManager, config: &ResolverConfig) -> Self {
        Self::with_cache(
            manager.metadata_providers(),
            TtlCache::new(
                "resolution-cache",
                Duration::from_secs(config.resolution_cache_ttl_secs),
            ),
        )
    }

    pub fn cache(&self) -> &TtlCache<TokenMetadata> {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve `key` (address, ticker or pair) into metadata
    pub async fn resolve(&self, key: &str) -> TokenMetadata {
        let key = key.trim();
        if key.is_empty() {
            return TokenMetadata::empty(key);
        }

        if let Some(cached) = self.cache.get(key) {
            logger::debug(LogTag::Resolver, &format!("Cache hit for {}", key));
            return cached;
        }

        let metadata = self.fetch(key).await;
        self.cache.set(key, metadata.clone());
        metadata
    }

    async fn fetch(&self, key: &str) -> TokenMetadata {
        for provider in &self.providers {
            let source = provider.source().as_str();
            if !provider.accepts(key) {
                logger::debug(
                    LogTag::Resolver,
                    &format!("{} skipped for {}", source, key),
                );
                continue;
            }

            match provider.lookup(key).await {
                Ok(Some(record)) => {
                    logger::info(
                        LogTag::Resolver,
                        &format!("Resolved {} via {}", key, source),
                    );
                    return record.into_metadata(key);
                }
                Ok(None) => {
                    logger::debug(
                        LogTag::Resolver,
                        &format!("{} has no data for {}", source, key),
                    );
                }
                Err(ApiError::Disabled) => {}
                Err(e) => {
                    logger::warning(
                        LogTag::Resolver,
                        &format!("{} lookup failed for {}: {}", source, key, e),
                    );
                }
            }
        }

        logger::debug(
            LogTag::Resolver,
            &format!("No provider knew {}", key),
        );
        TokenMetadata::empty(key)
    }

    /// Chain for `address`: structural detection first, provider data second
    pub async fn detect_chain(&self, address: &str) -> Option<Chain> {
        match detect_chain_from_regex(address) {
            Some(chain) => Some(chain),
            None => self.resolve(address).await.chain,
        }
    }
}
