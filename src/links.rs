/// Outbound link generation
///
/// Social and website links come straight from metadata. Service links are
/// chain-scoped: no chain, no links. Support checks for one pass run
/// concurrently and the output keeps preference order.
use crate::chains::Chain;
use crate::logger::{self, LogTag};
use crate::services::preferences::ServicePreferences;
use crate::services::support::{is_supported, ListingLookup};
use crate::services::urls::{build_url, UrlParams};
use crate::services::{ServiceId, ServiceType, SocialService};
use crate::tokens::types::TokenMetadata;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLink {
    pub service_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    pub url: Option<String>,
}

impl ServiceLink {
    fn for_service(id: ServiceId, url: String) -> Self {
        let descriptor = id.descriptor();
        Self {
            service_id: id.as_str().to_string(),
            name: descriptor.name.to_string(),
            service_type: descriptor.service_type,
            description: descriptor.description.to_string(),
            url: Some(url),
        }
    }
}

// ============================================================================
// METADATA LINKS
// ============================================================================

/// X, Telegram, Discord, in that order, for whichever handles are known
pub fn social_links(metadata: &TokenMetadata) -> Vec<ServiceLink> {
    let Some(socials) = metadata.socials.as_ref() else {
        return Vec::new();
    };

    SocialService::ALL
        .iter()
        .filter_map(|service| {
            let url = match service {
                SocialService::X => socials.twitter.as_ref(),
                SocialService::Telegram => socials.telegram.as_ref(),
                SocialService::Discord => socials.discord.as_ref(),
            }?;
            Some(ServiceLink {
                service_id: service.key().to_string(),
                name: service.name().to_string(),
                service_type: ServiceType::Social,
                description: service.description().to_string(),
                url: Some(url.clone()),
            })
        })
        .collect()
}

pub fn website_link(metadata: &TokenMetadata) -> Option<ServiceLink> {
    let website = metadata.website.as_ref()?;
    Some(ServiceLink {
        service_id: "website".to_string(),
        name: if website.name.is_empty() {
            "Website".to_string()
        } else {
            website.name.clone()
        },
        service_type: ServiceType::Website,
        description: "Official website".to_string(),
        url: Some(website.url.clone()),
    })
}

/// Website first, then socials
pub fn token_links(metadata: &TokenMetadata) -> Vec<ServiceLink> {
    website_link(metadata)
        .into_iter()
        .chain(social_links(metadata))
        .collect()
}

// ============================================================================
// SERVICE LINKS
// ============================================================================

fn url_params(address: &str, metadata: &TokenMetadata) -> UrlParams {
    let mut params = UrlParams::from_metadata(metadata);
    if !address.trim().is_empty() {
        params.token_address = address.trim().to_string();
    }
    params
}

/// Link to the chain's preferred block explorer
///
/// `preferred` overrides the chain's default explorer.
pub fn explorer_link(
    metadata: &TokenMetadata,
    address: &str,
    preferred: &BTreeMap<Chain, ServiceId>,
) -> Option<ServiceLink> {
    let chain = metadata.chain?;
    let explorer = preferred
        .get(&chain)
        .copied()
        .filter(|id| chain.explorers().contains(id))
        .unwrap_or_else(|| chain.default_explorer());

    let url = build_url(explorer, &url_params(address, metadata))?;
    Some(ServiceLink::for_service(explorer, url))
}

/// Enabled, chain-supported, support-checked service links in preference order
pub async fn service_links(
    address: &str,
    preferences: &ServicePreferences,
    metadata: &TokenMetadata,
    lookup: &dyn ListingLookup,
) -> Vec<ServiceLink> {
    let Some(chain) = metadata.chain else {
        logger::debug(LogTag::Links, "No chain resolved; no service links");
        return Vec::new();
    };

    let params = url_params(address, metadata);
    let candidates = preferences.candidates(chain);

    let checks = candidates.iter().map(|id| {
        let params = &params;
        async move {
            let url = build_url(*id, params)?;
            if !is_supported(id.descriptor().support, params, lookup).await {
                logger::debug(
                    LogTag::Links,
                    &format!("{} does not support {}", id, params.target()),
                );
                return None;
            }
            Some(ServiceLink::for_service(*id, url))
        }
    });

    let links: Vec<ServiceLink> = join_all(checks).await.into_iter().flatten().collect();

    logger::debug(
        LogTag::Links,
        &format!(
            "{} of {} {} services linked for {}",
            links.len(),
            candidates.len(),
            chain,
            params.target()
        ),
    );
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::services::preferences::ChainPreferences;
    use crate::services::support::ListingEndpoints;
    use crate::tokens::types::{Socials, Website};
    use async_trait::async_trait;
    use std::collections::HashSet;

    const PUMP: &str = "2qEHjDLDLbuBgRYvsxhc5D6uDWAivNFZGan56P1tpump";
    const SOL: &str = "DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

    /// Lists exactly the URLs it was given; everything else is a 404
    struct StubListings {
        listed: HashSet<String>,
    }

    impl StubListings {
        fn none() -> Self {
            Self {
                listed: HashSet::new(),
            }
        }
    }

    #[async_trait]
    impl ListingLookup for StubListings {
        async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, ApiError> {
            if self.listed.contains(url) {
                Ok(serde_json::json!({ "id": "listed" }))
            } else {
                Err(ApiError::HttpStatus {
                    endpoint: url.to_string(),
                    status: 404,
                })
            }
        }

        fn endpoints(&self) -> ListingEndpoints {
            ListingEndpoints {
                coingecko: Some("http://gecko".to_string()),
                coinmarketcap: None,
            }
        }
    }

    fn solana_metadata(base_token: &str) -> TokenMetadata {
        TokenMetadata {
            chain: Some(Chain::Solana),
            base_token: Some(base_token.to_string()),
            ..TokenMetadata::empty(base_token)
        }
    }

    fn ids(links: &[ServiceLink]) -> Vec<&str> {
        links.iter().map(|link| link.service_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_no_chain_no_links() {
        let mut prefs = ServicePreferences::new();
        prefs.set_enabled(Chain::Ethereum, ServiceId::Dextools, true);
        let metadata = TokenMetadata::empty("DOGE");

        let links = service_links("DOGE", &prefs, &metadata, &StubListings::none()).await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_pump_only_services_need_pump_mint() {
        let prefs = ServicePreferences::new();
        let lookup = StubListings::none();

        let plain = service_links(SOL, &prefs, &solana_metadata(SOL), &lookup).await;
        assert!(!ids(&plain).contains(&"pumpfun"));
        assert!(!ids(&plain).contains(&"trenchradar"));
        assert!(ids(&plain).contains(&"dexscreener"));

        let pump = service_links(PUMP, &prefs, &solana_metadata(PUMP), &lookup).await;
        assert!(ids(&pump).contains(&"pumpfun"));
        assert!(ids(&pump).contains(&"antiRugAgent"));
    }

    #[tokio::test]
    async fn test_preference_order_preserved() {
        let mut prefs = ServicePreferences::new();
        prefs.set(
            Chain::Solana,
            ChainPreferences::new(vec![
                (ServiceId::Gmgn, true),
                (ServiceId::Dexscreener, true),
                (ServiceId::Dextools, false),
            ]),
        );

        let links = service_links(SOL, &prefs, &solana_metadata(SOL), &StubListings::none()).await;
        let ids = ids(&links);
        assert_eq!(&ids[..2], &["gmgn", "dexscreener"]);
        assert!(!ids.contains(&"dextools"));
        assert!(ids.contains(&"birdeye"));
    }

    #[tokio::test]
    async fn test_listing_checks_filter_links() {
        let lookup = StubListings {
            listed: [format!("http://gecko/coins/solana/contract/{}", SOL)].into_iter().collect(),
        };
        let links = service_links(SOL, &ServicePreferences::new(), &solana_metadata(SOL), &lookup).await;
        let ids = ids(&links);
        assert!(ids.contains(&"coingecko"));
        // disabled endpoint
        assert!(!ids.contains(&"coinmarketcap"));

        let coingecko = links.iter().find(|link| link.service_id == "coingecko").unwrap();
        assert_eq!(
            coingecko.url.as_deref(),
            Some(format!("https://www.coingecko.com/en/coins/solana/{}", SOL).as_str())
        );
    }

    #[tokio::test]
    async fn test_links_point_at_base_token() {
        let metadata = TokenMetadata {
            chain: Some(Chain::Solana),
            base_token: Some(SOL.to_string()),
            ..TokenMetadata::empty("BONK")
        };
        let links = service_links("BONK", &ServicePreferences::new(), &metadata, &StubListings::none()).await;
        let dexscreener = links.iter().find(|link| link.service_id == "dexscreener").unwrap();
        assert_eq!(
            dexscreener.url.as_deref(),
            Some(format!("https://dexscreener.com/solana/{}", SOL).as_str())
        );
        assert_eq!(dexscreener.service_type, ServiceType::Dex);
    }

    #[test]
    fn test_social_and_website_links() {
        let metadata = TokenMetadata {
            socials: Some(Socials {
                twitter: Some("https://x.com/bonk_inu".to_string()),
                telegram: None,
                discord: Some("https://discord.gg/bonk".to_string()),
            }),
            website: Some(Website {
                url: "https://bonkcoin.com".to_string(),
                name: "Bonk".to_string(),
            }),
            ..TokenMetadata::empty(SOL)
        };

        let links = token_links(&metadata);
        assert_eq!(ids(&links), vec!["website", "x", "discord"]);
        assert_eq!(links[0].service_type, ServiceType::Website);
        assert_eq!(links[1].service_type, ServiceType::Social);

        assert!(social_links(&TokenMetadata::empty(SOL)).is_empty());
    }

    #[test]
    fn test_explorer_link_honors_preference() {
        let metadata = solana_metadata(SOL);
        let default = explorer_link(&metadata, SOL, &BTreeMap::new()).unwrap();
        assert_eq!(default.service_id, "solscan");
        assert_eq!(
            default.url.as_deref(),
            Some(format!("https://solscan.io/token/{}", SOL).as_str())
        );

        let mut preferred = BTreeMap::new();
        preferred.insert(Chain::Solana, ServiceId::Solanabeach);
        let chosen = explorer_link(&metadata, SOL, &preferred).unwrap();
        assert_eq!(chosen.service_id, "solanabeach");

        // not a solana explorer
        preferred.insert(Chain::Solana, ServiceId::Etherscan);
        assert_eq!(
            explorer_link(&metadata, SOL, &preferred).unwrap().service_id,
            "solscan"
        );

        assert!(explorer_link(&TokenMetadata::empty(SOL), SOL, &BTreeMap::new()).is_none());
    }

    #[test]
    fn test_service_link_serializes_type_field() {
        let link = ServiceLink::for_service(ServiceId::Etherscan, "https://etherscan.io".to_string());
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["type"], "explorer");
        assert_eq!(json["service_id"], "etherscan");
    }
}
