/// Metadata providers - one tagged record type per upstream, one total mapping each
///
/// Provider order (DexScreener -> Jupiter -> CoinGecko) is decided by the
/// caller that assembles the list; see `ApiManager::metadata_providers`.
use super::types::{Socials, TokenMetadata, Website};
use crate::apis::coingecko::{CoinGeckoClient, CoinGeckoCoinDetail};
use crate::apis::dexscreener::{DexScreenerClient, DexScreenerPair};
use crate::apis::jupiter::types::JupiterToken;
use crate::apis::jupiter::JupiterClient;
use crate::chains::{self, Chain};
use crate::errors::ApiError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSource {
    DexScreener,
    Jupiter,
    CoinGecko,
}

impl ProviderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSource::DexScreener => "dexscreener",
            ProviderSource::Jupiter => "jupiter",
            ProviderSource::CoinGecko => "coingecko",
        }
    }
}

/// Raw provider answer, tagged by source
#[derive(Debug, Clone)]
pub enum ProviderRecord {
    DexScreener(Box<DexScreenerPair>),
    Jupiter(JupiterToken),
    CoinGecko(Box<CoinGeckoCoinDetail>),
}

impl ProviderRecord {
    pub fn source(&self) -> ProviderSource {
        match self {
            ProviderRecord::DexScreener(_) => ProviderSource::DexScreener,
            ProviderRecord::Jupiter(_) => ProviderSource::Jupiter,
            ProviderRecord::CoinGecko(_) => ProviderSource::CoinGecko,
        }
    }

    /// Normalize into [`TokenMetadata`] for lookup key `key`
    pub fn into_metadata(self, key: &str) -> TokenMetadata {
        match self {
            ProviderRecord::DexScreener(pair) => from_dexscreener(*pair, key),
            ProviderRecord::Jupiter(token) => from_jupiter(token, key),
            ProviderRecord::CoinGecko(coin) => from_coingecko(*coin, key),
        }
    }
}

fn from_dexscreener(pair: DexScreenerPair, key: &str) -> TokenMetadata {
    let price_usd = pair.price_usd_f64();
    let price_change_24h = pair.price_change_24h();
    let info = pair.info.unwrap_or_default();

    let mut socials = Socials::default();
    for social in info.socials.unwrap_or_default() {
        match social.social_type.to_lowercase().as_str() {
            "twitter" | "x" => socials.twitter = Some(social.url),
            "telegram" => socials.telegram = Some(social.url),
            "discord" => socials.discord = Some(social.url),
            _ => {}
        }
    }

    let website = info
        .websites
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|site| Website {
            url: site.url,
            name: site.label.unwrap_or_else(|| "Website".to_string()),
        });

    let base = pair.base_token;
    TokenMetadata {
        token_address: key.to_string(),
        chain: Chain::from_provider_id(&pair.chain_id),
        name: base.name,
        currency: base.symbol.clone(),
        symbol: base.symbol,
        description: info.description.or(base.description),
        base_token: Some(base.address).filter(|address| !address.is_empty()),
        currency_id: None,
        issuer: None,
        price_usd,
        price_change_24h,
        socials: (!socials.is_empty()).then_some(socials),
        website,
    }
}

fn from_jupiter(token: JupiterToken, key: &str) -> TokenMetadata {
    TokenMetadata {
        token_address: key.to_string(),
        chain: Some(Chain::Solana),
        currency: token.symbol,
        base_token: Some(token.id),
        ..Default::default()
    }
}

fn from_coingecko(coin: CoinGeckoCoinDetail, key: &str) -> TokenMetadata {
    let price_usd = coin.price_usd();
    let price_change_24h = coin.price_change_24h();
    let links = coin.links.unwrap_or_default();

    let website = links
        .homepage
        .iter()
        .find(|url| !url.is_empty())
        .map(|url| Website {
            url: url.clone(),
            name: coin.name.clone().unwrap_or_default(),
        });

    let socials = Socials {
        twitter: non_empty(links.twitter_screen_name).map(|handle| format!("https://x.com/{}", handle)),
        telegram: non_empty(links.telegram_channel_identifier)
            .map(|channel| format!("https://t.me/{}", channel)),
        discord: links.chat_url.into_iter().find(|url| url.contains("discord")),
    };

    TokenMetadata {
        token_address: key.to_string(),
        name: coin.name,
        symbol: coin.symbol.map(|symbol| symbol.to_uppercase()),
        description: coin.description.and_then(|text| non_empty(text.en)),
        price_usd,
        price_change_24h,
        socials: (!socials.is_empty()).then_some(socials),
        website,
        ..Default::default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn source(&self) -> ProviderSource;

    /// Whether this provider is worth asking about `key` at all
    fn accepts(&self, _key: &str) -> bool {
        true
    }

    /// `Ok(None)` means the provider answered but does not know the key
    async fn lookup(&self, key: &str) -> Result<Option<ProviderRecord>, ApiError>;
}

#[async_trait]
impl MetadataProvider for DexScreenerClient {
    fn source(&self) -> ProviderSource {
        ProviderSource::DexScreener
    }

    /// First pair in DexScreener's order wins; no liquidity/volume ranking
    async fn lookup(&self, key: &str) -> Result<Option<ProviderRecord>, ApiError> {
        let pairs = self.search_pairs(key).await?;
        Ok(pairs
            .into_iter()
            .next()
            .map(|pair| ProviderRecord::DexScreener(Box::new(pair))))
    }
}

#[async_trait]
impl MetadataProvider for JupiterClient {
    fn source(&self) -> ProviderSource {
        ProviderSource::Jupiter
    }

    /// Jupiter only lists Solana mints
    fn accepts(&self, key: &str) -> bool {
        chains::is_base58_address(key)
    }

    async fn lookup(&self, key: &str) -> Result<Option<ProviderRecord>, ApiError> {
        Ok(self.fetch_token(key).await?.map(ProviderRecord::Jupiter))
    }
}

#[async_trait]
impl MetadataProvider for CoinGeckoClient {
    fn source(&self) -> ProviderSource {
        ProviderSource::CoinGecko
    }

    async fn lookup(&self, key: &str) -> Result<Option<ProviderRecord>, ApiError> {
        let coin = match self.fetch_coin(key).await? {
            Some(coin) => coin,
            None => return Ok(None),
        };
        if coin.name.is_none() && coin.symbol.is_none() {
            return Ok(None);
        }
        Ok(Some(ProviderRecord::CoinGecko(Box::new(coin))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(json: &str) -> DexScreenerPair {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_dexscreener_mapping() {
        let record = ProviderRecord::DexScreener(Box::new(pair(
            r#"{
                "chainId": "solana",
                "baseToken": {"address": "DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263", "name": "Bonk", "symbol": "Bonk", "description": "fallback"},
                "priceUsd": "0.00002",
                "priceChange": {"h24": 4.2},
                "info": {
                    "description": "The dog coin of Solana",
                    "websites": [{"url": "https://bonkcoin.com"}],
                    "socials": [
                        {"type": "twitter", "url": "https://x.com/bonk_inu"},
                        {"type": "telegram", "url": "https://t.me/bonk"},
                        {"type": "tiktok", "url": "https://tiktok.com/@bonk"}
                    ]
                }
            }"#,
        )));

        let meta = record.into_metadata("bonk");
        assert_eq!(meta.token_address, "bonk");
        assert_eq!(meta.chain, Some(Chain::Solana));
        assert_eq!(meta.name.as_deref(), Some("Bonk"));
        assert_eq!(meta.currency.as_deref(), Some("Bonk"));
        assert_eq!(
            meta.base_token.as_deref(),
            Some("DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263")
        );
        assert_eq!(meta.description.as_deref(), Some("The dog coin of Solana"));
        assert_eq!(meta.price_usd, Some(0.00002));
        assert_eq!(meta.price_change_24h, Some(4.2));

        let website = meta.website.unwrap();
        assert_eq!(website.url, "https://bonkcoin.com");
        assert_eq!(website.name, "Website");

        let socials = meta.socials.unwrap();
        assert_eq!(socials.twitter.as_deref(), Some("https://x.com/bonk_inu"));
        assert_eq!(socials.telegram.as_deref(), Some("https://t.me/bonk"));
        assert!(socials.discord.is_none());
    }

    #[test]
    fn test_dexscreener_unmapped_chain_and_bare_pair() {
        let meta = ProviderRecord::DexScreener(Box::new(pair(
            r#"{"chainId": "pulsechain", "baseToken": {"address": "0xabc", "symbol": "PLS", "description": "from base"}}"#,
        )))
        .into_metadata("0xabc");

        assert_eq!(meta.chain, None);
        assert_eq!(meta.description.as_deref(), Some("from base"));
        assert!(meta.socials.is_none());
        assert!(meta.website.is_none());
    }

    #[test]
    fn test_jupiter_mapping() {
        let token: JupiterToken = serde_json::from_str(
            r#"{"id": "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", "name": "Jupiter", "symbol": "JUP"}"#,
        )
        .unwrap();
        let meta = ProviderRecord::Jupiter(token).into_metadata("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN");

        assert_eq!(meta.chain, Some(Chain::Solana));
        assert_eq!(meta.currency.as_deref(), Some("JUP"));
        assert_eq!(
            meta.base_token.as_deref(),
            Some("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN")
        );
        assert!(meta.name.is_none());
    }

    #[test]
    fn test_coingecko_mapping() {
        let coin: CoinGeckoCoinDetail = serde_json::from_str(
            r#"{
                "id": "dogecoin",
                "symbol": "doge",
                "name": "Dogecoin",
                "description": {"en": "Much wow"},
                "links": {
                    "homepage": ["https://dogecoin.com", ""],
                    "twitter_screen_name": "dogecoin",
                    "telegram_channel_identifier": "",
                    "chat_url": ["https://forum.example", "https://discord.gg/dogecoin"]
                },
                "market_data": {"current_price": {"usd": 0.12}, "price_change_percentage_24h": -1.5}
            }"#,
        )
        .unwrap();

        let meta = ProviderRecord::CoinGecko(Box::new(coin)).into_metadata("dogecoin");
        assert_eq!(meta.symbol.as_deref(), Some("DOGE"));
        assert_eq!(meta.chain, None);
        assert_eq!(meta.price_usd, Some(0.12));
        assert_eq!(meta.price_change_24h, Some(-1.5));
        assert_eq!(
            meta.website,
            Some(Website {
                url: "https://dogecoin.com".to_string(),
                name: "Dogecoin".to_string(),
            })
        );

        let socials = meta.socials.unwrap();
        assert_eq!(socials.twitter.as_deref(), Some("https://x.com/dogecoin"));
        assert!(socials.telegram.is_none());
        assert_eq!(socials.discord.as_deref(), Some("https://discord.gg/dogecoin"));
    }

    #[test]
    fn test_jupiter_accepts_only_base58() {
        let client = JupiterClient::new(true).unwrap();
        assert!(client.accepts("DezXAZ8z7PinRJjz3wXBoRgixCa6xjnB7YaB1pPB263"));
        assert!(!client.accepts("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!client.accepts("DOGE"));
    }
}
