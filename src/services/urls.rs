/// Link builders, one per service
use super::ServiceId;
use crate::chains::Chain;
use crate::tokens::types::TokenMetadata;

/// Everything a link builder may read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlParams {
    pub chain: Option<Chain>,
    pub token_address: String,
    pub base_token: Option<String>,
    pub currency: Option<String>,
    pub currency_id: Option<String>,
    pub issuer: Option<String>,
}

impl UrlParams {
    pub fn new(chain: Option<Chain>, token_address: impl Into<String>) -> Self {
        Self {
            chain,
            token_address: token_address.into(),
            ..Default::default()
        }
    }

    pub fn from_metadata(metadata: &TokenMetadata) -> Self {
        Self {
            chain: metadata.chain,
            token_address: metadata.token_address.clone(),
            base_token: metadata.base_token.clone(),
            currency: metadata.currency.clone(),
            currency_id: metadata.currency_id.clone(),
            issuer: metadata.issuer.clone(),
        }
    }

    /// Placeholder identity used to discover each service's host
    pub(crate) fn sample() -> Self {
        Self {
            chain: Some(Chain::Ethereum),
            token_address: "example".to_string(),
            base_token: Some("example".to_string()),
            ..Default::default()
        }
    }

    /// The address links point at: the resolved base token, else the raw address
    pub fn target(&self) -> &str {
        self.base_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .unwrap_or(&self.token_address)
    }

    /// `<currency_id>.<issuer>` pair when both ledger fields are known
    fn ledger_pair(&self) -> Option<(&str, &str)> {
        match (self.currency_id.as_deref(), self.issuer.as_deref()) {
            (Some(currency_id), Some(issuer)) if !currency_id.is_empty() && !issuer.is_empty() => {
                Some((currency_id, issuer))
            }
            _ => None,
        }
    }

    fn currency_pair(&self) -> Option<(&str, &str)> {
        match (self.currency.as_deref(), self.issuer.as_deref()) {
            (Some(currency), Some(issuer)) if !currency.is_empty() && !issuer.is_empty() => {
                Some((currency, issuer))
            }
            _ => None,
        }
    }
}

/// Build the outbound link for `id`, or `None` when the identity lacks what
/// the service needs (chain, base token, ...)
pub fn build_url(id: ServiceId, params: &UrlParams) -> Option<String> {
    let target = params.target();
    if target.is_empty() {
        return None;
    }

    let url = match id {
        ServiceId::Dextools => {
            let chain = params.chain?;
            match params.ledger_pair() {
                Some((currency_id, issuer)) if chain == Chain::Xrpl => format!(
                    "https://www.dextools.io/app/en/xrpl/pair-explorer/{}.{}_XRP",
                    currency_id, issuer
                ),
                _ => format!(
                    "https://www.dextools.io/app/en/{}/pair-explorer/{}",
                    chain.primary_path(),
                    target
                ),
            }
        }
        ServiceId::Dexscreener => {
            let chain = params.chain?;
            match params.ledger_pair() {
                Some((currency_id, issuer)) if chain == Chain::Xrpl => format!(
                    "https://dexscreener.com/xrpl/{}.{}_xrp",
                    currency_id, issuer
                ),
                _ => format!("https://dexscreener.com/{}/{}", chain.as_str(), target),
            }
        }
        ServiceId::Honeypot => format!(
            "https://honeypot.is/{}?address={}",
            params.chain?.as_str(),
            target
        ),
        ServiceId::Trenchradar => format!("https://trench.bot/bundles/{}", target),
        ServiceId::Etherscan => format!("https://etherscan.io/address/{}", target),
        ServiceId::Bscscan => format!("https://bscscan.com/address/{}", target),
        ServiceId::Polygonscan => format!("https://polygonscan.com/address/{}", target),
        ServiceId::Arbiscan => format!("https://arbiscan.io/address/{}", target),
        ServiceId::Solscan => format!("https://solscan.io/token/{}", target),
        ServiceId::Birdeye => format!(
            "https://birdeye.so/token/{}?chain={}",
            target,
            params.chain?.as_str()
        ),
        ServiceId::Solanabeach => format!("https://solanabeach.io/address/{}", target),
        ServiceId::Xrpscan => format!("https://xrpscan.com/account/{}", target),
        ServiceId::Bithomp => format!("https://bithomp.com/explorer/{}", target),
        ServiceId::Gmgn => format!(
            "https://gmgn.ai/{}/token/{}",
            params.chain?.primary_path(),
            target
        ),
        ServiceId::Xpmarket => match params.currency_pair() {
            Some((currency, issuer)) => {
                format!("https://xpmarket.com/dex/{}-{}/XRP", currency, issuer)
            }
            None => format!("https://xpmarket.com/dex/{}/XRP", target),
        },
        ServiceId::Xmagnetic => match params.currency_pair() {
            Some((currency, issuer)) => format!(
                "https://xmagnetic.org/dex/{}+{}?network=mainnet",
                currency, issuer
            ),
            None => format!("https://xmagnetic.org/dex/{}?network=mainnet", target),
        },
        ServiceId::Pumpfun => format!("https://pump.fun/coin/{}", target),
        ServiceId::Bullx => format!(
            "https://bullx.io/terminal?chainId={}&address={}",
            params.chain?.numeric_id(),
            target
        ),
        ServiceId::Bullxneo => format!(
            "https://neo.bullx.io/terminal?chainId={}&address={}",
            params.chain?.numeric_id(),
            target
        ),
        ServiceId::Snowtrace => format!("https://snowtrace.io/address/{}", target),
        ServiceId::Blastscan => format!("https://blastscan.io/address/{}", target),
        ServiceId::Optimismscan => format!("https://optimistic.etherscan.io/address/{}", target),
        ServiceId::Zkscan => format!("https://explorer.zksync.io/address/{}", target),
        ServiceId::Oklink => format!("https://www.oklink.com/arbitrum/address/{}", target),
        ServiceId::Basescan => format!("https://basescan.org/address/{}", target),
        ServiceId::Basescout => format!("https://basescout.com/address/{}", target),
        ServiceId::Solanaexplorer => format!("https://explorer.solana.com/address/{}", target),
        ServiceId::Suiexplorer => format!("https://suiexplorer.com/address/{}", target),
        ServiceId::Tronscan => format!("https://tronscan.org/#/address/{}", target),
        ServiceId::Zkscout => format!("https://zkscout.com/address/{}", target),
        ServiceId::Ethplorer => format!("https://ethplorer.io/address/{}", target),
        ServiceId::Bsctrace => format!("https://bsctrace.com/address/{}", target),
        ServiceId::Polygontrace => format!("https://polygontrace.com/address/{}", target),
        ServiceId::Solanacompass => format!("https://solanacompass.com/address/{}", target),
        ServiceId::Xrpledgerexplorer => format!("https://livenet.xrpl.org/accounts/{}", target),
        ServiceId::Xrplpm => format!("https://xrpl.pm/account/{}", target),
        ServiceId::Photon => format!("https://photon.tinyastro.io/en/lp/{}", target),
        ServiceId::PhotonSol => format!("https://photon-sol.tinyastro.io/en/lp/{}", target),
        ServiceId::AntiRugAgent => format!("https://antirugagent.com/ca/{}", target),
        ServiceId::Coingecko => format!(
            "https://www.coingecko.com/en/coins/{}/{}",
            params.chain?.as_str(),
            non_empty(params.base_token.as_deref())?
        ),
        ServiceId::Coinmarketcap => format!(
            "https://coinmarketcap.com/currencies/{}/{}",
            params.chain?.as_str(),
            non_empty(params.base_token.as_deref())?
        ),
    };

    Some(url)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
