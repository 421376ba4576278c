/// Address analysis session
///
/// Ties classification and resolution together for a caller that re-submits
/// input as the user types. Each call takes a request token; a result is only
/// applied (and returned) if no newer call started while it was resolving.
/// In-flight lookups are never cancelled, only discarded.
use super::resolver::TokenResolver;
use super::types::TokenMetadata;
use crate::classifier::{classify, detect_chain_from_regex, AddressIdentity, MatchKind};
use crate::logger::{self, LogTag};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Loading,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub input: String,
    pub identity: AddressIdentity,
    pub metadata: Option<TokenMetadata>,
    pub status: AnalysisStatus,
}

impl Analysis {
    fn idle() -> Self {
        Self {
            input: String::new(),
            identity: classify(""),
            metadata: None,
            status: AnalysisStatus::Idle,
        }
    }
}

pub struct AddressAnalyzer {
    resolver: Arc<TokenResolver>,
    latest: AtomicU64,
    state: Mutex<Analysis>,
}

impl AddressAnalyzer {
    pub fn new(resolver: Arc<TokenResolver>) -> Self {
        Self {
            resolver,
            latest: AtomicU64::new(0),
            state: Mutex::new(Analysis::idle()),
        }
    }

    pub fn resolver(&self) -> &Arc<TokenResolver> {
        &self.resolver
    }

    /// Last applied analysis
    pub fn current(&self) -> Analysis {
        self.state.lock().clone()
    }

    /// Analyze `input`; `None` when a newer call superseded this one
    pub async fn analyze(&self, input: &str) -> Option<Analysis> {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let trimmed = input.trim();

        if trimmed.is_empty() {
            let idle = Analysis::idle();
            *self.state.lock() = idle.clone();
            return Some(idle);
        }

        let identity = classify(trimmed);
        if !self.apply(
            token,
            Analysis {
                input: trimmed.to_string(),
                identity: identity.clone(),
                metadata: None,
                status: AnalysisStatus::Loading,
            },
        ) {
            return None;
        }

        let key = if identity.address.is_empty() {
            trimmed.to_string()
        } else {
            identity.address.clone()
        };
        let mut metadata = self.resolver.resolve(&key).await;

        if self.latest.load(Ordering::SeqCst) != token {
            logger::debug(
                LogTag::Resolver,
                &format!("Discarding stale result for '{}'", trimmed),
            );
            return None;
        }

        if metadata.chain.is_none() {
            metadata.chain = identity.chain.or_else(|| detect_chain_from_regex(&key));
        }
        if metadata.issuer.is_none() {
            metadata.issuer = identity.issuer.clone();
        }
        if metadata.currency_id.is_none() {
            metadata.currency_id = identity.currency_id.clone();
        }
        if metadata.currency.is_none() {
            metadata.currency = identity.currency.clone();
        }

        let status = if metadata.has_identity() {
            AnalysisStatus::Valid
        } else {
            AnalysisStatus::Invalid
        };
        if status == AnalysisStatus::Invalid && identity.kind == MatchKind::Unrecognized {
            logger::debug(
                LogTag::Classifier,
                &format!("'{}' is not an address, URL or cashtag", trimmed),
            );
        }

        let analysis = Analysis {
            input: trimmed.to_string(),
            identity,
            metadata: Some(metadata),
            status,
        };
        if self.apply(token, analysis.clone()) {
            Some(analysis)
        } else {
            None
        }
    }

    /// Store `analysis` unless a newer token has been issued
    fn apply(&self, token: u64, analysis: Analysis) -> bool {
        let mut state = self.state.lock();
        if self.latest.load(Ordering::SeqCst) != token {
            return false;
        }
        *state = analysis;
        true
    }
}
