/// Per-chain service preferences
///
/// Each chain maps to an *ordered* list of `service -> enabled` toggles. The
/// order is the display order of the generated links. A service missing from
/// the list counts as enabled, and a chain missing from the map uses
/// [`default_for_chain`].
///
/// TOML form:
///
/// ```toml
/// [links.preferences.solana]
/// pumpfun = true
/// dexscreener = true
/// gmgn = false
/// ```
use super::{services_for_chain, ServiceId};
use crate::chains::Chain;
use crate::logger::{self, LogTag};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// CHAIN PREFERENCES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainPreferences(Vec<(ServiceId, bool)>);

impl ChainPreferences {
    pub fn new(entries: Vec<(ServiceId, bool)>) -> Self {
        let mut prefs = Self::default();
        for (id, enabled) in entries {
            prefs.set(id, enabled);
        }
        prefs
    }

    pub fn entries(&self) -> &[(ServiceId, bool)] {
        &self.0
    }

    /// Explicit toggle for `id`, if any
    pub fn get(&self, id: ServiceId) -> Option<bool> {
        self.0
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, enabled)| *enabled)
    }

    /// Absent entries count as enabled
    pub fn is_enabled(&self, id: ServiceId) -> bool {
        self.get(id).unwrap_or(true)
    }

    /// Update in place, or append when the service is not listed yet
    pub fn set(&mut self, id: ServiceId, enabled: bool) {
        match self.0.iter_mut().find(|(entry, _)| *entry == id) {
            Some(entry) => entry.1 = enabled,
            None => self.0.push((id, enabled)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ChainPreferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, enabled) in &self.0 {
            map.serialize_entry(id.as_str(), enabled)?;
        }
        map.end()
    }
}

struct ChainPreferencesVisitor;

impl<'de> Visitor<'de> for ChainPreferencesVisitor {
    type Value = ChainPreferences;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of service id to bool")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut prefs = ChainPreferences::default();
        while let Some((key, enabled)) = access.next_entry::<String, bool>()? {
            match key.parse::<ServiceId>() {
                Ok(id) => prefs.set(id, enabled),
                Err(e) => logger::warning(LogTag::Config, &format!("{}; preference ignored", e)),
            }
        }
        Ok(prefs)
    }
}

impl<'de> Deserialize<'de> for ChainPreferences {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ChainPreferencesVisitor)
    }
}

/// Every service supporting `chain` except its block explorers, all enabled,
/// in registry order
pub fn default_for_chain(chain: Chain) -> ChainPreferences {
    let explorers = chain.explorers();
    ChainPreferences(
        services_for_chain(chain)
            .filter(|id| !explorers.contains(id))
            .map(|id| (id, true))
            .collect(),
    )
}

// ============================================================================
// SERVICE PREFERENCES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicePreferences(BTreeMap<Chain, ChainPreferences>);

impl ServicePreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chain: Chain) -> Option<&ChainPreferences> {
        self.0.get(&chain)
    }

    pub fn set(&mut self, chain: Chain, prefs: ChainPreferences) {
        self.0.insert(chain, prefs);
    }

    /// Toggle one service for one chain
    pub fn set_enabled(&mut self, chain: Chain, id: ServiceId, enabled: bool) {
        self.0.entry(chain).or_default().set(id, enabled);
    }

    /// Services to consider for `chain`, in display order
    ///
    /// Explicit entries come first (enabled and supporting the chain), followed
    /// by the default services the explicit list never mentions.
    pub fn candidates(&self, chain: Chain) -> Vec<ServiceId> {
        let defaults = default_for_chain(chain);
        let explicit = match self.0.get(&chain) {
            Some(prefs) if !prefs.is_empty() => prefs,
            _ => return defaults.entries().iter().map(|(id, _)| *id).collect(),
        };

        let mut candidates: Vec<ServiceId> = explicit
            .entries()
            .iter()
            .filter(|(id, enabled)| *enabled && id.descriptor().supports(chain))
            .map(|(id, _)| *id)
            .collect();

        candidates.extend(
            defaults
                .entries()
                .iter()
                .map(|(id, _)| *id)
                .filter(|id| explicit.get(*id).is_none()),
        );

        candidates
    }
}
