/// Token metadata resolution
///
/// - `types`: normalized [`TokenMetadata`]
/// - `provider`: provider trait and per-provider record mapping
/// - `resolver`: cache-first fallback chain
/// - `analysis`: request-token guarded classify + resolve session
pub mod analysis;
pub mod provider;
pub mod resolver;
pub mod types;

pub use analysis::{AddressAnalyzer, Analysis, AnalysisStatus};
pub use provider::{MetadataProvider, ProviderRecord, ProviderSource};
pub use resolver::TokenResolver;
pub use types::{Socials, TokenMetadata, Website};
