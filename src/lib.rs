//! tokenscope - turn pasted addresses, explorer URLs and cashtags into chain
//! identities, token metadata and outbound service links.
//!
//! Flow: raw input -> [`classifier`] -> [`tokens::TokenResolver`] -> [`links`].

pub mod apis;
pub mod cache;
pub mod chains;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod links;
pub mod logger;
pub mod services;
pub mod tokens;

pub use chains::Chain;
pub use classifier::{classify, detect_chain_from_regex, format_address, AddressIdentity, MatchKind};
pub use links::ServiceLink;
pub use tokens::{AddressAnalyzer, TokenMetadata, TokenResolver};
