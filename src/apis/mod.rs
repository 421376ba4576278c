/// External API clients
///
/// One module per provider, each with its raw response `types`, plus the shared
/// HTTP plumbing (`client`), request statistics (`stats`) and the `manager` that
/// wires them from configuration.
pub mod client;
pub mod coingecko;
pub mod coinmarketcap;
pub mod dexscreener;
pub mod jupiter;
pub mod manager;
pub mod stats;

pub use client::{CachedFetcher, HttpClient};
pub use manager::{ApiManager, ApiManagerStats};
pub use stats::{ApiStats, ApiStatsTracker};
