/// Configuration system
///
/// - `macros`: the `config_struct!` macro (struct + defaults in one declaration)
/// - `schemas`: every configuration section
/// - `utils`: loading, reloading, saving and the global accessor
///
/// ```no_run
/// use tokenscope::config::{default_config_path, load_config_from_path, with_config};
///
/// load_config_from_path(&default_config_path()).expect("config");
/// let enabled = with_config(|cfg| cfg.providers.coingecko.enabled);
/// ```
#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::*;
