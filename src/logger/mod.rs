//! Structured, tag-based logging for tokenscope
//!
//! Every log line carries a [`LogTag`] naming the subsystem (classifier, resolver,
//! provider clients, cache, link generation) and a [`LogLevel`].
//!
//! ## Usage
//!
//! ```rust
//! use tokenscope::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "DexScreener unreachable");
//! logger::warning(LogTag::Resolver, "CoinGecko returned malformed body");
//! logger::info(LogTag::System, "tokenscope starting");
//! logger::debug(LogTag::Classifier, "matched gmgn URL pattern"); // only with --debug classifier
//! logger::verbose(LogTag::Api, "raw response: ..."); // only with --verbose
//! ```
//!
//! ## Initialization
//!
//! The binary builds a [`LoggerConfig`] from its flags and the `[logging]` config
//! table, then calls [`init`]. Library users that never call `init` get the default
//! configuration (info and above, console only).

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Install the logger configuration and open the optional log file
pub fn init(config: LoggerConfig) {
    let file_path = config.file_path.clone();
    set_logger_config(config);

    if let Some(path) = file_path {
        file::init_file_logging(&path);
    }
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when debug mode is enabled for the tag (`--debug <tag>`).
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level
///
/// Only shown with `--verbose`.
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending file writes
pub fn flush() {
    file::flush_file_logging();
}
