/// Logger configuration held in a process-wide slot
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Anything less severe than this is dropped (Debug/Verbose have extra gates)
    pub min_level: LogLevel,
    /// Tags with debug output enabled (`--debug <tag>`); "all" enables every tag
    pub debug_tags: HashSet<String>,
    /// Tags with verbose output enabled
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags are shown (errors excepted)
    pub enabled_tags: HashSet<String>,
    /// Console colors
    pub colored: bool,
    /// Optional plain-text log file
    pub file_path: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            colored: true,
            file_path: None,
        }
    }
}

impl LoggerConfig {
    /// Build from the CLI switches the binary exposes
    pub fn from_flags(debug: &[String], verbose: bool, quiet: bool) -> Self {
        let mut config = Self::default();
        config.debug_tags = debug.iter().map(|t| t.trim().to_lowercase()).collect();

        if !config.debug_tags.is_empty() {
            config.min_level = LogLevel::Debug;
        }
        if verbose {
            config.min_level = LogLevel::Verbose;
        }
        if quiet {
            config.min_level = LogLevel::Error;
        }
        config
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

pub(crate) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains("all") || config.debug_tags.contains(&tag.to_debug_key())
}

pub(crate) fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_tags.contains("all") || config.verbose_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        let config = LoggerConfig::from_flags(&["Resolver".to_string()], false, false);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Resolver));
        assert!(!is_debug_enabled_for_tag(&config, &LogTag::Api));

        let quiet = LoggerConfig::from_flags(&[], true, true);
        assert_eq!(quiet.min_level, LogLevel::Error);
    }

    #[test]
    fn test_all_tag_enables_everything() {
        let config = LoggerConfig::from_flags(&["all".to_string()], false, false);
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Cache));
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Other("x".to_string())));
    }
}
