/// Filtering rules and dispatch
use super::config::{
    get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag, LoggerConfig,
};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// 1. Errors are always shown
/// 2. Anything below the minimum level threshold is dropped
/// 3. Debug requires debug mode for the tag
/// 4. Verbose requires global verbose or verbose mode for the tag
/// 5. A non-empty enabled-tags set restricts output to those tags
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(config, tag);
    }

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose || is_verbose_enabled_for_tag(config, tag);
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    true
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(&config, &tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_always_pass() {
        let config = LoggerConfig {
            min_level: LogLevel::Error,
            ..Default::default()
        };
        assert!(should_log(&config, &LogTag::Api, LogLevel::Error));
        assert!(!should_log(&config, &LogTag::Api, LogLevel::Warning));
    }

    #[test]
    fn test_debug_needs_tag_flag() {
        let config = LoggerConfig::from_flags(&["api".to_string()], false, false);
        assert!(should_log(&config, &LogTag::Api, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Resolver, LogLevel::Debug));
        assert!(should_log(&config, &LogTag::Resolver, LogLevel::Info));
    }

    #[test]
    fn test_verbose_gate() {
        let config = LoggerConfig::default();
        assert!(!should_log(&config, &LogTag::Api, LogLevel::Verbose));

        let verbose = LoggerConfig::from_flags(&[], true, false);
        assert!(should_log(&verbose, &LogTag::Api, LogLevel::Verbose));
    }

    #[test]
    fn test_enabled_tags_filter() {
        let mut config = LoggerConfig::default();
        config.enabled_tags.insert("links".to_string());
        assert!(should_log(&config, &LogTag::Links, LogLevel::Info));
        assert!(!should_log(&config, &LogTag::Cache, LogLevel::Info));
        assert!(should_log(&config, &LogTag::Cache, LogLevel::Error));
    }
}
