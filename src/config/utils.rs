/// Configuration utilities - loading, reloading, and access helpers
use super::schemas::{Config, LinksConfig, LoggingConfig, ProvidersConfig, ResolverConfig};
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// Global configuration instance
///
/// Set once by [`load_config_from_path`]; readers that run before that see defaults.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Name of the config file inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `<platform config dir>/tokenscope/config.toml`, or `./config.toml` when the
/// platform has no config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("tokenscope").join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Parse and validate TOML contents
///
/// Unknown sections and keys are reported as warnings and otherwise ignored.
pub fn parse_config(contents: &str, path: &str) -> Result<Config, ConfigError> {
    let config = toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;

    if let Ok(raw) = contents.parse::<toml::Table>() {
        for key in unknown_keys(&raw) {
            logger::warning(
                LogTag::Config,
                &format!("Unknown config key '{}' in '{}' ignored", key, path),
            );
        }
    }

    config.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_string(),
        message,
    })?;

    Ok(config)
}

fn unknown_keys(raw: &toml::Table) -> Vec<String> {
    let mut unknown = Vec::new();

    for (section, value) in raw {
        let fields: &[&str] = match section.as_str() {
            "logging" => LoggingConfig::FIELDS,
            "resolver" => ResolverConfig::FIELDS,
            "providers" => ProvidersConfig::FIELDS,
            "links" => LinksConfig::FIELDS,
            _ => {
                unknown.push(section.clone());
                continue;
            }
        };

        if let Some(table) = value.as_table() {
            for key in table.keys() {
                if !fields.contains(&key.as_str()) {
                    unknown.push(format!("{}.{}", section, key));
                }
            }
        }
    }

    unknown
}

/// Load configuration from a file and initialize the global CONFIG
///
/// A missing file is not an error: defaults are used and a warning is logged.
pub fn load_config_from_path(path: &Path) -> Result<(), ConfigError> {
    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Read a config file without touching the global slot
pub fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let display = path.display().to_string();

    if !path.exists() {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", display),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;

    let config = parse_config(&contents, &display)?;
    logger::debug(
        LogTag::Config,
        &format!("Loaded configuration from '{}'", display),
    );
    Ok(config)
}

/// Execute a function with read access to the configuration
///
/// Before initialization the closure sees `Config::default()`.
///
/// # Example
/// ```
/// use tokenscope::config::with_config;
///
/// let ttl = with_config(|cfg| cfg.resolver.resolution_cache_ttl_secs);
/// assert!(ttl > 0);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => f(&lock.read()),
        None => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration (for holding across await points)
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Write `config` as pretty TOML, creating parent directories
pub fn write_config_file(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let display = path.display().to_string();
    let contents = toml::to_string_pretty(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: display.clone(),
                source,
            })?;
        }
    }

    std::fs::write(path, contents).map_err(|source| ConfigError::Write {
        path: display,
        source,
    })
}

/// Save the current global configuration to disk
pub fn save_config(path: &Path) -> Result<(), ConfigError> {
    let config = get_config_clone();
    write_config_file(&config, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::Chain;
    use crate::services::ServiceId;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("", "inline").unwrap();
        assert_eq!(config.resolver.resolution_cache_ttl_secs, 300);
        assert_eq!(config.resolver.api_cache_ttl_secs, 14_400);
        assert!(config.providers.dexscreener.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [resolver]
            resolution_cache_ttl_secs = 60

            [providers.jupiter]
            enabled = false
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.resolver.resolution_cache_ttl_secs, 60);
        assert_eq!(config.resolver.api_cache_ttl_secs, 14_400);
        assert!(!config.providers.jupiter.enabled);
        assert!(config.providers.coingecko.enabled);
        assert_eq!(config.providers.jupiter.timeout_secs, 10);
    }

    #[test]
    fn test_preferred_explorer_must_belong_to_chain() {
        let ok = parse_config(
            r#"
            [links.preferred_explorers]
            solana = "solanabeach"
            "#,
            "inline",
        )
        .unwrap();
        assert_eq!(
            ok.links.preferred_explorers.get(&Chain::Solana),
            Some(&ServiceId::Solanabeach)
        );

        let err = parse_config(
            r#"
            [links.preferred_explorers]
            solana = "etherscan"
            "#,
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_bad_level_rejected() {
        let err = parse_config("[logging]\nlevel = \"shouty\"\n", "inline").unwrap_err();
        assert!(err.to_string().contains("shouty"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[resolver\n", "broken.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_unknown_keys_listed() {
        let raw: toml::Table = "[resolver]\nttl = 5\n[extra]\nx = 1\n".parse().unwrap();
        let mut keys = unknown_keys(&raw);
        keys.sort();
        assert_eq!(keys, vec!["extra".to_string(), "resolver.ttl".to_string()]);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.resolver.resolution_cache_ttl_secs = 42;
        config
            .links
            .preferred_explorers
            .insert(Chain::Ethereum, ServiceId::Ethplorer);
        write_config_file(&config, &path).unwrap();

        let loaded = read_config_file(&path).unwrap();
        assert_eq!(loaded.resolver.resolution_cache_ttl_secs, 42);
        assert_eq!(
            loaded.links.preferred_explorers.get(&Chain::Ethereum),
            Some(&ServiceId::Ethplorer)
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.resolver.resolution_cache_ttl_secs, 300);
    }

    #[test]
    fn test_with_config_before_init_sees_defaults() {
        let level = with_config(|cfg| cfg.logging.level.clone());
        assert!(!level.is_empty());
    }
}
