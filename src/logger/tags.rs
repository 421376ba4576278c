/// Subsystem tags attached to every log line
use colored::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Classifier,
    Resolver,
    Api,
    Cache,
    Links,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug <key>` and the enabled-tags filter
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Classifier => "classifier".to_string(),
            LogTag::Resolver => "resolver".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Cache => "cache".to_string(),
            LogTag::Links => "links".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Upper-case label used in file output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(name) => name.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }

    pub(crate) fn colorize(&self, padded: String) -> ColoredString {
        match self {
            LogTag::System => padded.bright_yellow().bold(),
            LogTag::Config => padded.bright_white().bold(),
            LogTag::Classifier => padded.bright_blue().bold(),
            LogTag::Resolver => padded.bright_green().bold(),
            LogTag::Api => padded.bright_purple().bold(),
            LogTag::Cache => padded.bright_cyan().bold(),
            LogTag::Links => padded.bright_magenta().bold(),
            LogTag::Other(_) => padded.white().bold(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
