use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Complete configuration schema for the demo daemon.
///
/// Every field has a sensible default, so partial documents deserialize
/// cleanly and absent keys fall through to the Default layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Human-readable name of the loaded configuration.
    #[serde(default)]
    pub config_name: String,

    /// Version string of the loaded configuration.
    #[serde(default)]
    pub config_version: String,

    /// Application settings.
    #[serde(default)]
    pub app: AppSettings,

    /// Logging settings.
    #[serde(default)]
    pub log: LogSettings,

    /// Known repositories, purely passive data that is read and printed.
    #[serde(default)]
    pub repository: Vec<RepositoryEntry>,

    /// Database name to enabled-flag mapping.
    #[serde(default)]
    pub databases: BTreeMap<String, bool>,
}

/// Application identity and listen port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Application name.
    #[serde(default)]
    pub name: String,

    /// Application port.
    #[serde(default)]
    pub port: u16,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "strata".to_string(),
            port: 8080,
        }
    }
}

/// Logging level, format, and destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Logging level (e.g., "debug", "info", "warn", "error").
    #[serde(default)]
    pub level: String,

    /// Log output format (e.g., "text", "json").
    #[serde(default)]
    pub format: String,

    /// Log destination (e.g., "stdout").
    #[serde(default)]
    pub output: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            output: "stdout".to_string(),
        }
    }
}

/// A named repository entry under the `repository` key.
///
/// Decoded with `ConfigResolver::get_as`, which reports a descriptive
/// error when the source data does not match this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RepositoryEntry {
    /// Repository name.
    pub name: String,

    /// Database dialect used by the repository.
    pub dialector: String,

    /// Connection URL.
    pub url: String,
}
