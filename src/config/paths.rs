use std::path::PathBuf;

/// Utility struct for locating configuration files.
///
/// The daemon reads its configuration from a fixed path relative to the
/// working directory, so deployments place the file next to the binary.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the directory holding the local configuration file.
    pub fn config_dir() -> PathBuf {
        PathBuf::from("etc")
    }

    /// Returns the path to the main configuration file.
    pub fn main_config() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}
