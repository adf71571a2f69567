use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    YamlParse(String),

    #[error("failed to decode '{key}': {details}")]
    Decode { key: String, details: String },

    #[error("remote config error: {0}")]
    Remote(String),

    #[error("file watch error: {0}")]
    Watch(String),
}

pub type Result<T> = std::result::Result<T, StrataError>;

impl StrataError {
    pub fn yaml_parse(error: impl std::fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        StrataError::YamlParse(format!(
            "Failed to parse YAML at {:?}: {}",
            clean_path, error
        ))
    }

    pub fn decode(key: &str, error: impl std::fmt::Display) -> Self {
        StrataError::Decode {
            key: key.to_string(),
            details: error.to_string(),
        }
    }

    pub fn remote(error: impl std::fmt::Display, url: &str) -> Self {
        StrataError::Remote(format!("{url}: {error}"))
    }

    pub fn watch(error: impl std::fmt::Display) -> Self {
        StrataError::Watch(error.to_string())
    }
}
