use std::{fmt, time::Instant};

use serde_json::Value;

/// One of the ordered sources consulted when resolving a configuration key.
///
/// Listed from highest to lowest precedence. A lower source is consulted
/// only when no higher source defines the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Explicit command-line override.
    Flag,
    /// Bound or derived environment variable.
    Environment,
    /// Remote key-value document.
    Remote,
    /// Local configuration file.
    File,
    /// Compiled-in default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Flag => "flag",
            Source::Environment => "environment",
            Source::Remote => "remote",
            Source::File => "file",
            Source::Default => "default",
        };
        f.write_str(name)
    }
}

/// Represents a configuration change with key-based identification.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigChange {
    /// Dotted key of the changed value (e.g., "app.port").
    pub key: String,
    /// The previous value, if one was defined at the changed layer.
    pub old_value: Option<Value>,
    /// The new value. Null when the key was removed from the layer.
    pub new_value: Value,
    /// The layer that produced the change.
    pub source: Source,
    /// Timestamp when the change occurred.
    pub timestamp: Instant,
}

impl ConfigChange {
    /// Creates a new configuration change.
    pub fn new(key: String, old_value: Option<Value>, new_value: Value, source: Source) -> Self {
        Self {
            key,
            old_value,
            new_value,
            source,
            timestamp: Instant::now(),
        }
    }

    /// Attempts to read the new value as a string.
    ///
    /// Returns `None` if the value is not a string.
    pub fn as_string(&self) -> Option<String> {
        match &self.new_value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}
