use std::{collections::HashMap, env};

/// Environment-variable bindings for configuration keys.
///
/// Dotted keys derive variable names by upper-casing and replacing dots
/// with underscores under a fixed prefix: with prefix `STRATA` the key
/// `app.port` reads `STRATA_APP_PORT`. Explicit binds override the derived
/// name for individual keys. Lookups read the live process environment on
/// every call, so changes made after startup are observed.
#[derive(Debug, Clone)]
pub struct EnvBindings {
    prefix: String,
    explicit: HashMap<String, String>,
}

impl EnvBindings {
    /// Creates bindings with the given prefix. The prefix is upper-cased.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().to_ascii_uppercase(),
            explicit: HashMap::new(),
        }
    }

    /// Binds a key to an explicit variable name, bypassing the derivation.
    #[must_use]
    pub fn bind(mut self, key: &str, var: &str) -> Self {
        self.explicit
            .insert(key.to_ascii_lowercase(), var.to_string());
        self
    }

    /// Returns the environment variable name consulted for a key.
    pub fn var_name(&self, key: &str) -> String {
        let key = key.to_ascii_lowercase();
        if let Some(var) = self.explicit.get(&key) {
            return var.clone();
        }

        format!(
            "{}_{}",
            self.prefix,
            key.to_ascii_uppercase().replace('.', "_")
        )
    }

    /// Reads the value bound to a key, if the variable is currently set.
    pub fn lookup(&self, key: &str) -> Option<String> {
        env::var(self.var_name(key)).ok()
    }
}
