use std::{
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    config::{ConfigPaths, Settings},
    core::{Result, StrataError},
    remote::RemoteSource,
};

use super::{ConfigChange, EnvBindings, Source, diff, path_ops::navigate};

/// The documents backing each merged layer.
///
/// Overrides are stored flat under lowercased dotted keys; the other
/// layers are nested documents navigated per lookup. The environment
/// layer has no document, it is read live from the process environment.
struct Layers {
    overrides: Map<String, Value>,
    remote: Option<Value>,
    file: Value,
    defaults: Value,
}

/// A thread-safe configuration handle merging five precedence layers.
///
/// Resolution order per key: explicit override (flag), bound environment
/// variable, remote document, local file, compiled-in default. Exactly one
/// resolved value is observable per key at read time. The handle is cheap
/// to clone and safe to share across tasks; there is no snapshot isolation
/// across keys.
#[derive(Clone)]
pub struct ConfigResolver {
    layers: Arc<RwLock<Layers>>,
    env: EnvBindings,
    remote: Option<RemoteSource>,
    file_path: PathBuf,

    change_sender: broadcast::Sender<ConfigChange>,
}

impl ConfigResolver {
    /// Creates a resolver over an in-memory file document.
    ///
    /// No remote source is registered and the file path defaults to the
    /// main configuration location; [`ConfigResolver::load`] is the
    /// file-backed constructor.
    pub fn from_document(file: Value, env: EnvBindings) -> Self {
        let defaults = serde_json::to_value(Settings::default()).unwrap_or(Value::Null);
        let (change_sender, _) = broadcast::channel(1000);

        Self {
            layers: Arc::new(RwLock::new(Layers {
                overrides: Map::new(),
                remote: None,
                file,
                defaults,
            })),
            env,
            remote: None,
            file_path: ConfigPaths::main_config(),
            change_sender,
        }
    }

    /// Loads a resolver from the local configuration file and performs the
    /// initial remote fetch when a remote source is given.
    ///
    /// A missing or malformed local file is fatal. An unreachable remote
    /// source is logged as a warning and leaves the remote layer empty;
    /// remote keys stay unresolved until a later refresh succeeds.
    ///
    /// # Errors
    /// Returns error if the local file cannot be read or parsed.
    pub async fn load(
        path: impl Into<PathBuf>,
        env: EnvBindings,
        remote: Option<RemoteSource>,
    ) -> Result<Self> {
        let path = path.into();
        let file = parse_file(&path)?;

        let mut resolver = Self::from_document(file, env);
        resolver.file_path = path;

        if let Some(remote) = remote {
            match remote.fetch().await {
                Ok(doc) => {
                    info!("remote config loaded from {}", remote.url());
                    resolver.write_layers(|layers| layers.remote = Some(doc));
                }
                Err(e) => warn!("unable to read remote config: {e}"),
            }
            resolver.remote = Some(remote);
        }

        Ok(resolver)
    }

    /// Returns the resolved value for a key, consulting layers in
    /// precedence order. Keys are matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<Value> {
        let key = key.to_ascii_lowercase();

        if let Some(value) = self.read_layers(|layers| layers.overrides.get(&key).cloned()) {
            return Some(value);
        }

        if let Some(raw) = self.env.lookup(&key) {
            return Some(Value::String(raw));
        }

        if let Some(value) = self.read_layers(|layers| {
            layers.remote.as_ref().and_then(|doc| navigate(doc, &key))
        }) {
            return Some(value);
        }

        if let Some(value) = self.read_layers(|layers| navigate(&layers.file, &key)) {
            return Some(value);
        }

        self.read_layers(|layers| navigate(&layers.defaults, &key))
    }

    /// Returns the resolved value as a string, or an empty string when the
    /// key is undefined everywhere. Scalars are stringified.
    pub fn get_string(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s,
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Returns the resolved value as an integer, or 0 when the key is
    /// undefined or not numeric. String values are parsed, so environment
    /// overrides of numeric keys resolve as numbers.
    pub fn get_i64(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Returns the resolved value as a boolean, or false when the key is
    /// undefined or not boolean-like.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "t" | "true" | "True" | "TRUE"),
            _ => false,
        }
    }

    /// Deserializes the resolved value for a key into a typed structure.
    ///
    /// # Errors
    /// Returns `StrataError::Decode` naming the key when the resolved
    /// value does not match the requested shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get(key).unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| StrataError::decode(key, e))
    }

    /// Installs a highest-precedence override for a key and broadcasts the
    /// change to subscribers. Used for command-line flag values.
    pub fn set_override(&self, key: &str, value: Value) {
        let key = key.to_ascii_lowercase();
        let old_value = self.get(&key);

        self.write_layers(|layers| {
            layers.overrides.insert(key.clone(), value.clone());
        });

        let change = ConfigChange::new(key, old_value, value, Source::Flag);
        let _ = self.change_sender.send(change);
    }

    /// Creates a stream of configuration change events.
    ///
    /// The stream yields every change broadcast by this resolver (file
    /// reloads and overrides) and ends when the resolver is dropped.
    /// Lagged events are skipped rather than terminating the stream.
    pub fn subscribe(&self) -> impl Stream<Item = ConfigChange> + use<> {
        let receiver = self.change_sender.subscribe();

        futures::stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(change) => return Some((change, receiver)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }

    /// Re-fetches the remote document and swaps the remote layer.
    ///
    /// # Errors
    /// Returns a recoverable error when no remote source is configured or
    /// the endpoint cannot be reached; callers treat this as non-fatal and
    /// keep serving stale or absent remote values.
    pub async fn refresh_remote(&self) -> Result<()> {
        let Some(remote) = &self.remote else {
            return Err(StrataError::Remote(
                "no remote source configured".to_string(),
            ));
        };

        let doc = remote.fetch().await?;
        self.write_layers(|layers| layers.remote = Some(doc));

        Ok(())
    }

    /// Path of the watched local configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Re-parses the local file, swaps the file layer, and broadcasts one
    /// change event per key that differs from the previous document.
    pub(super) fn reload_file(&self) -> Result<Vec<ConfigChange>> {
        let new_doc = parse_file(&self.file_path)?;
        let old_doc = self.read_layers(|layers| layers.file.clone());

        let changes = diff::diff_documents(&old_doc, &new_doc, Source::File);
        self.write_layers(|layers| layers.file = new_doc);

        for change in &changes {
            let _ = self.change_sender.send(change.clone());
        }

        Ok(changes)
    }

    fn read_layers<T>(&self, f: impl FnOnce(&Layers) -> T) -> T {
        let guard = self.layers.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write_layers<T>(&self, f: impl FnOnce(&mut Layers) -> T) -> T {
        let mut guard = self.layers.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Parses the YAML configuration file into a dynamic document.
fn parse_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;

    let doc: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| StrataError::yaml_parse(e, path))?;

    serde_json::to_value(doc).map_err(|e| StrataError::yaml_parse(e, path))
}
