//! Configuration schema definitions.
//!
//! Defines the typed schema recognized by the demo daemon. The schema is
//! serializable to/from YAML; `Settings::default()` doubles as the
//! compiled-in Default layer of the resolver.

mod paths;
mod schema;

pub use paths::ConfigPaths;
pub use schema::{AppSettings, LogSettings, RepositoryEntry, Settings};
