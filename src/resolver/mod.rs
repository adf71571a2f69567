//! Layered configuration resolution with defined source precedence.
//!
//! A [`ConfigResolver`] merges five ordered layers (command-line override,
//! environment variable, remote document, local file, compiled-in default)
//! behind a uniform key-value read interface, and broadcasts change events
//! when the watched file is edited.

mod changes;
mod diff;
mod env;
mod file_watcher;
mod file_watching;
mod path_ops;
mod store;

#[cfg(test)]
mod tests;

pub use changes::{ConfigChange, Source};
pub use env::EnvBindings;
pub use file_watcher::{FileEvent, FileEventKind, FileWatcher};
pub use file_watching::WatchHandle;
pub use store::ConfigResolver;
