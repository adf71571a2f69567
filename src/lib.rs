//! Strata - layered configuration demonstration daemon.
//!
//! Strata resolves configuration keys across five ordered sources
//! (command-line flag, environment variable, remote key-value endpoint,
//! local YAML file, compiled-in default) and runs a periodic background
//! task until the process receives SIGINT or SIGTERM.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strata::resolver::{ConfigResolver, EnvBindings};
//!
//! # #[tokio::main]
//! # async fn main() -> strata::Result<()> {
//! let resolver = ConfigResolver::load(
//!     "etc/config.yaml",
//!     EnvBindings::with_prefix("STRATA"),
//!     None,
//! )
//! .await?;
//!
//! println!("app.port = {}", resolver.get_i64("app.port"));
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and file locations.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Layered configuration resolution with defined source precedence.
pub mod resolver;

/// HTTP client for the remote key-value configuration source.
pub mod remote;

/// Periodic background task with signal-driven shutdown.
pub mod daemon;

/// Command-line flag definitions.
pub mod cli;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{Result, StrataError};
