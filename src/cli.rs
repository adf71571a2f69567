//! Command-line flag definitions.

use clap::Parser;

/// Layered configuration demo daemon.
///
/// Flags install highest-precedence overrides: a value given here wins
/// over environment variables, the remote source, the local file, and
/// compiled-in defaults.
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(about = "Demonstration daemon for layered configuration resolution")]
pub struct Cli {
    /// Override the `config_version` key.
    #[arg(long = "config_version")]
    pub config_version: Option<String>,

    /// Override the `app.name` key.
    #[arg(long = "app_name")]
    pub app_name: Option<String>,
}
