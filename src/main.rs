//! Strata entry point - resolves layered configuration, prints the result,
//! and runs the tick daemon until SIGINT/SIGTERM.

use std::{collections::BTreeMap, env, error::Error};

use clap::Parser;
use serde_json::Value;
use strata::{
    cli::Cli,
    config::{ConfigPaths, RepositoryEntry},
    daemon::Daemon,
    remote::RemoteSource,
    resolver::{ConfigResolver, EnvBindings},
    tracing_config,
};
use tracing::info;

/// Prefix under which dotted keys derive environment variable names.
const ENV_PREFIX: &str = "STRATA";

/// Remote key-value endpoint serving the shared configuration document.
const REMOTE_ENDPOINT: &str = "http://127.0.0.1:2379";
const REMOTE_PATH: &str = "/strata/config";

/// Key whose resolved value is printed on every daemon tick.
const TICK_KEY: &str = "log.level";

/// Key published by the remote source, printed after each refresh.
const REMOTE_VERSION_KEY: &str = "etcd_version";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_config::init()?;
    info!("Starting strata configuration daemon");

    let cli = Cli::parse();

    let env_bindings = EnvBindings::with_prefix(ENV_PREFIX)
        .bind("config_name", "STRATA_CONFIG_NAME")
        .bind("app.port", "STRATA_APP_PORT");

    let remote = RemoteSource::new(REMOTE_ENDPOINT, REMOTE_PATH)?;

    let resolver =
        ConfigResolver::load(ConfigPaths::main_config(), env_bindings, Some(remote)).await?;

    if let Some(version) = cli.config_version {
        resolver.set_override("config_version", Value::String(version));
    }
    if let Some(name) = cli.app_name {
        resolver.set_override("app.name", Value::String(name));
    }

    print_resolved_config(&resolver)?;

    let _watch = resolver.watch_file()?;

    Daemon::new(resolver, TICK_KEY, REMOTE_VERSION_KEY).run().await?;

    Ok(())
}

/// Prints the resolved configuration report to stdout.
///
/// Structured keys go through checked deserialization, so a document with
/// an unexpected shape aborts here with a descriptive decode error instead
/// of partially printing.
fn print_resolved_config(resolver: &ConfigResolver) -> Result<(), Box<dyn Error>> {
    println!("Config Name: {}", resolver.get_string("config_name"));
    println!("Config Version: {}", resolver.get_string("config_version"));

    let repositories: Vec<RepositoryEntry> = resolver.get_as("repository")?;
    println!("Repositories:");
    for repo in &repositories {
        println!("  - Name: {}", repo.name);
        println!("    Dialector: {}", repo.dialector);
        println!("    URL: {}", repo.url);
    }

    let databases: BTreeMap<String, bool> = resolver.get_as("databases")?;
    println!("Databases:");
    for (name, enabled) in &databases {
        println!("  {name}: {enabled}");
    }

    println!("Log Configuration:");
    println!("  Level: {}", resolver.get_string("log.level"));
    println!("  Format: {}", resolver.get_string("log.format"));
    println!("  Output: {}", resolver.get_string("log.output"));

    println!("App Configuration:");
    println!("  Name: {}", resolver.get_string("app.name"));
    println!("  Port: {}", resolver.get_i64("app.port"));

    println!("Environment Variables:");
    println!("  config_name: {}", resolver.get_string("config_name"));
    println!(
        "  config_version: {}",
        resolver.get_string("config_version")
    );
    println!("  app.name: {}", resolver.get_string("app.name"));
    println!("  app.port: {}", resolver.get_string("app.port"));
    println!(
        "  DATABASE_URL: {}",
        env::var("STRATA_DATABASE_URL").unwrap_or_default()
    );

    Ok(())
}
