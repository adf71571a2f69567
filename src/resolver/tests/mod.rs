//! Unit tests for the resolver module.
//! No filesystem, timing, or external dependencies.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use futures::StreamExt;
use serde_json::{Value, json};

use crate::config::RepositoryEntry;
use crate::core::StrataError;
use crate::resolver::{ConfigChange, ConfigResolver, EnvBindings, Source, diff};

fn resolver_with(doc: Value) -> ConfigResolver {
    ConfigResolver::from_document(doc, EnvBindings::with_prefix("STRATA_UNIT"))
}

#[test]
fn env_var_name_derivation() {
    let env = EnvBindings::with_prefix("strata");

    assert_eq!(env.var_name("app.port"), "STRATA_APP_PORT");
    assert_eq!(env.var_name("config_name"), "STRATA_CONFIG_NAME");
    assert_eq!(env.var_name("log.level"), "STRATA_LOG_LEVEL");
    assert_eq!(env.var_name("App.Name"), "STRATA_APP_NAME");
}

#[test]
fn env_explicit_bind_overrides_derivation() {
    let env = EnvBindings::with_prefix("STRATA").bind("database.url", "DATABASE_URL");

    assert_eq!(env.var_name("database.url"), "DATABASE_URL");
    assert_eq!(env.var_name("database.name"), "STRATA_DATABASE_NAME");
}

#[test]
fn gets_nested_file_values() {
    let resolver = resolver_with(json!({
        "config_name": "unit",
        "app": { "name": "demo", "port": 8080 },
        "databases": { "postgres": true }
    }));

    assert_eq!(resolver.get_string("config_name"), "unit");
    assert_eq!(resolver.get_string("app.name"), "demo");
    assert_eq!(resolver.get_i64("app.port"), 8080);
    assert!(resolver.get_bool("databases.postgres"));
}

#[test]
fn gets_array_elements_by_index() {
    let resolver = resolver_with(json!({
        "repository": [
            { "name": "users", "dialector": "postgres", "url": "postgres://x" }
        ]
    }));

    assert_eq!(resolver.get_string("repository.0.name"), "users");
    assert_eq!(resolver.get("repository.1.name"), None);
}

#[test]
fn key_lookup_is_case_insensitive() {
    let resolver = resolver_with(json!({ "app": { "name": "demo" } }));

    assert_eq!(resolver.get_string("APP.NAME"), "demo");
    assert_eq!(resolver.get_string("App.Name"), "demo");
}

#[test]
fn override_wins_over_file() {
    let resolver = resolver_with(json!({ "app": { "name": "from_file" } }));

    resolver.set_override("app.name", Value::String("from_flag".to_string()));

    assert_eq!(resolver.get_string("app.name"), "from_flag");
}

#[test]
fn file_wins_over_default() {
    let resolver = resolver_with(json!({ "log": { "level": "debug" } }));

    assert_eq!(resolver.get_string("log.level"), "debug");
}

#[test]
fn absent_file_key_falls_through_to_default() {
    let resolver = resolver_with(json!({}));

    // Compiled-in defaults from Settings::default().
    assert_eq!(resolver.get_string("log.level"), "info");
    assert_eq!(resolver.get_i64("app.port"), 8080);
}

#[test]
fn undefined_key_resolves_to_zero_values() {
    let resolver = resolver_with(json!({}));

    assert_eq!(resolver.get("no.such.key"), None);
    assert_eq!(resolver.get_string("no.such.key"), "");
    assert_eq!(resolver.get_i64("no.such.key"), 0);
    assert!(!resolver.get_bool("no.such.key"));
}

#[test]
fn typed_getters_coerce_strings() {
    let resolver = resolver_with(json!({
        "port_as_string": "9090",
        "flag_as_string": "true",
        "port_as_number": 8080
    }));

    assert_eq!(resolver.get_i64("port_as_string"), 9090);
    assert!(resolver.get_bool("flag_as_string"));
    assert_eq!(resolver.get_string("port_as_number"), "8080");
}

#[test]
fn get_as_decodes_repository_entries() {
    let resolver = resolver_with(json!({
        "repository": [
            { "name": "users", "dialector": "postgres", "url": "postgres://x" },
            { "name": "orders", "dialector": "mysql", "url": "mysql://y" }
        ]
    }));

    let repos: Vec<RepositoryEntry> = resolver.get_as("repository").unwrap();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "users");
    assert_eq!(repos[1].dialector, "mysql");
}

#[test]
fn get_as_reports_decode_error_with_key() {
    let resolver = resolver_with(json!({ "repository": "not a list" }));

    let result = resolver.get_as::<Vec<RepositoryEntry>>("repository");

    match result {
        Err(StrataError::Decode { key, .. }) => assert_eq!(key, "repository"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn diff_reports_changed_added_and_removed_keys() {
    let old = json!({
        "log": { "level": "info", "format": "text" },
        "app": { "port": 8080 }
    });
    let new = json!({
        "log": { "level": "debug", "format": "text" },
        "databases": { "postgres": true }
    });

    let changes = diff::diff_documents(&old, &new, Source::File);

    let changed = changes.iter().find(|c| c.key == "log.level").unwrap();
    assert_eq!(changed.old_value, Some(json!("info")));
    assert_eq!(changed.new_value, json!("debug"));
    assert_eq!(changed.source, Source::File);

    let removed = changes.iter().find(|c| c.key == "app.port").unwrap();
    assert_eq!(removed.new_value, Value::Null);

    let added = changes
        .iter()
        .find(|c| c.key == "databases.postgres")
        .unwrap();
    assert_eq!(added.old_value, None);
    assert_eq!(added.new_value, json!(true));

    assert!(!changes.iter().any(|c| c.key == "log.format"));
}

#[test]
fn diff_expands_one_sided_sections_to_leaf_keys() {
    let old = json!({
        "server": { "tls": { "cert": "a.pem", "key": "a.key" } }
    });
    let new = json!({
        "metrics": { "exporter": { "port": 9100 } }
    });

    let changes = diff::diff_documents(&old, &new, Source::File);

    assert_eq!(changes.len(), 3);

    let cert = changes.iter().find(|c| c.key == "server.tls.cert").unwrap();
    assert_eq!(cert.old_value, Some(json!("a.pem")));
    assert_eq!(cert.new_value, Value::Null);

    let key = changes.iter().find(|c| c.key == "server.tls.key").unwrap();
    assert_eq!(key.new_value, Value::Null);

    let port = changes
        .iter()
        .find(|c| c.key == "metrics.exporter.port")
        .unwrap();
    assert_eq!(port.old_value, None);
    assert_eq!(port.new_value, json!(9100));

    // No intermediate section keys, only leaves.
    assert!(!changes.iter().any(|c| c.key == "server" || c.key == "metrics"));
}

#[test]
fn config_change_as_string() {
    let change = ConfigChange::new(
        "app.name".to_string(),
        None,
        Value::String("demo".to_string()),
        Source::Flag,
    );

    assert_eq!(change.as_string(), Some("demo".to_string()));

    let change = ConfigChange::new("app.port".to_string(), None, json!(8080), Source::Flag);
    assert_eq!(change.as_string(), None);
}

#[tokio::test]
async fn subscribers_receive_override_changes() {
    let resolver = resolver_with(json!({ "app": { "name": "before" } }));

    let mut changes = Box::pin(resolver.subscribe());

    resolver.set_override("app.name", Value::String("after".to_string()));

    let change = changes.next().await.unwrap();
    assert_eq!(change.key, "app.name");
    assert_eq!(change.old_value, Some(json!("before")));
    assert_eq!(change.new_value, json!("after"));
    assert_eq!(change.source, Source::Flag);
}
