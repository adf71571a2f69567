use std::collections::BTreeSet;

use serde_json::Value;

use super::changes::{ConfigChange, Source};

/// Compares two configuration documents and identifies field-level changes.
///
/// Performs a recursive comparison, producing one change per leaf key that
/// differs. Keys removed from the new document produce a change whose new
/// value is null, so lower precedence layers become observable again.
pub(super) fn diff_documents(old: &Value, new: &Value, source: Source) -> Vec<ConfigChange> {
    let mut changes = Vec::new();
    diff_values("", old, new, source, &mut changes);
    changes
}

fn diff_values(
    key: &str,
    old: &Value,
    new: &Value,
    source: Source,
    changes: &mut Vec<ConfigChange>,
) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            let mut all_keys = BTreeSet::new();
            all_keys.extend(old_map.keys());
            all_keys.extend(new_map.keys());

            for field in all_keys {
                let field_key = if key.is_empty() {
                    field.clone()
                } else {
                    format!("{key}.{field}")
                };

                match (old_map.get(field), new_map.get(field)) {
                    (Some(old_val), Some(new_val)) => {
                        diff_values(&field_key, old_val, new_val, source, changes);
                    }
                    (Some(old_val), None) => {
                        // Removed sections are expanded so subscribers on
                        // leaf keys still see the change.
                        if old_val.is_object() {
                            let empty = Value::Object(serde_json::Map::new());
                            diff_values(&field_key, old_val, &empty, source, changes);
                        } else {
                            changes.push(ConfigChange::new(
                                field_key,
                                Some(old_val.clone()),
                                Value::Null,
                                source,
                            ));
                        }
                    }
                    (None, Some(new_val)) => {
                        if new_val.is_object() {
                            let empty = Value::Object(serde_json::Map::new());
                            diff_values(&field_key, &empty, new_val, source, changes);
                        } else {
                            changes.push(ConfigChange::new(
                                field_key,
                                None,
                                new_val.clone(),
                                source,
                            ));
                        }
                    }
                    (None, None) => unreachable!(),
                }
            }
        }
        _ => {
            if old != new {
                changes.push(ConfigChange::new(
                    key.to_string(),
                    Some(old.clone()),
                    new.clone(),
                    source,
                ));
            }
        }
    }
}
