use serde_json::Value;

/// Navigates through a JSON value structure following a dot-separated key.
///
/// Object segments match keys case-insensitively; array segments are
/// numeric indexes. Returns `None` when any segment does not resolve.
pub(super) fn navigate(value: &Value, key: &str) -> Option<Value> {
    let mut current = value;

    for part in key.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part).or_else(|| {
                    map.iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case(part))
                        .map(|(_, v)| v)
                })?;
            }
            Value::Array(items) => {
                let index = part.parse::<usize>().ok()?;
                current = items.get(index)?;
            }
            _ => return None,
        }
    }

    Some(current.clone())
}
