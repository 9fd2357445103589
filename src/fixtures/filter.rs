//! Field whitelisting for list fixtures.

use serde_json::{Map, Value};

/// Keep only the `fields` keys of every object in `items`
///
/// An empty whitelist returns the items unchanged. Non-object entries
/// pass through as they are.
pub fn filter_fields(items: &[Value], fields: &[String]) -> Vec<Value> {
    if fields.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .map(|item| match item {
            Value::Object(object) => Value::Object(retain_keys(object, fields)),
            other => other.clone(),
        })
        .collect()
}

fn retain_keys(object: &Map<String, Value>, fields: &[String]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| fields.iter().any(|f| f == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
