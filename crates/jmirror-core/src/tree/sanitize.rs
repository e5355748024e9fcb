//! Removal of provider-only and tracking branches from fetched documents.

use serde_json::{Map, Value};

/// Keys dropped at any depth.
const DENIED_KEYS: [&str; 2] = ["related_providers", "notice"];

/// Array key whose elements are filtered by [`is_provider_group`].
const GROUPS_KEY: &str = "groups";

const PROVIDER_MARKER: &str = "type=provider";

/// Returns a sanitized copy of `value`; the input is left untouched.
///
/// Denied keys are removed wherever they occur. Inside a `groups` array, any
/// element whose `remote_data.url` contains `type=provider` is dropped. All
/// other elements and scalars are kept in order.
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sanitize_object(map)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize).collect()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

fn sanitize_object(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, child) in map {
        if DENIED_KEYS.contains(&key.as_str()) {
            continue;
        }
        out.insert(key.clone(), sanitize(child));
    }
    if let Some(Value::Array(groups)) = out.get_mut(GROUPS_KEY) {
        groups.retain(|group| !is_provider_group(group));
    }
    out
}

fn is_provider_group(group: &Value) -> bool {
    group
        .get("remote_data")
        .and_then(|rd| rd.get("url"))
        .and_then(Value::as_str)
        .is_some_and(|url| url.contains(PROVIDER_MARKER))
}
