//! Unwrapping the different response envelopes the server uses

use crate::idea::RawIdea;
use serde_json::Value;

/// Keys a single idea may be nested under, checked in order
const IDEA_WRAPPERS: [&str; 3] = ["idea", "data", "result"];

/// Pull the idea object out of a detail response
///
/// Accepts `{ idea: {...} }`, `{ data: {...} }`, `{ result: {...} }` or the
/// bare object. Returns `None` when there is no object to be found.
pub fn unwrap_idea(body: Value) -> Option<RawIdea> {
  let Value::Object(mut map) = body else {
    return None;
  };

  for key in IDEA_WRAPPERS {
    if matches!(map.get(key), Some(Value::Object(_))) {
      if let Some(Value::Object(inner)) = map.remove(key) {
        return Some(inner);
      }
    }
  }

  Some(map)
}

/// Pull a list of ideas out of `{ <key>: [...] }`
///
/// A missing or non-array field yields an empty list. Entries that are not
/// objects cannot be ideas and are skipped.
pub fn unwrap_list(body: Value, key: &str) -> Vec<RawIdea> {
  let Value::Object(mut map) = body else {
    return Vec::new();
  };

  match map.remove(key) {
    Some(Value::Array(items)) => items
      .into_iter()
      .filter_map(|item| match item {
        Value::Object(raw) => Some(raw),
        other => {
          tracing::debug!(key, value = %other, "skipping non-object list entry");
          None
        }
      })
      .collect(),
    _ => Vec::new(),
  }
}
