//! Recursive overlay of a partial JSON mapping onto a complete one.

use serde_json::{Map, Value};

/// Overlay `updates` onto `original`.
///
/// Nested mappings are merged key by key; every other value, arrays
/// included, replaces what was there. Keys are only ever added or
/// overwritten, never removed. When a nested mapping lands on a non-mapping
/// value, that value is replaced by an empty mapping before merging.
pub fn deep_merge(original: &mut Map<String, Value>, updates: Map<String, Value>) {
    for (key, value) in updates {
        match value {
            Value::Object(nested) => {
                let slot = original
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(target) = slot {
                    deep_merge(target, nested);
                }
            }
            other => {
                original.insert(key, other);
            }
        }
    }
}
