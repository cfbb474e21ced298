//! Fields that cannot be reconfigured once a session exists.
//!
//! The guard works on the update mapping rather than the typed payload so
//! the same path lookup covers both the complete and the partial
//! turn-detection representations.

use serde_json::{Map, Value};

/// A configuration field the server refuses to change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardedField {
    /// Dotted path reported to the client, rooted at `session`.
    pub path: &'static str,
    keys: &'static [&'static str],
}

impl GuardedField {
    const fn new(path: &'static str, keys: &'static [&'static str]) -> Self {
        Self { path, keys }
    }

    /// Remove this field from `update`, returning whether it was referenced.
    ///
    /// An explicit `null` counts as a reference.
    fn take(&self, update: &mut Map<String, Value>) -> bool {
        let Some((last, parents)) = self.keys.split_last() else {
            return false;
        };
        let mut current = update;
        for key in parents {
            match current.get_mut(*key) {
                Some(Value::Object(nested)) => current = nested,
                _ => return false,
            }
        }
        current.remove(*last).is_some()
    }
}

/// Guarded fields, in the order their rejections are reported.
pub const GUARDED_FIELDS: &[GuardedField] = &[
    GuardedField::new("session.input_audio_format", &["input_audio_format"]),
    GuardedField::new("session.output_audio_format", &["output_audio_format"]),
    GuardedField::new(
        "session.turn_detection.prefix_padding_ms",
        &["turn_detection", "prefix_padding_ms"],
    ),
];

/// Drop every guarded field referenced by `update` and return the dotted
/// paths that were dropped. Sibling fields are left in place.
pub fn strip_guarded_fields(update: &mut Map<String, Value>) -> Vec<&'static str> {
    GUARDED_FIELDS
        .iter()
        .filter(|field| field.take(update))
        .map(|field| field.path)
        .collect()
}

const NOT_CONFIGURABLE: &str =
    "The server either does not support this field or it is not configurable.";

pub fn unsupported_field_message(path: &str) -> String {
    format!("Specifying `{path}` is not supported. {NOT_CONFIGURABLE}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_no_guarded_fields() {
        let mut update = object(json!({
            "modalities": ["text"],
            "turn_detection": {"threshold": 0.7}
        }));
        let before = update.clone();
        assert!(strip_guarded_fields(&mut update).is_empty());
        assert_eq!(update, before);
    }

    #[test]
    fn test_top_level_guarded_fields() {
        let mut update = object(json!({
            "input_audio_format": "g711_ulaw",
            "output_audio_format": "g711_alaw",
            "voice": "echo"
        }));
        assert_eq!(
            strip_guarded_fields(&mut update),
            vec!["session.input_audio_format", "session.output_audio_format"]
        );
        assert_eq!(Value::Object(update), json!({"voice": "echo"}));
    }

    #[test]
    fn test_nested_guarded_field_keeps_siblings() {
        let mut update = object(json!({
            "turn_detection": {"prefix_padding_ms": 100, "threshold": 0.8}
        }));
        assert_eq!(
            strip_guarded_fields(&mut update),
            vec!["session.turn_detection.prefix_padding_ms"]
        );
        assert_eq!(
            Value::Object(update),
            json!({"turn_detection": {"threshold": 0.8}})
        );
    }

    #[test]
    fn test_explicit_null_is_a_reference() {
        let mut update = object(json!({"input_audio_format": null}));
        assert_eq!(
            strip_guarded_fields(&mut update),
            vec!["session.input_audio_format"]
        );
        assert!(update.is_empty());
    }

    #[test]
    fn test_null_parent_is_not_a_reference() {
        let mut update = object(json!({"turn_detection": null}));
        assert!(strip_guarded_fields(&mut update).is_empty());
        assert_eq!(Value::Object(update), json!({"turn_detection": null}));
    }

    #[test]
    fn test_message_names_field() {
        let message = unsupported_field_message("session.input_audio_format");
        assert!(message.starts_with("Specifying `session.input_audio_format` is not supported."));
    }
}
