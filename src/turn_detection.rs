//! Field-level resolution of `turn_detection` in a session update.
//!
//! The generic deep merge would also overlay a partial turn detection, but
//! it cannot tell a partial payload from a complete one, nor fall back to
//! the server defaults for the guarded padding. Turn detection is therefore
//! resolved here into a complete value and set directly on the merged tree.

use realtime_protocol::{
    realtime::{TurnDetection, TurnDetectionUpdate},
    Partial,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RealtimeResult;

pub const TURN_DETECTION_KEY: &str = "turn_detection";
const PREFIX_PADDING_KEY: &str = "prefix_padding_ms";

/// Remove `turn_detection` from `update` and resolve it against the
/// session's current turn detection.
///
/// `update` must already have had guarded fields stripped. Returns `None`
/// when the client did not mention turn detection; otherwise the value to
/// store under `turn_detection` in the merged session tree.
pub fn resolve_turn_detection(
    update: &mut Map<String, Value>,
    requested: &Partial<TurnDetectionUpdate>,
    current: Option<&TurnDetection>,
    defaults: &TurnDetection,
) -> RealtimeResult<Option<Value>> {
    let Some(raw) = update.remove(TURN_DETECTION_KEY) else {
        return Ok(None);
    };

    let resolved = match (requested.as_value(), raw) {
        (Some(td), Value::Object(fields)) if td.is_partial() => match current {
            Some(existing) => {
                let mut merged = match serde_json::to_value(existing)? {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                debug!(
                    fields = ?fields.keys().collect::<Vec<_>>(),
                    "Overlaying partial turn detection onto existing configuration"
                );
                for (key, value) in fields {
                    merged.insert(key, value);
                }
                Value::Object(merged)
            }
            // Nothing to overlay onto: the payload stands on its own and
            // must be complete to pass validation.
            None => Value::Object(fields),
        },
        (Some(_), Value::Object(mut fields)) => {
            let padding = current.map_or(defaults.prefix_padding_ms, |td| td.prefix_padding_ms);
            fields.insert(PREFIX_PADDING_KEY.to_string(), Value::from(padding));
            Value::Object(fields)
        }
        (_, raw) => raw,
    };

    Ok(Some(resolved))
}
