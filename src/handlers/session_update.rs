//! `session.update`: apply a partial configuration to the active session.
//!
//! 1. Reject guarded fields, one `error` event each; the update goes on.
//! 2. Resolve `turn_detection` against the current configuration.
//! 3. Deep-merge the remaining fields onto the current session tree.
//! 4. Rebuild and validate a complete [`Session`]; on failure nothing changes.
//! 5. Replace the stored session and publish `session.updated`.

use realtime_protocol::{
    event_types::{RealtimeClientEvent, RealtimeErrorType},
    realtime::{ApiError, Session, SessionUpdateEvent},
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    context::SessionContext,
    error::{RealtimeError, RealtimeResult},
    guard::{strip_guarded_fields, unsupported_field_message},
    merge::deep_merge,
    turn_detection::{resolve_turn_detection, TURN_DETECTION_KEY},
};

/// Router entry point: decode the raw event and apply it.
pub fn handle_session_update_event(ctx: &mut SessionContext, event: Value) -> RealtimeResult<()> {
    let event: SessionUpdateEvent =
        serde_json::from_value(event).map_err(|source| RealtimeError::InvalidEvent {
            event_type: RealtimeClientEvent::SessionUpdate.to_string(),
            source,
        })?;
    apply_session_update(ctx, &event)
}

/// Apply a decoded `session.update` to `ctx`.
///
/// Rejected fields are published as `error` events before anything else.
/// If the merged configuration does not form a valid session the stored
/// session is left as it was, no `session.updated` is published and
/// [`RealtimeError::SessionValidation`] is returned.
pub fn apply_session_update(
    ctx: &mut SessionContext,
    event: &SessionUpdateEvent,
) -> RealtimeResult<()> {
    let mut update = match serde_json::to_value(&event.session)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for path in strip_guarded_fields(&mut update) {
        warn!(field = path, "Rejecting update of non-configurable session field");
        let error = ApiError::new(
            RealtimeErrorType::INVALID_REQUEST,
            unsupported_field_message(path),
        )
        .with_param(path)
        .with_event_id(event.event_id.clone());
        let publisher = ctx.publisher();
        publisher.publish(publisher.event().error(error))?;
    }

    let current = ctx.session();
    let turn_detection = resolve_turn_detection(
        &mut update,
        &event.session.turn_detection,
        current.turn_detection.as_ref(),
        ctx.turn_detection_defaults(),
    )?;

    let mut merged = match serde_json::to_value(current.as_ref())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let requested = Value::Object(update.clone());
    let before = Value::Object(merged.clone());
    debug!(update = %requested, "Applying session configuration update");
    debug!(session = %before, "Session configuration before update");

    deep_merge(&mut merged, update);
    if let Some(turn_detection) = turn_detection {
        merged.insert(TURN_DETECTION_KEY.to_string(), turn_detection);
    }
    let after = Value::Object(merged.clone());
    debug!(session = %after, "Session configuration after update");

    let session = Session::from_value(Value::Object(merged)).inspect_err(|err| {
        warn!(session_id = %current.id, error = %err, "Discarding invalid session update");
    })?;

    ctx.replace_session(session.clone());
    info!(session_id = %session.id, "Session configuration updated");

    let publisher = ctx.publisher();
    publisher.publish(publisher.event().session_updated(session))
}
