//! Builder for ServerEvent
//!
//! Provides a fluent API for constructing server-to-client realtime events:
//!
//! ```ignore
//! ServerEventBuilder::new("event_1").session_updated(session)
//! ServerEventBuilder::new("event_2").error(error)
//! ServerEventBuilder::new("event_3").invalid_request("bad field")
//! ```

use crate::{
    event_types::RealtimeErrorType,
    realtime::{ApiError, ServerEvent, Session},
};

/// Top-level builder for `ServerEvent`.
///
/// Holds the server-generated `event_id` shared by every event variant.
#[must_use = "Builder does nothing until a terminal method is called"]
#[derive(Clone, Debug)]
pub struct ServerEventBuilder {
    event_id: String,
}

impl ServerEventBuilder {
    /// Create a new builder with the given event ID.
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
        }
    }

    // ---- Session events ----

    /// Build a `session.updated` event.
    pub fn session_updated(self, session: Session) -> ServerEvent {
        ServerEvent::SessionUpdated {
            event_id: self.event_id,
            session: Box::new(session),
        }
    }

    // ---- Error events ----

    /// Build an `error` event.
    pub fn error(self, error: ApiError) -> ServerEvent {
        ServerEvent::Error {
            event_id: self.event_id,
            error,
        }
    }

    /// Build an `error` event of type `invalid_request_error`.
    pub fn invalid_request(self, message: impl Into<String>) -> ServerEvent {
        self.error(ApiError::new(
            RealtimeErrorType::INVALID_REQUEST,
            message,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
