//! Server events for the Realtime API.
//!
//! Only the events produced by session configuration updates live here:
//! `error` and `session.updated`. Use
//! [`ServerEventBuilder`](crate::builders::ServerEventBuilder) to build them.

use serde::{Deserialize, Serialize};

use super::session::Session;
use crate::event_types::RealtimeServerEvent;

// ============================================================================
// Supporting Types
// ============================================================================

/// API error returned in error events.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error type (e.g., "invalid_request_error")
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error code (optional)
    pub code: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Parameter that caused the error (optional)
    pub param: Option<String>,
    /// Client event ID that caused the error (optional)
    pub event_id: Option<String>,
}

impl ApiError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            code: None,
            message: message.into(),
            param: None,
            event_id: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn with_event_id(mut self, event_id: Option<String>) -> Self {
        self.event_id = event_id;
        self
    }
}

// ============================================================================
// Server Event Enum
// ============================================================================

/// Server events emitted while applying session updates.
///
/// Each event includes a server-generated `event_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// A request could not be (fully) honored
    #[serde(rename = "error")]
    Error {
        /// Server-generated event ID
        event_id: String,
        /// Error details
        error: ApiError,
    },

    /// Session configuration changed
    #[serde(rename = "session.updated")]
    SessionUpdated {
        /// Server-generated event ID
        event_id: String,
        /// The complete session after the update
        session: Box<Session>,
    },
}

impl ServerEvent {
    /// Get the event type as a string (e.g., "session.updated")
    pub const fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    pub const fn kind(&self) -> RealtimeServerEvent {
        match self {
            Self::Error { .. } => RealtimeServerEvent::Error,
            Self::SessionUpdated { .. } => RealtimeServerEvent::SessionUpdated,
        }
    }

    pub fn event_id(&self) -> &str {
        match self {
            Self::Error { event_id, .. } | Self::SessionUpdated { event_id, .. } => event_id,
        }
    }
}
