//! Realtime session error types.
//!
//! Per-field rejections are not errors: they are published as `error`
//! events while the rest of the update proceeds. Everything here aborts the
//! event being handled and leaves the session untouched.

use realtime_protocol::{
    event_types::RealtimeErrorType,
    realtime::{ApiError, SessionValidationError},
};
use thiserror::Error;

pub type RealtimeResult<T> = Result<T, RealtimeError>;

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Handler already registered for event type: {0}")]
    DuplicateHandler(String),

    #[error("Event is missing a string `type` field")]
    MissingEventType,

    #[error("Invalid JSON event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    #[error("Invalid `{event_type}` event: {source}")]
    InvalidEvent {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session validation failed: {0}")]
    SessionValidation(#[from] SessionValidationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("Event sink closed")]
    SinkClosed,
}

impl RealtimeError {
    /// Short machine-readable code used in the `error.code` wire field.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownEventType(_) => "invalid_event_type",
            Self::DuplicateHandler(_) => "duplicate_handler",
            Self::MissingEventType => "missing_event_type",
            Self::MalformedEvent(_) => "invalid_json",
            Self::InvalidEvent { .. } => "invalid_event",
            Self::SessionValidation(_) => "invalid_session",
            Self::Serialization(_) => "serialization_error",
            Self::SinkClosed => "sink_closed",
        }
    }

    /// Whether the client caused this error (as opposed to the server).
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEventType(_)
                | Self::MissingEventType
                | Self::MalformedEvent(_)
                | Self::InvalidEvent { .. }
                | Self::SessionValidation(_)
        )
    }

    /// Wire payload for reporting this error to the client.
    pub fn api_error(&self, client_event_id: Option<String>) -> ApiError {
        let error_type = if self.is_client_error() {
            RealtimeErrorType::InvalidRequest
        } else {
            RealtimeErrorType::Server
        };
        ApiError::new(error_type.as_str(), self.to_string())
            .with_code(self.code())
            .with_event_id(client_event_id)
    }
}
