//! Client events for the Realtime API.
//!
//! Inbound events arrive as untyped JSON and are routed by their `type`
//! string; each handler then decodes the payload it owns into one of the
//! typed events below.

use serde::{Deserialize, Serialize};

use super::session::PartialSession;

/// `session.update`: change the configuration of the active session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdateEvent {
    /// Optional client-generated event ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Fields to change; anything omitted keeps its current value
    #[serde(default)]
    pub session: PartialSession,
}

impl SessionUpdateEvent {
    pub fn new(session: PartialSession) -> Self {
        Self {
            event_id: None,
            session,
        }
    }

    /// Add an event ID to this event
    pub fn with_event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }
}
