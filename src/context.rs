//! Per-session state shared by event handlers.

use std::sync::Arc;

use realtime_protocol::{
    builders::ServerEventBuilder,
    realtime::{ServerEvent, Session, TurnDetection},
};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{RealtimeError, RealtimeResult};

/// Outbound event sink for one session.
///
/// Backed by an unbounded channel: publishing never blocks, never drops an
/// event and preserves the order of publishes.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl EventPublisher {
    pub fn new(tx: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self { tx }
    }

    /// Create a publisher together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Start building an event with a fresh server-generated event ID.
    pub fn event(&self) -> ServerEventBuilder {
        ServerEventBuilder::new(format!("event_{}", Uuid::new_v4().simple()))
    }

    pub fn publish(&self, event: ServerEvent) -> RealtimeResult<()> {
        debug!(
            event_type = event.event_type(),
            event_id = event.event_id(),
            "Publishing server event"
        );
        self.tx.send(event).map_err(|_| RealtimeError::SinkClosed)
    }
}

/// Handler-facing view of one realtime session.
///
/// The current [`Session`] is shared behind an `Arc` and replaced wholesale
/// on every accepted update; holders of an older snapshot keep a consistent
/// view of the configuration they read.
#[derive(Debug)]
pub struct SessionContext {
    session: Arc<Session>,
    publisher: EventPublisher,
    turn_detection_defaults: TurnDetection,
}

impl SessionContext {
    pub fn new(session: Session, publisher: EventPublisher) -> Self {
        Self {
            session: Arc::new(session),
            publisher,
            turn_detection_defaults: TurnDetection::default(),
        }
    }

    /// Turn detection values used when a client enables turn detection on a
    /// session that has none.
    pub fn with_turn_detection_defaults(mut self, defaults: TurnDetection) -> Self {
        self.turn_detection_defaults = defaults;
        self
    }

    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    pub fn publisher(&self) -> &EventPublisher {
        &self.publisher
    }

    pub fn turn_detection_defaults(&self) -> &TurnDetection {
        &self.turn_detection_defaults
    }

    pub(crate) fn replace_session(&mut self, session: Session) {
        self.session = Arc::new(session);
    }
}
