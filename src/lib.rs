//! Session configuration updates for realtime voice sessions.
//!
//! Clients send `session.update` events naming the configuration they want
//! changed. The [`router::EventRouter`] hands each event to its handler,
//! which rejects fields that are fixed after creation, deep-merges the rest
//! into the session's configuration and confirms the result with a
//! `session.updated` event carrying the complete session.

pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod logging;
pub mod merge;
pub mod replay;
pub mod router;
pub mod session_loop;
pub mod turn_detection;

pub use context::{EventPublisher, SessionContext};
pub use error::{RealtimeError, RealtimeResult};
pub use router::{EventHandler, EventRouter};
pub use session_loop::{run_session_loop, InboundEvent};
