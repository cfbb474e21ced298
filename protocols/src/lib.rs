//! Wire types for the realtime session update protocol.
//!
//! - [`partial`]: three-state field values for update payloads
//! - [`realtime`]: sessions, turn detection, client and server events
//! - [`event_types`]: event type string constants
//! - [`builders`]: fluent construction of server events

pub mod builders;
pub mod event_types;
pub mod partial;
pub mod realtime;

pub use partial::Partial;
