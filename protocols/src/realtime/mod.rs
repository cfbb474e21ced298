//! Realtime API protocol types for session configuration updates.
//!
//! # Event Types
//!
//! | Direction | Event Type | Description |
//! |-----------|------------|-------------|
//! | client | `session.update` | Change session configuration |
//! | server | `session.updated` | Full session after an accepted update |
//! | server | `error` | A field or event was rejected |

pub mod client_events;
pub mod server_events;
pub mod session;

// Re-export all public types for convenience
pub use client_events::SessionUpdateEvent;
pub use server_events::{ApiError, ServerEvent};
pub use session::{
    AudioFormat, FunctionTool, InputAudioTranscription, MaxResponseOutputTokens, Modality,
    PartialInputAudioTranscription, PartialSession, PartialTurnDetection, Session,
    SessionValidationError, ToolChoice, ToolChoiceMode, TurnDetection, TurnDetectionKind,
    TurnDetectionUpdate,
};
