use std::fmt;

// ============================================================================
// Realtime Events
// ============================================================================

/// Client-to-server realtime event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealtimeClientEvent {
    SessionUpdate,
}

impl RealtimeClientEvent {
    pub const SESSION_UPDATE: &'static str = "session.update";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SessionUpdate => Self::SESSION_UPDATE,
        }
    }
}

impl fmt::Display for RealtimeClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-to-client realtime event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealtimeServerEvent {
    Error,
    SessionUpdated,
}

impl RealtimeServerEvent {
    pub const ERROR: &'static str = "error";
    pub const SESSION_UPDATED: &'static str = "session.updated";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => Self::ERROR,
            Self::SessionUpdated => Self::SESSION_UPDATED,
        }
    }
}

impl fmt::Display for RealtimeServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// `error.type` values carried by realtime error events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealtimeErrorType {
    InvalidRequest,
    Server,
}

impl RealtimeErrorType {
    pub const INVALID_REQUEST: &'static str = "invalid_request_error";
    pub const SERVER: &'static str = "server_error";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => Self::INVALID_REQUEST,
            Self::Server => Self::SERVER,
        }
    }
}

impl fmt::Display for RealtimeErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
