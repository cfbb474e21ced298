//! Builders for Realtime API types

pub mod server_event;

pub use server_event::ServerEventBuilder;
