//! Built-in realtime event handlers.

pub mod session_update;

use realtime_protocol::event_types::RealtimeClientEvent;

use crate::{error::RealtimeResult, router::EventRouter};

pub(crate) fn register_all(router: &mut EventRouter) -> RealtimeResult<()> {
    router.register(
        RealtimeClientEvent::SessionUpdate.as_str(),
        session_update::handle_session_update_event,
    )?;
    Ok(())
}
