//! Dispatch of inbound realtime events to their handlers.
//!
//! The router is assembled once at startup and shared read-only afterwards
//! (typically behind an `Arc`). Registering two handlers for the same event
//! type fails at assembly time instead of silently replacing one.

use std::{collections::HashMap, fmt};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    context::SessionContext,
    error::{RealtimeError, RealtimeResult},
    handlers,
};

/// Handles one kind of inbound event for a session.
///
/// Handlers run synchronously to completion on the session's event loop and
/// must not block.
pub trait EventHandler: Send + Sync {
    fn handle(&self, ctx: &mut SessionContext, event: Value) -> RealtimeResult<()>;
}

impl<F> EventHandler for F
where
    F: Fn(&mut SessionContext, Value) -> RealtimeResult<()> + Send + Sync,
{
    fn handle(&self, ctx: &mut SessionContext, event: Value) -> RealtimeResult<()> {
        self(ctx, event)
    }
}

#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<&'static str, Box<dyn EventHandler>>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with every built-in realtime handler registered.
    pub fn realtime() -> RealtimeResult<Self> {
        let mut router = Self::new();
        handlers::register_all(&mut router)?;
        Ok(router)
    }

    pub fn register<H>(&mut self, event_type: &'static str, handler: H) -> RealtimeResult<()>
    where
        H: EventHandler + 'static,
    {
        if self.handlers.contains_key(event_type) {
            return Err(RealtimeError::DuplicateHandler(event_type.to_string()));
        }
        debug!(event_type, "Registered realtime event handler");
        self.handlers.insert(event_type, Box::new(handler));
        Ok(())
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Route `event` to the handler registered for its `type`.
    ///
    /// Unknown types are reported as [`RealtimeError::UnknownEventType`]
    /// without touching the session; surfacing that to the client is up to
    /// the caller.
    pub fn dispatch(&self, ctx: &mut SessionContext, event: Value) -> RealtimeResult<()> {
        let event_type = event
            .get("type")
            .and_then(Value::as_str)
            .ok_or(RealtimeError::MissingEventType)?
            .to_string();

        let Some(handler) = self.handlers.get(event_type.as_str()) else {
            warn!(event_type = %event_type, "No handler registered for event type");
            return Err(RealtimeError::UnknownEventType(event_type));
        };

        debug!(event_type = %event_type, "Dispatching realtime event");
        handler.handle(ctx, event)
    }
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut event_types: Vec<_> = self.handlers.keys().collect();
        event_types.sort();
        f.debug_struct("EventRouter")
            .field("event_types", &event_types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use serde_json::json;

    use super::*;
    use crate::{
        config::SessionDefaults,
        context::{EventPublisher, SessionContext},
    };

    fn noop(_: &mut SessionContext, _: Value) -> RealtimeResult<()> {
        Ok(())
    }

    fn context() -> SessionContext {
        let (publisher, _rx) = EventPublisher::channel();
        SessionContext::new(SessionDefaults::default().new_session(), publisher)
    }

    #[test]
    fn test_dispatch_invokes_registered_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut router = EventRouter::new();
        router
            .register("ping", move |_: &mut SessionContext, _: Value| -> RealtimeResult<()> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        let mut ctx = context();
        router.dispatch(&mut ctx, json!({"type": "ping"})).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut router = EventRouter::new();
        router.register("ping", noop).unwrap();
        let err = router.register("ping", noop).unwrap_err();
        assert!(matches!(err, RealtimeError::DuplicateHandler(t) if t == "ping"));
    }

    #[test]
    fn test_unknown_event_type_leaves_session_unchanged() {
        let router = EventRouter::realtime().unwrap();
        let mut ctx = context();
        let before = ctx.session();

        let err = router
            .dispatch(&mut ctx, json!({"type": "response.create"}))
            .unwrap_err();
        assert!(matches!(err, RealtimeError::UnknownEventType(t) if t == "response.create"));
        assert_eq!(*ctx.session(), *before);
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let router = EventRouter::realtime().unwrap();
        let mut ctx = context();
        assert!(matches!(
            router.dispatch(&mut ctx, json!({"session": {}})),
            Err(RealtimeError::MissingEventType)
        ));
    }

    #[test]
    fn test_realtime_router_handles_session_update() {
        let router = EventRouter::realtime().unwrap();
        assert!(router.contains("session.update"));
        assert!(!router.contains("response.create"));
    }
}
