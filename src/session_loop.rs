//! Serialized event loop for a single realtime session.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{info, warn, Instrument};

use crate::{
    context::SessionContext,
    error::{RealtimeError, RealtimeResult},
    router::EventRouter,
};

/// One inbound item: a decoded client event, or the reason its frame could
/// not be decoded. Decode failures are reported in arrival order.
pub type InboundEvent = RealtimeResult<Value>;

/// Process inbound events for one session strictly in arrival order.
///
/// Each event is dispatched to completion before the next is received, so
/// handlers never observe a half-applied update. Failed events are reported
/// to the client as `error` events and leave the session unchanged. Returns
/// the final context once `inbound` is closed or the outbound sink is gone.
pub async fn run_session_loop(
    router: Arc<EventRouter>,
    mut ctx: SessionContext,
    mut inbound: mpsc::Receiver<InboundEvent>,
) -> SessionContext {
    let span = tracing::info_span!("realtime_session", session_id = %ctx.session().id);
    async move {
        info!("Realtime session event loop started");
        while let Some(event) = inbound.recv().await {
            let (client_event_id, result) = match event {
                Ok(event) => {
                    let client_event_id = event
                        .get("event_id")
                        .and_then(Value::as_str)
                        .map(str::to_owned);
                    (client_event_id, router.dispatch(&mut ctx, event))
                }
                Err(err) => (None, Err(err)),
            };
            let Err(err) = result else {
                continue;
            };
            if matches!(err, RealtimeError::SinkClosed) {
                warn!("Outbound sink closed, stopping session event loop");
                break;
            }
            warn!(error = %err, code = err.code(), "Realtime event rejected");
            if report_error(&ctx, &err, client_event_id).is_err() {
                warn!("Outbound sink closed, stopping session event loop");
                break;
            }
        }
        info!("Realtime session event loop finished");
        ctx
    }
    .instrument(span)
    .await
}

fn report_error(
    ctx: &SessionContext,
    err: &RealtimeError,
    client_event_id: Option<String>,
) -> Result<(), RealtimeError> {
    let publisher = ctx.publisher();
    publisher.publish(publisher.event().error(err.api_error(client_event_id)))
}
