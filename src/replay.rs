//! JSON-lines replay of client events against a single session.
//!
//! Every non-blank input line is one client event. Every server event is
//! written as one JSON line, in the order the session produced it.

use std::sync::Arc;

use realtime_protocol::realtime::ServerEvent;
use serde_json::Value;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::{info, warn};

use crate::{
    context::SessionContext,
    error::RealtimeError,
    router::EventRouter,
    session_loop::{run_session_loop, InboundEvent},
};

const INBOUND_CHANNEL_CAPACITY: usize = 256;

/// Drive one session from `reader` until input ends, writing its server
/// events to `writer`.
///
/// `outbound` must be the receiving end of the publisher held by `ctx`.
pub async fn replay<R, W>(
    router: Arc<EventRouter>,
    ctx: SessionContext,
    outbound: mpsc::UnboundedReceiver<ServerEvent>,
    reader: R,
    writer: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CHANNEL_CAPACITY);

    let session = async move {
        let ctx = run_session_loop(router, ctx, inbound_rx).await;
        info!(session_id = %ctx.session().id, "Session closed");
    };
    let feed = async move { feed_events(reader, &inbound_tx).await };

    let ((), fed, written) = tokio::join!(session, feed, write_events(outbound, writer));
    fed?;
    written
}

/// Forward each line of `reader` to the session loop.
///
/// Lines that are not JSON are forwarded as [`RealtimeError::MalformedEvent`]
/// so they are reported in order with the events around them.
pub async fn feed_events<R>(reader: R, inbound: &mpsc::Sender<InboundEvent>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str::<Value>(&line).map_err(|err| {
            warn!(error = %err, "Malformed event line");
            RealtimeError::MalformedEvent(err)
        });
        if inbound.send(event).await.is_err() {
            warn!("Session event loop stopped, dropping remaining input");
            break;
        }
    }
    Ok(())
}

/// Write server events as JSON lines until every publisher is gone.
pub async fn write_events<W>(
    mut outbound: mpsc::UnboundedReceiver<ServerEvent>,
    writer: &mut W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = outbound.recv().await {
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
    }
    writer.flush().await?;
    Ok(())
}
