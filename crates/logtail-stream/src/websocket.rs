//! WebSocket transport over `tokio-tungstenite`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        WsConnector                            │
//! │                                                               │
//! │  ┌────────────────┐        ┌──────────────────────────────┐   │
//! │  │ TransportHandle│        │   Transport task (per id)     │   │
//! │  │                │        │                                │   │
//! │  │  send() ───────┼──cmd──▶│  WebSocket read/write loop    │   │
//! │  │  close()       │  chan   │                                │   │
//! │  │  is_open() ◀───┼─state──│  text frame → StreamEvent     │   │
//! │  └────────────────┘        └──────────────┬───────────────┘   │
//! │                                           │ events chan       │
//! └───────────────────────────────────────────┼───────────────────┘
//!                                             ▼
//!                                     session event loop
//! ```
//!
//! The task never reconnects on its own; reconnection policy belongs to the
//! session controller, which opens a fresh transport per attempt.

use std::sync::{Arc, RwLock};

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use logtail_core::prelude::*;

use crate::transport::{
    set_transport_state, ConnectionId, Connector, StreamEvent, TransportCommand, TransportEvent,
    TransportHandle, TransportState,
};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Opens WebSocket transports to a fixed endpoint
#[derive(Debug, Clone)]
pub struct WsConnector {
    endpoint: Url,
}

impl WsConnector {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Connector for WsConnector {
    fn connect(&self, id: ConnectionId, events: mpsc::Sender<StreamEvent>) -> TransportHandle {
        let (handle, cmd_rx, state) = TransportHandle::new(id);
        tokio::spawn(run_transport(
            self.endpoint.to_string(),
            id,
            cmd_rx,
            events,
            state,
        ));
        handle
    }
}

// ---------------------------------------------------------------------------
// Transport task
// ---------------------------------------------------------------------------

/// Entry point of one transport task. Emits `Closed` exactly once on exit.
async fn run_transport(
    endpoint: String,
    id: ConnectionId,
    mut cmd_rx: mpsc::UnboundedReceiver<TransportCommand>,
    events: mpsc::Sender<StreamEvent>,
    state: Arc<RwLock<TransportState>>,
) {
    info!("Transport {}: connecting to {}", id, endpoint);

    let reason = match connect_async(endpoint.as_str()).await {
        Ok((ws_stream, _response)) => {
            set_transport_state(&state, TransportState::Open);
            info!("Transport {}: open", id);
            emit(&events, id, TransportEvent::Opened).await;
            run_io_loop(ws_stream, id, &mut cmd_rx, &events).await
        }
        Err(err) => {
            warn!("Transport {}: connect failed: {}", id, err);
            Some(format!("connect failed: {err}"))
        }
    };

    set_transport_state(&state, TransportState::Closed);
    emit(&events, id, TransportEvent::Closed { reason }).await;
    debug!("Transport {}: task exiting", id);
}

/// Run one connection's read/write select loop.
///
/// Returns the close reason. After a read error the loop stops reading and
/// waits for the session's `Close` command (or for every handle to drop), so
/// the session decides when the closure happens.
async fn run_io_loop(
    ws_stream: WsStream,
    id: ConnectionId,
    cmd_rx: &mut mpsc::UnboundedReceiver<TransportCommand>,
    events: &mpsc::Sender<StreamEvent>,
) -> Option<String> {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();
    let mut failed: Option<String> = None;

    loop {
        tokio::select! {
            // ── Incoming WebSocket frame ─────────────────────────────────
            frame = ws_stream.next(), if failed.is_none() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        emit(events, id, TransportEvent::Message(text.as_str().to_string())).await;
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        debug!("Transport {}: received Close frame", id);
                        let reason = match frame {
                            Some(f) => format!(
                                "closed by server ({}): {}",
                                u16::from(f.code),
                                f.reason.as_str()
                            ),
                            None => "closed by server".to_string(),
                        };
                        return Some(reason);
                    }
                    Some(Ok(WsMessage::Binary(bytes))) => {
                        debug!("Transport {}: ignoring {} byte binary frame", id, bytes.len());
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong/raw frames
                    }
                    Some(Err(err)) => {
                        warn!("Transport {}: WebSocket read error: {}", id, err);
                        let message = err.to_string();
                        emit(events, id, TransportEvent::Error(message.clone())).await;
                        failed = Some(message);
                    }
                    None => {
                        debug!("Transport {}: WebSocket stream ended", id);
                        return Some("stream ended".to_string());
                    }
                }
            }

            // ── Command from the session ─────────────────────────────────
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(TransportCommand::Send(text)) => {
                        if failed.is_some() {
                            debug!("Transport {}: failed, dropping outbound frame", id);
                            continue;
                        }
                        if let Err(err) = ws_sink.send(WsMessage::Text(text.into())).await {
                            warn!("Transport {}: WebSocket write error: {}", id, err);
                            let message = err.to_string();
                            emit(events, id, TransportEvent::Error(message.clone())).await;
                            failed = Some(message);
                        }
                    }
                    Some(TransportCommand::Close) => {
                        send_close(&mut ws_sink).await;
                        return Some(
                            failed
                                .map(|e| format!("closed after error: {e}"))
                                .unwrap_or_else(|| "closed by client".to_string()),
                        );
                    }
                    None => {
                        debug!("Transport {}: all handles dropped, shutting down", id);
                        send_close(&mut ws_sink).await;
                        return failed.or_else(|| Some("handle dropped".to_string()));
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Deliver an event, logging if the session side is gone
async fn emit(events: &mpsc::Sender<StreamEvent>, id: ConnectionId, event: TransportEvent) {
    if events.send(StreamEvent::new(id, event)).await.is_err() {
        debug!("Transport {}: event channel closed", id);
    }
}

/// Send a WebSocket Close frame, ignoring any write errors.
async fn send_close(ws_sink: &mut SplitSink<WsStream, WsMessage>) {
    let _ = ws_sink.send(WsMessage::Close(None)).await;
    let _ = ws_sink.close().await;
}
