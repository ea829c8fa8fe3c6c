//! Transport abstraction consumed by the session controller.
//!
//! A [`Connector`] opens one transport per connection attempt. Each attempt
//! is identified by a [`ConnectionId`] and reports its lifecycle as
//! [`StreamEvent`]s on a channel:
//!
//! ```text
//! Opened → Message* → (Error)? → Closed      successful attempt
//! Closed                                     attempt that never opened
//! ```
//!
//! `Closed` is emitted exactly once per attempt. The session talks back
//! through the [`TransportHandle`] returned by `connect`.

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;

use logtail_core::prelude::*;

/// Capacity of the stream event channel (bounded, bursts of live logs)
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Identifies one connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle and data events of one transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The transport is open; sends are now accepted
    Opened,
    /// One inbound text frame
    Message(String),
    /// Transport-level failure; a `Closed` follows once the transport is closed
    Error(String),
    /// The transport is gone (clean close, failure, or never opened)
    Closed { reason: Option<String> },
}

/// A [`TransportEvent`] tagged with the attempt that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub id: ConnectionId,
    pub event: TransportEvent,
}

impl StreamEvent {
    pub fn new(id: ConnectionId, event: TransportEvent) -> Self {
        Self { id, event }
    }
}

/// Readiness of a transport as seen from its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Connecting,
    Open,
    Closed,
}

/// Commands from the session to a running transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    /// Write one text frame
    Send(String),
    /// Close the transport; its task emits `Closed` and exits
    Close,
}

/// Session-side handle to one transport.
///
/// Dropping every handle closes the command channel, which ends the
/// transport task.
#[derive(Clone)]
pub struct TransportHandle {
    id: ConnectionId,
    cmd_tx: mpsc::UnboundedSender<TransportCommand>,
    state: Arc<RwLock<TransportState>>,
}

impl std::fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}

impl TransportHandle {
    /// Create a handle plus the pieces the transport side keeps: the command
    /// receiver and the shared readiness cell.
    pub fn new(
        id: ConnectionId,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<TransportCommand>,
        Arc<RwLock<TransportState>>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let state = Arc::new(RwLock::new(TransportState::Connecting));
        let handle = Self {
            id,
            cmd_tx,
            state: Arc::clone(&state),
        };
        (handle, cmd_rx, state)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> TransportState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Readiness query: `true` only while the transport is open
    pub fn is_open(&self) -> bool {
        self.state() == TransportState::Open
    }

    /// Queue a text frame.
    ///
    /// Returns `false` (and drops the frame) unless the transport is open.
    pub fn send(&self, text: String) -> bool {
        if !self.is_open() {
            debug!("Transport {}: not open, dropping outbound frame", self.id);
            return false;
        }
        self.cmd_tx.send(TransportCommand::Send(text)).is_ok()
    }

    /// Ask the transport to close. Idempotent.
    pub fn close(&self) {
        let _ = self.cmd_tx.send(TransportCommand::Close);
    }
}

/// Update the shared readiness cell from the transport side
pub fn set_transport_state(state: &RwLock<TransportState>, new_state: TransportState) {
    let mut guard = state.write().unwrap_or_else(|e| e.into_inner());
    *guard = new_state;
}

/// Opens transports. Implementations spawn their own I/O task and report
/// through `events`.
pub trait Connector: Send + Sync {
    fn connect(&self, id: ConnectionId, events: mpsc::Sender<StreamEvent>) -> TransportHandle;
}
