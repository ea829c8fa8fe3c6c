//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `connection`: Connection lifecycle and reconnection policy
//! - `inbound`: `history` / `new_log` dispatch into the buffer
//! - `filters`: Filter edits and their propagation
//! - `keys`: Key handling for interactive frontends

pub(crate) mod connection;
pub(crate) mod filters;
pub(crate) mod inbound;
pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::time::Duration;

use logtail_stream::{ConnectionId, OutboundMessage};

use crate::debounce::DebounceTicket;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Side effects the event loop performs after an update, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Open a transport for the given attempt, replacing the current one
    Connect(ConnectionId),

    /// Send a request on the current transport (dropped unless open)
    Send(OutboundMessage),

    /// Close the current transport; its `Closed` event follows
    CloseTransport,

    /// Deliver [`Message::ReconnectDelayElapsed`] after the delay
    ScheduleReconnect(Duration),

    /// (Re)start the debounce timer for a filter propagation
    Debounce(DebounceTicket),

    /// Abort every pending debounce timer
    CancelDebounces,

    /// Abort every pending timer and close the transport
    Shutdown,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the event loop, executed in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            actions,
        }
    }
}
