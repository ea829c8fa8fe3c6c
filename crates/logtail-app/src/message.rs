//! Message types for the session event loop (TEA pattern)
//!
//! Every input to the session arrives as a [`Message`] on one queue:
//! transport events, timer expiries, user input and shutdown requests.
//! Handling them one at a time in arrival order is what serializes all
//! mutation of the filter state, the buffer and the connection state.

use logtail_core::FilterField;
use logtail_stream::StreamEvent;

use crate::debounce::DebounceTicket;
use crate::input_key::InputKey;

/// All messages handled by the session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Open the first connection
    Start,
    /// Stop the event loop; aborts timers and closes the transport
    Quit,

    // ─────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────
    /// Lifecycle or data event from a transport, tagged with its attempt
    Transport(StreamEvent),
    /// The fixed reconnection delay elapsed
    ReconnectDelayElapsed,

    // ─────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────
    /// A filter input changed to `value`
    FilterChanged { field: FilterField, value: String },
    /// A debounce window closed without further edits
    DebounceElapsed(DebounceTicket),
    /// Drop every displayed entry
    ClearLogs,

    // ─────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────
    /// Key press from an interactive frontend
    Key(InputKey),
}

impl Message {
    /// Shorthand for [`Message::FilterChanged`]
    pub fn filter(field: FilterField, value: impl Into<String>) -> Self {
        Message::FilterChanged {
            field,
            value: value.into(),
        }
    }
}
