//! # logtail-stream - Stream Protocol and Transport
//!
//! Everything that touches the wire:
//!
//! - [`protocol`] - `history` / `new_log` / `update_filters` message types
//! - [`endpoint`] - resolve user input into the stream's WebSocket URL
//! - [`transport`] - [`Connector`] / [`TransportHandle`] abstraction
//! - [`websocket`] - the `tokio-tungstenite` implementation

pub mod endpoint;
pub mod protocol;
pub mod transport;
pub mod websocket;

pub use endpoint::{resolve_endpoint, STREAM_PATH};
pub use protocol::{parse_inbound, InboundMessage, OutboundMessage, ParsedFrame};
pub use transport::{
    set_transport_state, ConnectionId, Connector, StreamEvent, TransportCommand, TransportEvent,
    TransportHandle, TransportState, EVENT_CHANNEL_CAPACITY,
};
pub use websocket::WsConnector;
