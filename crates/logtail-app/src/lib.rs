//! logtail-app - Session controller and orchestration for logtail
//!
//! Implements the stream session as a TEA (The Elm Architecture) state
//! machine: [`SessionState`] is the model, [`handler::update`] the update
//! function, and the [`Engine`] executes the resulting [`UpdateAction`]s
//! (connects, sends, timers) and notifies a [`RenderSink`].
//!
//! Also home to configuration loading and the keyed [`Debouncer`].

pub mod config;
pub mod debounce;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod render;
pub mod signals;
pub mod state;

// Re-export primary types
pub use config::{SessionConfig, Settings};
pub use debounce::{DebounceKey, DebounceTicket, Debouncer, TicketBook};
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use render::{NullSink, RenderSink};
pub use state::{ConnectionState, InputMode, LogViewState, SessionState, SessionStats};
