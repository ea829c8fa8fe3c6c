//! Session state (the Model in TEA)

use std::time::Duration;

use logtail_core::{BoundedLogBuffer, FilterField, FilterState};
use logtail_stream::ConnectionId;

use crate::config::SessionConfig;
use crate::debounce::TicketBook;

/// Connection lifecycle as tracked by the session controller.
///
/// ```text
/// Disconnected ──Start──▶ Connecting ──Opened──▶ Connected
///                            ▲   │                  │
///                   delay    │   │ Closed      Closed/Error
///                   elapsed  │   ▼                  ▼
///                          Reconnecting ◀───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

impl ConnectionState {
    /// Status label shown by render adapters
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Live",
            ConnectionState::Reconnecting => "Reconnecting...",
        }
    }

    /// `true` only while live entries can arrive
    pub fn is_live(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Whether the event loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Running,
    Quitting,
}

/// Counters surfaced in status output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// `history` messages applied
    pub history_batches: u64,
    /// `new_log` entries applied
    pub live_entries: u64,
    /// Inbound frames dropped as malformed or of unknown type
    pub ignored_messages: u64,
    /// Outbound requests dropped because the transport was not open
    pub dropped_sends: u64,
    /// Connection attempts made (including the first)
    pub connect_attempts: u64,
}

/// Which part of an interactive frontend receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys navigate the log list
    #[default]
    Browse,
    /// Keys edit the given filter input
    Edit(FilterField),
}

/// Scroll position of the log list, counted in rows from the newest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogViewState {
    pub offset: usize,
}

impl LogViewState {
    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    /// Scroll towards older entries, never past the last one
    pub fn scroll_down(&mut self, rows: usize, len: usize) {
        self.offset = (self.offset + rows).min(len.saturating_sub(1));
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self, len: usize) {
        self.offset = len.saturating_sub(1);
    }

    /// Keep the offset valid after the buffer shrank
    pub fn clamp(&mut self, len: usize) {
        self.offset = self.offset.min(len.saturating_sub(1));
    }
}

/// Complete session state.
///
/// One instance per session. Owns the filter state, the display buffer and
/// the connection state; only the update function mutates it.
#[derive(Debug)]
pub struct SessionState {
    pub connection: ConnectionState,
    /// Attempt whose transport events are accepted; older ones are stale
    pub connection_id: ConnectionId,
    pub filters: FilterState,
    pub buffer: BoundedLogBuffer,
    pub config: SessionConfig,
    pub stats: SessionStats,
    pub phase: Phase,
    /// Reason reported by the most recent closure
    pub last_close_reason: Option<String>,
    pub input_mode: InputMode,
    pub log_view: LogViewState,
    /// Outstanding debounce firings; stale ones are ignored on arrival
    pub debounce_tickets: TicketBook,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            connection_id: ConnectionId::default(),
            filters: config.initial_filters.clone(),
            buffer: BoundedLogBuffer::new(config.capacity),
            config,
            stats: SessionStats::default(),
            phase: Phase::Running,
            last_close_reason: None,
            input_mode: InputMode::Browse,
            log_view: LogViewState::default(),
            debounce_tickets: TicketBook::default(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.connection.label()
    }

    pub fn is_live(&self) -> bool {
        self.connection.is_live()
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.config.reconnect_delay
    }

    pub fn should_quit(&self) -> bool {
        self.phase == Phase::Quitting
    }

    /// Start a new connection attempt and return its id
    pub(crate) fn begin_attempt(&mut self) -> ConnectionId {
        self.connection_id = self.connection_id.next();
        self.connection = ConnectionState::Connecting;
        self.stats.connect_attempts += 1;
        self.connection_id
    }
}
