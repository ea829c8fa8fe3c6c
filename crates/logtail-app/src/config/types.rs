//! Configuration types for logtail
//!
//! Defines `Settings` and its per-section structs. Every field has a serde
//! default so a partial `config.toml` only overrides what it names.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use logtail_core::{FilterState, DEFAULT_CAPACITY};

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(default)]
    pub buffer: BufferSettings,

    #[serde(default)]
    pub filters: FilterSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Stream connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// `ws://`/`wss://` stream URL, or the `http(s)://` address of the source
    #[serde(default = "default_url")]
    pub url: String,

    /// Fixed delay between a closure and the next connection attempt
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

impl ConnectionSettings {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

fn default_url() -> String {
    "ws://127.0.0.1:8000/ws".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

/// Display buffer settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BufferSettings {
    /// Maximum number of displayed entries (0 is treated as 1)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Filter propagation settings and the initial filter values
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterSettings {
    /// Inactivity window before a text filter edit is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Share one debounce timer between the query and service inputs
    #[serde(default)]
    pub coalesce_fields: bool,

    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub level: String,

    #[serde(default)]
    pub service: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            coalesce_fields: false,
            query: String::new(),
            level: String::new(),
            service: String::new(),
        }
    }
}

impl FilterSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Filter state the session starts with
    pub fn initial_state(&self) -> FilterState {
        FilterState::new(&self.query, &self.level, &self.service)
    }
}

fn default_debounce_ms() -> u64 {
    300
}

/// Presentation settings shared by the render adapters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    #[serde(default = "default_true")]
    pub show_service: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            show_service: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Session-level knobs derived from [`Settings`] after CLI overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub capacity: usize,
    pub reconnect_delay: Duration,
    pub debounce: Duration,
    pub coalesce_fields: bool,
    pub initial_filters: FilterState,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Settings::default().session_config()
    }
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            capacity: self.buffer.capacity.max(1),
            reconnect_delay: self.connection.reconnect_delay(),
            debounce: self.filters.debounce(),
            coalesce_fields: self.filters.coalesce_fields,
            initial_filters: self.filters.initial_state(),
        }
    }
}
