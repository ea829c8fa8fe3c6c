//! Headless mode: render the session to stdout instead of a terminal UI
//!
//! Three output formats are supported:
//!
//! - `lines`: one plain line per entry, `HH:MM:SS.mmm LEVEL [service] raw`,
//!   with ANSI codes stripped. Suitable for `grep` and friends.
//! - `json`: NDJSON events, one per line, each with an `"event"` tag.
//! - `html`: one `<div class="log-entry">` fragment per entry, every field
//!   HTML-escaped.
//!
//! # Example JSON output
//!
//! ```json
//! {"event":"started","url":"ws://127.0.0.1:8000/ws","log_file":"...","timestamp":1704700001000}
//! {"event":"status","label":"Live","live":true,"timestamp":1704700001050}
//! {"event":"entry","entry":{"timestamp":"2024-05-01T10:00:00.123","level":"INFO","service":"api","raw":"ok"},"timestamp":1704700002000}
//! ```

pub mod runner;
pub mod sink;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use logtail_app::SessionStats;
use logtail_core::{FilterState, LogEntry};

/// Events emitted in `json` format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Session starting
    Started {
        url: String,
        log_file: Option<String>,
        timestamp: i64,
    },

    /// Connection status changed
    Status {
        label: String,
        live: bool,
        timestamp: i64,
    },

    /// Filter inputs changed
    Filters {
        filters: FilterState,
        timestamp: i64,
    },

    /// Displayed entries replaced (history or filter change), display order
    History {
        entries: Vec<LogEntry>,
        timestamp: i64,
    },

    /// One new live entry
    Entry { entry: LogEntry, timestamp: i64 },

    /// Displayed entries cleared
    Cleared { timestamp: i64 },

    /// Session ended
    Stopped {
        history_batches: u64,
        live_entries: u64,
        ignored_messages: u64,
        dropped_sends: u64,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event to stdout as one JSON line
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Write this event as one JSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn started(url: &str, log_file: Option<String>) -> Self {
        Self::Started {
            url: url.to_string(),
            log_file,
            timestamp: Self::now(),
        }
    }

    pub fn status(label: &str, live: bool) -> Self {
        Self::Status {
            label: label.to_string(),
            live,
            timestamp: Self::now(),
        }
    }

    pub fn filters(filters: &FilterState) -> Self {
        Self::Filters {
            filters: filters.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn history(entries: Vec<LogEntry>) -> Self {
        Self::History {
            entries,
            timestamp: Self::now(),
        }
    }

    pub fn entry(entry: LogEntry) -> Self {
        Self::Entry {
            entry,
            timestamp: Self::now(),
        }
    }

    pub fn cleared() -> Self {
        Self::Cleared {
            timestamp: Self::now(),
        }
    }

    pub fn stopped(stats: &SessionStats) -> Self {
        Self::Stopped {
            history_batches: stats.history_batches,
            live_entries: stats.live_entries,
            ignored_messages: stats.ignored_messages,
            dropped_sends: stats.dropped_sends,
            timestamp: Self::now(),
        }
    }
}
