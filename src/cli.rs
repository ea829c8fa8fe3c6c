//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use logtail_app::Settings;

/// logtail - tail a streaming log source from the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "logtail")]
#[command(about = "Tail a realtime log stream with live filtering", long_about = None)]
pub struct Args {
    /// Log source URL (ws://, wss://, or an http(s):// base)
    #[arg(long)]
    pub url: Option<String>,

    /// Config file (defaults to <config dir>/logtail/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of displayed entries
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Delay before reconnecting after the connection drops
    #[arg(long, value_name = "MS")]
    pub reconnect_delay_ms: Option<u64>,

    /// Quiet window for text filter edits
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Initial free-text filter
    #[arg(long)]
    pub query: Option<String>,

    /// Initial level filter (ERROR, WARN, INFO, DEBUG)
    #[arg(long)]
    pub level: Option<String>,

    /// Initial service filter
    #[arg(long)]
    pub service: Option<String>,

    /// Run without the TUI, writing entries to stdout
    #[arg(long)]
    pub headless: bool,

    /// Output format in headless mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,

    /// Write a default config file and exit
    #[arg(long)]
    pub init_config: bool,
}

/// Headless output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `HH:MM:SS.mmm LEVEL [service] message`
    #[default]
    Lines,
    /// NDJSON events
    Json,
    /// HTML entry fragments
    Html,
}

impl Args {
    /// Overlay command-line values onto loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.url {
            settings.connection.url = url.clone();
        }
        if let Some(capacity) = self.capacity {
            settings.buffer.capacity = capacity;
        }
        if let Some(ms) = self.reconnect_delay_ms {
            settings.connection.reconnect_delay_ms = ms;
        }
        if let Some(ms) = self.debounce_ms {
            settings.filters.debounce_ms = ms;
        }
        if let Some(query) = &self.query {
            settings.filters.query = query.clone();
        }
        if let Some(level) = &self.level {
            settings.filters.level = level.clone();
        }
        if let Some(service) = &self.service {
            settings.filters.service = service.clone();
        }
    }
}
