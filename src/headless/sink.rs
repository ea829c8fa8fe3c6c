//! Render sinks writing to a byte stream

use std::io::Write;

use logtail_app::config::UiSettings;
use logtail_app::RenderSink;
use logtail_core::{escape_html, strip_ansi_codes, BoundedLogBuffer, FilterState, LogEntry};
use tracing::{error, info};

use super::HeadlessEvent;

/// What changed in the buffer since the last notification
#[derive(Debug, PartialEq, Eq)]
pub enum BufferDelta<'a> {
    Unchanged,
    /// Buffer emptied
    Cleared,
    /// Contents replaced; all rows in display order
    Replaced(Vec<&'a LogEntry>),
    /// New rows at the head, display order (newest first)
    Prepended(Vec<&'a LogEntry>),
}

/// Works out which rows are new, given only successive buffer states.
///
/// Within one buffer generation every revision step is a single live insert
/// at the head, so `n` steps mean the top `n` rows are new (capped at the
/// buffer length when inserts outran the capacity). A generation change
/// means the contents were replaced.
#[derive(Debug, Default)]
pub struct RowTracker {
    revision: u64,
    generation: u64,
}

impl RowTracker {
    pub fn observe<'a>(&mut self, buffer: &'a BoundedLogBuffer) -> BufferDelta<'a> {
        let revision = buffer.revision();
        if revision == self.revision {
            return BufferDelta::Unchanged;
        }
        let steps = usize::try_from(revision.saturating_sub(self.revision)).unwrap_or(usize::MAX);
        self.revision = revision;

        let generation = buffer.generation();
        let replaced = generation != self.generation;
        self.generation = generation;

        if buffer.is_empty() {
            BufferDelta::Cleared
        } else if replaced {
            BufferDelta::Replaced(buffer.iter().collect())
        } else {
            BufferDelta::Prepended(buffer.iter().take(steps).collect())
        }
    }
}

/// Plain-text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Lines,
    Html,
}

/// Writes one line per new entry, oldest first.
///
/// Status changes go to the log file, not the output stream.
pub struct TextSink<W: Write> {
    out: W,
    format: TextFormat,
    ui: UiSettings,
    rows: RowTracker,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, format: TextFormat, ui: UiSettings) -> Self {
        Self {
            out,
            format,
            ui,
            rows: RowTracker::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            TextFormat::Lines => format_line(entry, &self.ui),
            TextFormat::Html => format_html(entry),
        }
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn status_changed(&mut self, label: &str, is_live: bool) {
        info!("Status: {} (live: {})", label, is_live);
    }

    fn buffer_changed(&mut self, buffer: &BoundedLogBuffer) {
        let rows = match self.rows.observe(buffer) {
            BufferDelta::Replaced(rows) | BufferDelta::Prepended(rows) => rows,
            BufferDelta::Unchanged | BufferDelta::Cleared => return,
        };

        let text: String = rows
            .iter()
            .rev()
            .map(|entry| self.format_entry(entry) + "\n")
            .collect();

        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            error!("Failed to write entries: {}", e);
        }
    }
}

/// `HH:MM:SS.mmm LEVEL [service] raw`, ANSI codes stripped
pub fn format_line(entry: &LogEntry, ui: &UiSettings) -> String {
    let mut line = String::new();
    if ui.show_timestamps {
        line.push_str(entry.display_time());
        line.push(' ');
    }
    line.push_str(&strip_ansi_codes(&entry.level));
    line.push(' ');
    if ui.show_service {
        line.push('[');
        line.push_str(&strip_ansi_codes(&entry.service));
        line.push_str("] ");
    }
    // Embedded newlines would split one entry across output lines
    line.push_str(&strip_ansi_codes(&entry.raw).replace(['\r', '\n'], " "));
    line
}

/// One log entry as an HTML fragment; every field is escaped
pub fn format_html(entry: &LogEntry) -> String {
    let level = escape_html(&entry.level);
    format!(
        concat!(
            r#"<div class="log-entry">"#,
            r#"<span class="log-ts">{}</span>"#,
            r#"<span class="log-level level-{}">{}</span>"#,
            r#"<span class="log-service">[{}]</span>"#,
            r#"<span class="log-msg">{}</span>"#,
            "</div>"
        ),
        escape_html(entry.display_time()),
        level,
        level,
        escape_html(&entry.service),
        escape_html(&entry.raw),
    )
}

/// NDJSON event stream
pub struct JsonSink<W: Write> {
    out: W,
    rows: RowTracker,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: RowTracker::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, event: HeadlessEvent) {
        if let Err(e) = event.write_to(&mut self.out) {
            error!("Failed to write headless event: {}", e);
        }
    }
}

impl<W: Write> RenderSink for JsonSink<W> {
    fn status_changed(&mut self, label: &str, is_live: bool) {
        self.write(HeadlessEvent::status(label, is_live));
    }

    fn buffer_changed(&mut self, buffer: &BoundedLogBuffer) {
        let event_batch = match self.rows.observe(buffer) {
            BufferDelta::Unchanged => return,
            BufferDelta::Cleared => vec![HeadlessEvent::cleared()],
            BufferDelta::Replaced(rows) => {
                vec![HeadlessEvent::history(rows.into_iter().cloned().collect())]
            }
            BufferDelta::Prepended(rows) => rows
                .into_iter()
                .rev()
                .map(|entry| HeadlessEvent::entry(entry.clone()))
                .collect(),
        };
        for event in event_batch {
            self.write(event);
        }
    }

    fn filters_changed(&mut self, filters: &FilterState) {
        self.write(HeadlessEvent::filters(filters));
    }
}
