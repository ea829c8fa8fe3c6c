//! Log list widget
//!
//! Renders the buffer newest first. Every field that came off the wire is
//! passed through [`sanitize_for_terminal`] before it reaches a cell.

use logtail_core::{sanitize_for_terminal, BoundedLogBuffer, LogEntry};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme::styles;

const LEVEL_WIDTH: usize = 5;

pub struct LogView<'a> {
    buffer: &'a BoundedLogBuffer,
    offset: usize,
    show_timestamps: bool,
    show_service: bool,
    filtered: bool,
}

impl<'a> LogView<'a> {
    pub fn new(buffer: &'a BoundedLogBuffer) -> Self {
        Self {
            buffer,
            offset: 0,
            show_timestamps: true,
            show_service: true,
            filtered: false,
        }
    }

    /// Rows skipped from the newest entry
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    pub fn show_service(mut self, show: bool) -> Self {
        self.show_service = show;
        self
    }

    /// Whether any filter is active (changes the empty-state text)
    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    fn format_entry(&self, entry: &LogEntry) -> Line<'static> {
        let (level_style, message_style) = styles::level_styles(&entry.level);
        let mut spans = Vec::with_capacity(6);

        if self.show_timestamps {
            spans.push(Span::styled(
                sanitize_for_terminal(entry.display_time()),
                styles::text_muted(),
            ));
            spans.push(Span::raw(" "));
        }

        spans.push(Span::styled(
            format!(
                "{:<width$} ",
                sanitize_for_terminal(&entry.level),
                width = LEVEL_WIDTH
            ),
            level_style,
        ));

        if self.show_service {
            spans.push(Span::styled(
                format!("[{}] ", sanitize_for_terminal(&entry.service)),
                styles::service(),
            ));
        }

        spans.push(Span::styled(
            sanitize_for_terminal(&entry.raw),
            message_style,
        ));
        Line::from(spans)
    }

    fn empty_message(&self) -> &'static str {
        if self.filtered {
            "No entries match the current filters"
        } else {
            "Waiting for logs..."
        }
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Logs ({}) ", self.buffer.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border_inactive())
            .title(Span::styled(title, styles::text_secondary()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.buffer.is_empty() {
            Paragraph::new(Span::styled(self.empty_message(), styles::text_muted()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let lines: Vec<Line> = self
            .buffer
            .iter()
            .skip(self.offset)
            .take(usize::from(inner.height))
            .map(|entry| self.format_entry(entry))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{entry, TestTerminal};

    fn buffer_with(n: u32) -> BoundedLogBuffer {
        let mut buffer = BoundedLogBuffer::new(100);
        buffer.insert_history((0..n).map(|i| entry(i, "INFO", "api")));
        buffer
    }

    #[test]
    fn test_newest_first_with_all_columns() {
        let mut buffer = buffer_with(2);
        buffer.insert_live(LogEntry::new(
            "2024-05-01T10:11:12.345678",
            "ERROR",
            "db",
            "disk full",
        ));

        let mut term = TestTerminal::with_size(60, 6);
        term.render_widget(LogView::new(&buffer), term.area());

        assert!(term.line_contains(1, "10:11:12.345 ERROR [db] disk full"));
        assert!(term.line_contains(2, "message 0"));
        assert!(term.line_contains(3, "message 1"));
        assert!(term.line_contains(0, "Logs (3)"));
    }

    #[test]
    fn test_hidden_columns() {
        let buffer = buffer_with(1);
        let mut term = TestTerminal::with_size(60, 4);
        term.render_widget(
            LogView::new(&buffer)
                .show_timestamps(false)
                .show_service(false),
            term.area(),
        );

        assert!(term.line_contains(1, "INFO  message 0"));
        assert!(!term.buffer_contains("[api]"));
        assert!(!term.buffer_contains("10:00:00"));
    }

    #[test]
    fn test_offset_skips_newest_rows() {
        let buffer = buffer_with(5);
        let mut term = TestTerminal::with_size(60, 4);
        term.render_widget(LogView::new(&buffer).offset(3), term.area());

        assert!(term.line_contains(1, "message 3"));
        assert!(term.line_contains(2, "message 4"));
    }

    #[test]
    fn test_control_sequences_do_not_reach_cells() {
        let mut buffer = BoundedLogBuffer::new(10);
        buffer.insert_live(LogEntry::new(
            "2024-05-01T10:00:00.000000",
            "INFO",
            "evil\nsvc",
            "\u{1b}[31mred\u{1b}[0m\r\nsecond",
        ));

        let mut term = TestTerminal::with_size(60, 4);
        term.render_widget(LogView::new(&buffer), term.area());

        assert!(term.line_contains(1, "[evil svc] red  second"));
        assert!(!term.content().contains('\u{1b}'));
    }

    #[test]
    fn test_empty_state_messages() {
        let buffer = BoundedLogBuffer::new(10);

        let mut term = TestTerminal::with_size(60, 5);
        term.render_widget(LogView::new(&buffer), term.area());
        assert!(term.buffer_contains("Waiting for logs..."));

        term.render_widget(LogView::new(&buffer).filtered(true), term.area());
        assert!(term.buffer_contains("No entries match the current filters"));
    }
}
