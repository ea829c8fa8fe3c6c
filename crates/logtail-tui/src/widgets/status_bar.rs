//! Status bar widget
//!
//! Connection indicator, entry count, scroll position and session counters.

use logtail_app::SessionState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

pub struct StatusBar<'a> {
    state: &'a SessionState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a SessionState) -> Self {
        Self { state }
    }

    fn connection_indicator(&self) -> Span<'static> {
        let style = styles::connection_indicator(self.state.connection);
        Span::styled(
            format!("● {}", self.state.status_label()),
            style.add_modifier(Modifier::BOLD),
        )
    }

    fn entry_count(&self) -> Span<'static> {
        let buffer = &self.state.buffer;
        Span::styled(
            format!("{}/{} entries", buffer.len(), buffer.capacity()),
            styles::text_secondary(),
        )
    }

    fn scroll_indicator(&self) -> Span<'static> {
        match self.state.log_view.offset {
            0 => Span::styled("⬆ Newest", Style::default().fg(palette::STATUS_GREEN)),
            n => Span::styled(
                format!("⬇ {} newer", n),
                Style::default().fg(palette::STATUS_YELLOW),
            ),
        }
    }

    /// Why the last connection ended, while not live
    fn close_reason(&self) -> Option<Span<'static>> {
        if self.state.is_live() {
            return None;
        }
        self.state
            .last_close_reason
            .as_ref()
            .map(|reason| Span::styled(reason.clone(), styles::text_muted()))
    }

    fn counters(&self) -> Option<Span<'static>> {
        let stats = &self.state.stats;
        let mut parts = Vec::new();
        if stats.ignored_messages > 0 {
            parts.push(format!("{} ignored", stats.ignored_messages));
        }
        if stats.dropped_sends > 0 {
            parts.push(format!("{} unsent", stats.dropped_sends));
        }
        if parts.is_empty() {
            return None;
        }
        Some(Span::styled(
            parts.join(", "),
            Style::default().fg(palette::STATUS_YELLOW),
        ))
    }

    fn build_segments(&self) -> Vec<Span<'static>> {
        let separator = Span::styled(" │ ", styles::text_muted());

        let mut segments = vec![
            Span::raw(" "),
            self.connection_indicator(),
            separator.clone(),
            self.entry_count(),
            separator.clone(),
            self.scroll_indicator(),
        ];

        for extra in [self.counters(), self.close_reason()].into_iter().flatten() {
            segments.push(separator.clone());
            segments.push(extra);
        }
        segments
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(self.build_segments())).render(area, buf);
    }
}
