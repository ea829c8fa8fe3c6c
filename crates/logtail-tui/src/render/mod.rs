//! Frame layout and the redraw sink

use logtail_app::config::UiSettings;
use logtail_app::{InputMode, RenderSink, SessionState};
use logtail_core::{BoundedLogBuffer, FilterField, FilterState};
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    Frame,
};

use crate::theme::styles;
use crate::widgets::{FilterBar, LogView, StatusBar};


/// Render the full UI
pub fn view(frame: &mut Frame, state: &SessionState, ui: &UiSettings) {
    let [filter_area, log_area, status_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let focus = match state.input_mode {
        InputMode::Edit(field) => Some(field),
        InputMode::Browse => None,
    };

    frame.render_widget(FilterBar::new(&state.filters, focus), filter_area);
    frame.render_widget(
        LogView::new(&state.buffer)
            .offset(state.log_view.offset)
            .show_timestamps(ui.show_timestamps)
            .show_service(ui.show_service)
            .filtered(state.filters.is_active()),
        log_area,
    );
    frame.render_widget(StatusBar::new(state), status_area);
    frame.render_widget(key_hints(state.input_mode), hint_area);
}

fn key_hints(mode: InputMode) -> Line<'static> {
    let hints: &[(&str, &str)] = match mode {
        InputMode::Browse => &[
            ("/", "search"),
            ("l", "level"),
            ("s", "service"),
            ("↑↓", "scroll"),
            ("c", "clear"),
            ("q", "quit"),
        ],
        InputMode::Edit(FilterField::Level) => &[
            ("←→", "change level"),
            ("Tab", "next field"),
            ("Enter", "done"),
        ],
        InputMode::Edit(_) => &[
            ("Tab", "next field"),
            ("Ctrl+U", "clear field"),
            ("Enter", "done"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(*key, styles::accent()));
        spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
    }
    Line::from(spans)
}

/// Sink that records whether anything visible changed since the last draw
#[derive(Debug)]
pub struct RedrawTracker {
    dirty: bool,
}

impl RedrawTracker {
    pub fn new() -> Self {
        Self { dirty: true }
    }

    /// Force a redraw on the next frame (input, resize)
    pub fn mark(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw is due and resets the flag
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for RedrawTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for RedrawTracker {
    fn status_changed(&mut self, _label: &str, _is_live: bool) {
        self.dirty = true;
    }

    fn buffer_changed(&mut self, _buffer: &BoundedLogBuffer) {
        self.dirty = true;
    }

    fn filters_changed(&mut self, _filters: &FilterState) {
        self.dirty = true;
    }
}
