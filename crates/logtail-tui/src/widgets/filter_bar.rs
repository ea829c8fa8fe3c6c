//! Filter bar widget
//!
//! Three inputs side by side: free-text query, level selector, service.

use logtail_core::{sanitize_for_terminal, FilterField, FilterState, LevelOption};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

const QUERY_PLACEHOLDER: &str = "Search messages...";
const SERVICE_PLACEHOLDER: &str = "Any service";
const LEVEL_WIDTH: u16 = 20;

pub struct FilterBar<'a> {
    filters: &'a FilterState,
    focus: Option<FilterField>,
}

impl<'a> FilterBar<'a> {
    pub fn new(filters: &'a FilterState, focus: Option<FilterField>) -> Self {
        Self { filters, focus }
    }

    fn is_focused(&self, field: FilterField) -> bool {
        self.focus == Some(field)
    }

    fn text_input(&self, field: FilterField, placeholder: &str, width: u16) -> Line<'static> {
        let focused = self.is_focused(field);
        let value = sanitize_for_terminal(self.filters.get(field));

        if value.is_empty() && !focused {
            return Line::from(Span::styled(placeholder.to_string(), styles::text_muted()));
        }

        // Keep the cursor in view by showing the tail of long values
        let room = usize::from(width).saturating_sub(1);
        let len = value.chars().count();
        let visible: String = if len > room {
            value.chars().skip(len - room).collect()
        } else {
            value
        };

        let mut spans = vec![Span::styled(visible, styles::text_primary())];
        if focused {
            spans.push(Span::styled("_", styles::accent()));
        }
        Line::from(spans)
    }

    fn level_selector(&self) -> Line<'static> {
        let label = match LevelOption::from_filter(&self.filters.level) {
            Some(option) => option.label().to_string(),
            None => sanitize_for_terminal(&self.filters.level),
        };

        if self.is_focused(FilterField::Level) {
            Line::from(vec![
                Span::styled("◂ ", styles::accent()),
                Span::styled(label, styles::text_primary()),
                Span::styled(" ▸", styles::accent()),
            ])
        } else {
            Line::from(Span::styled(label, styles::text_secondary()))
        }
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [query_area, level_area, service_area] = Layout::horizontal([
            Constraint::Fill(2),
            Constraint::Length(LEVEL_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        for (field, field_area) in [
            (FilterField::Query, query_area),
            (FilterField::Level, level_area),
            (FilterField::Service, service_area),
        ] {
            let block = styles::input_block(field.label(), self.is_focused(field));
            let inner = block.inner(field_area);
            block.render(field_area, buf);

            let line = match field {
                FilterField::Query => self.text_input(field, QUERY_PLACEHOLDER, inner.width),
                FilterField::Service => self.text_input(field, SERVICE_PLACEHOLDER, inner.width),
                FilterField::Level => self.level_selector(),
            };
            Paragraph::new(line).render(inner, buf);
        }
    }
}
