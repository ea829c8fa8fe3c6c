//! Semantic style builders

use logtail_app::ConnectionState;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

/// Rounded block with the border color reflecting focus
pub fn input_block(title: &str, focused: bool) -> Block<'static> {
    let (border, title_style) = if focused {
        (border_active(), accent().add_modifier(Modifier::BOLD))
    } else {
        (border_inactive(), text_secondary())
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(ratatui::text::Span::styled(format!(" {} ", title), title_style))
}

/// Dot color for the connection indicator
pub fn connection_indicator(state: ConnectionState) -> Style {
    let color = match state {
        ConnectionState::Connected => palette::STATUS_GREEN,
        ConnectionState::Connecting | ConnectionState::Reconnecting => palette::STATUS_YELLOW,
        ConnectionState::Disconnected => palette::STATUS_RED,
    };
    Style::default().fg(color)
}

/// Badge and message styles for a level tag.
///
/// Levels are free strings from the source; unknown tags get the plain style.
pub fn level_styles(level: &str) -> (Style, Style) {
    match level.to_ascii_uppercase().as_str() {
        "ERROR" | "CRITICAL" | "FATAL" => (
            Style::default()
                .fg(palette::LOG_ERROR)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette::LOG_ERROR_MSG),
        ),
        "WARN" | "WARNING" => (
            Style::default().fg(palette::LOG_WARNING),
            Style::default().fg(palette::LOG_WARNING),
        ),
        "INFO" => (Style::default().fg(palette::LOG_INFO), text_primary()),
        "DEBUG" | "TRACE" => (
            Style::default().fg(palette::LOG_DEBUG),
            Style::default().fg(palette::LOG_DEBUG),
        ),
        _ => (text_secondary(), text_primary()),
    }
}

pub fn service() -> Style {
    Style::default().fg(palette::LOG_SERVICE)
}
