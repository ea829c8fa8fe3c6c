//! Key handlers for interactive frontends

use logtail_core::{FilterField, LevelOption};

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{InputMode, SessionState};

/// Rows moved by PageUp/PageDown
const PAGE_ROWS: usize = 10;

/// Handle a key press.
///
/// Focus and scroll changes are applied directly; filter edits come back as
/// a [`Message::FilterChanged`] so they take the normal propagation path.
pub fn handle_key(state: &mut SessionState, key: InputKey) -> Option<Message> {
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.input_mode {
        InputMode::Browse => handle_key_browse(state, key),
        InputMode::Edit(FilterField::Level) => handle_key_level(state, key),
        InputMode::Edit(field) => handle_key_text_input(state, field, key),
    }
}

fn handle_key_browse(state: &mut SessionState, key: InputKey) -> Option<Message> {
    let len = state.buffer.len();
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        // Focus
        InputKey::Tab | InputKey::Char('/') => focus(state, FilterField::Query),
        InputKey::BackTab => focus(state, FilterField::Service),
        InputKey::Char('l') => focus(state, FilterField::Level),
        InputKey::Char('s') => focus(state, FilterField::Service),

        // Scrolling
        InputKey::Up | InputKey::Char('k') => {
            state.log_view.scroll_up(1);
            None
        }
        InputKey::Down | InputKey::Char('j') => {
            state.log_view.scroll_down(1, len);
            None
        }
        InputKey::PageUp => {
            state.log_view.scroll_up(PAGE_ROWS);
            None
        }
        InputKey::PageDown => {
            state.log_view.scroll_down(PAGE_ROWS, len);
            None
        }
        InputKey::Home | InputKey::Char('g') => {
            state.log_view.to_top();
            None
        }
        InputKey::End | InputKey::Char('G') => {
            state.log_view.to_bottom(len);
            None
        }

        InputKey::Char('c') | InputKey::CharCtrl('l') => Some(Message::ClearLogs),
        _ => None,
    }
}

fn handle_key_text_input(
    state: &mut SessionState,
    field: FilterField,
    key: InputKey,
) -> Option<Message> {
    let current = state.filters.get(field).to_string();
    match key {
        InputKey::Esc | InputKey::Enter => {
            state.input_mode = InputMode::Browse;
            None
        }
        InputKey::Tab => focus(state, field.next()),
        InputKey::BackTab => focus(state, field.prev()),
        InputKey::Char(c) => {
            let mut value = current;
            value.push(c);
            Some(Message::filter(field, value))
        }
        InputKey::Backspace => {
            if current.is_empty() {
                return None;
            }
            let mut value = current;
            value.pop();
            Some(Message::filter(field, value))
        }
        InputKey::CharCtrl('u') if !current.is_empty() => Some(Message::filter(field, "")),
        _ => None,
    }
}

fn handle_key_level(state: &mut SessionState, key: InputKey) -> Option<Message> {
    let current = LevelOption::from_filter(&state.filters.level).unwrap_or_default();
    let selected = match key {
        InputKey::Esc | InputKey::Enter => {
            state.input_mode = InputMode::Browse;
            return None;
        }
        InputKey::Char('q') => return Some(Message::Quit),
        InputKey::Tab => return focus(state, FilterField::Level.next()),
        InputKey::BackTab => return focus(state, FilterField::Level.prev()),
        InputKey::Left | InputKey::Up | InputKey::Char('h') => current.prev(),
        InputKey::Right | InputKey::Down | InputKey::Char(' ') => current.next(),
        InputKey::Backspace => LevelOption::Any,
        InputKey::Char('e') => LevelOption::Error,
        InputKey::Char('w') => LevelOption::Warn,
        InputKey::Char('i') => LevelOption::Info,
        InputKey::Char('d') => LevelOption::Debug,
        InputKey::Char('a') => LevelOption::Any,
        _ => return None,
    };
    Some(Message::filter(FilterField::Level, selected.as_filter()))
}

fn focus(state: &mut SessionState, field: FilterField) -> Option<Message> {
    state.input_mode = InputMode::Edit(field);
    None
}
