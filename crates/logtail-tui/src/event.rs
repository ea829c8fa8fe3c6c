//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use logtail_app::message::Message;
use logtail_app::InputKey;
use logtail_core::prelude::*;

/// Poll timeout (20 FPS)
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a terminal poll produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Input for the session
    Message(Message),
    /// The terminal was resized; redraw
    Resize,
}

/// Convert a crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Poll for a terminal event, waiting at most [`POLL_INTERVAL`]
pub fn poll() -> Result<Option<TerminalEvent>> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(key_event_to_input(key)
            .map(|input| TerminalEvent::Message(Message::Key(input)))),
        Event::Resize(_, _) => Ok(Some(TerminalEvent::Resize)),
        _ => Ok(None),
    }
}
