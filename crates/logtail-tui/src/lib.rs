//! # logtail-tui - Terminal UI for logtail
//!
//! Renders a session with ratatui and turns crossterm key presses into
//! session messages. The loop is synchronous: drain engine messages, draw
//! when something changed, poll the keyboard.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
mod test_utils;

pub use runner::run;
