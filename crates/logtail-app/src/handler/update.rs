//! Main update function - handles state transitions (TEA pattern)

use logtail_core::prelude::*;

use crate::message::Message;
use crate::state::{Phase, SessionState};

use super::{connection, filters, keys, UpdateAction, UpdateResult};

/// Process a message and update state.
/// Returns an optional follow-up message and the actions to perform.
pub fn update(state: &mut SessionState, message: Message) -> UpdateResult {
    if state.should_quit() {
        debug!("Session quitting, ignoring {:?}", message);
        return UpdateResult::none();
    }

    match message {
        Message::Start => connection::handle_start(state),

        Message::Quit => {
            info!("Session shutting down");
            state.phase = Phase::Quitting;
            UpdateResult::action(UpdateAction::Shutdown)
        }

        // ─────────────────────────────────────────────────────────
        // Transport
        // ─────────────────────────────────────────────────────────
        Message::Transport(event) => connection::handle_stream_event(state, event),
        Message::ReconnectDelayElapsed => connection::handle_reconnect_delay_elapsed(state),

        // ─────────────────────────────────────────────────────────
        // Filters
        // ─────────────────────────────────────────────────────────
        Message::FilterChanged { field, value } => {
            filters::handle_filter_changed(state, field, value)
        }
        Message::DebounceElapsed(ticket) => filters::handle_debounce_elapsed(state, ticket),
        Message::ClearLogs => {
            state.buffer.clear();
            state.log_view.to_top();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Input
        // ─────────────────────────────────────────────────────────
        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },
    }
}
