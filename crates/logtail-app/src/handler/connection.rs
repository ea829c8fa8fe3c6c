//! Connection lifecycle handlers.
//!
//! The session never gives up: every closure, clean or not, leads to
//! `Reconnecting` and a fresh attempt after the fixed delay.

use logtail_core::prelude::*;
use logtail_stream::{OutboundMessage, StreamEvent, TransportEvent};

use crate::state::{ConnectionState, SessionState};

use super::{inbound, UpdateAction, UpdateResult};

/// Open the first connection
pub fn handle_start(state: &mut SessionState) -> UpdateResult {
    if state.connection != ConnectionState::Disconnected {
        debug!("Start ignored, session already {:?}", state.connection);
        return UpdateResult::none();
    }

    let id = state.begin_attempt();
    info!("Connecting (attempt {})", id);
    UpdateResult::action(UpdateAction::Connect(id))
}

/// Route a transport event of the current attempt
pub fn handle_stream_event(state: &mut SessionState, event: StreamEvent) -> UpdateResult {
    if event.id != state.connection_id {
        debug!(
            "Ignoring {:?} from superseded transport {} (current {})",
            event.event, event.id, state.connection_id
        );
        return UpdateResult::none();
    }

    match event.event {
        TransportEvent::Opened => handle_opened(state),
        TransportEvent::Message(text) => {
            if state.connection != ConnectionState::Connected {
                debug!("Dropping frame received while {:?}", state.connection);
                return UpdateResult::none();
            }
            inbound::handle_frame(state, &text)
        }
        TransportEvent::Error(error) => {
            warn!("Transport {} error: {}", event.id, error);
            handle_closure(state, Some(error), true)
        }
        TransportEvent::Closed { reason } => handle_closure(state, reason, false),
    }
}

/// `Connecting → Connected`, then announce the current filters
fn handle_opened(state: &mut SessionState) -> UpdateResult {
    if state.connection != ConnectionState::Connecting {
        debug!("Opened ignored while {:?}", state.connection);
        return UpdateResult::none();
    }

    state.connection = ConnectionState::Connected;
    state.last_close_reason = None;
    info!("Connected ({}), sending current filters", state.connection_id);
    UpdateResult::action(UpdateAction::Send(OutboundMessage::update_filters(
        &state.filters,
    )))
}

/// Move to `Reconnecting` and schedule the next attempt.
///
/// An error closes the transport first; the `Closed` that follows finds the
/// session already reconnecting and is ignored, so each attempt schedules
/// exactly one retry.
fn handle_closure(
    state: &mut SessionState,
    reason: Option<String>,
    close_transport: bool,
) -> UpdateResult {
    match state.connection {
        ConnectionState::Connecting | ConnectionState::Connected => {}
        ConnectionState::Reconnecting | ConnectionState::Disconnected => {
            debug!("Closure of {} already handled", state.connection_id);
            return UpdateResult::none();
        }
    }

    let delay = state.reconnect_delay();
    info!(
        "Connection {} lost ({}), reconnecting in {:?}",
        state.connection_id,
        reason.as_deref().unwrap_or("no reason"),
        delay
    );

    state.connection = ConnectionState::Reconnecting;
    state.last_close_reason = reason;

    let mut actions = Vec::with_capacity(2);
    if close_transport {
        actions.push(UpdateAction::CloseTransport);
    }
    actions.push(UpdateAction::ScheduleReconnect(delay));
    UpdateResult::actions(actions)
}

/// `Reconnecting → Connecting` once the delay has elapsed
pub fn handle_reconnect_delay_elapsed(state: &mut SessionState) -> UpdateResult {
    if state.connection != ConnectionState::Reconnecting {
        debug!("Reconnect timer fired while {:?}, ignoring", state.connection);
        return UpdateResult::none();
    }

    let id = state.begin_attempt();
    info!("Reconnecting (attempt {})", id);
    UpdateResult::action(UpdateAction::Connect(id))
}
