//! Filter edit handlers.
//!
//! Text inputs (query, service) propagate through the debouncer. The level
//! selector bypasses it: the buffer is cleared and the request goes out
//! immediately, since the source answers with a fresh `history`.

use logtail_core::prelude::*;
use logtail_core::FilterField;
use logtail_stream::OutboundMessage;

use crate::debounce::{DebounceKey, DebounceTicket};
use crate::state::SessionState;

use super::{UpdateAction, UpdateResult};

pub fn handle_filter_changed(
    state: &mut SessionState,
    field: FilterField,
    value: String,
) -> UpdateResult {
    if state.filters.get(field) == value {
        return UpdateResult::none();
    }
    state.filters.set(field, value);

    match field {
        FilterField::Level => {
            debug!("Level filter -> '{}', clearing and requesting", state.filters.level);
            state.buffer.clear();
            state.log_view.to_top();
            state.debounce_tickets.revoke_all();

            let mut actions = vec![UpdateAction::CancelDebounces];
            actions.extend(send_filters(state));
            UpdateResult::actions(actions)
        }
        FilterField::Query | FilterField::Service => {
            let key = DebounceKey::for_field(field, state.config.coalesce_fields);
            let ticket = state.debounce_tickets.issue(key);
            UpdateResult::action(UpdateAction::Debounce(ticket))
        }
    }
}

/// A debounce window closed; send the filters as they are now.
///
/// A ticket superseded by a later edit (or revoked by a level change) was
/// queued before its timer could be aborted and is dropped.
pub fn handle_debounce_elapsed(state: &mut SessionState, ticket: DebounceTicket) -> UpdateResult {
    if !state.debounce_tickets.is_current(&ticket) {
        debug!("Ignoring stale debounce {:?}", ticket);
        return UpdateResult::none();
    }
    debug!("Debounce {:?} elapsed", ticket.key);
    UpdateResult::actions(send_filters(state).into_iter().collect())
}

/// `update_filters` with the current state, or nothing when not live
fn send_filters(state: &mut SessionState) -> Option<UpdateAction> {
    if !state.is_live() {
        debug!("Not connected, dropping update_filters");
        state.stats.dropped_sends += 1;
        return None;
    }
    Some(UpdateAction::Send(OutboundMessage::update_filters(
        &state.filters,
    )))
}
