//! Inbound message dispatch into the display buffer

use logtail_core::prelude::*;
use logtail_stream::{parse_inbound, InboundMessage, ParsedFrame};

use crate::state::SessionState;

use super::UpdateResult;

/// Apply one inbound text frame.
///
/// Unknown and malformed frames are logged and dropped; they never touch the
/// buffer or the connection state.
pub fn handle_frame(state: &mut SessionState, text: &str) -> UpdateResult {
    match parse_inbound(text) {
        ParsedFrame::Message(InboundMessage::History(entries)) => {
            debug!("history: {} entries", entries.len());
            // Replaces the buffer wholesale, in the order the source sent
            state.buffer.insert_history(entries);
            state.log_view.to_top();
            state.stats.history_batches += 1;
        }
        ParsedFrame::Message(InboundMessage::NewLog(entry)) => {
            state.buffer.insert_live(entry);
            state.stats.live_entries += 1;
            // Keep a scrolled view anchored on the same rows
            if state.log_view.offset > 0 {
                state.log_view.offset += 1;
                state.log_view.clamp(state.buffer.len());
            }
        }
        ParsedFrame::Unknown { kind } => {
            warn!("Ignoring inbound message of unknown type '{}'", kind);
            state.stats.ignored_messages += 1;
        }
        ParsedFrame::Malformed { reason, preview } => {
            warn!("Ignoring malformed inbound message ({}): {}", reason, preview);
            state.stats.ignored_messages += 1;
        }
    }
    UpdateResult::none()
}
