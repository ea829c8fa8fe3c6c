//! Tests for handler module

use std::time::Duration;

use super::*;
use crate::config::SessionConfig;
use crate::debounce::{DebounceKey, DebounceTicket};
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{ConnectionState, InputMode, SessionState};
use logtail_core::{FilterField, FilterState, LogEntry};
use logtail_stream::{StreamEvent, TransportEvent};

const ENTRY_A: &str = r#"{"timestamp":"2024-05-01T10:00:00.000","level":"INFO","service":"api","raw":"A"}"#;
const ENTRY_B: &str = r#"{"timestamp":"2024-05-01T10:01:00.000","level":"INFO","service":"api","raw":"B"}"#;
const ENTRY_C: &str = r#"{"timestamp":"2024-05-01T10:02:00.000","level":"WARN","service":"db","raw":"C"}"#;
const ENTRY_D: &str = r#"{"timestamp":"2024-05-01T10:03:00.000","level":"ERROR","service":"db","raw":"D"}"#;

fn test_state(capacity: usize) -> SessionState {
    SessionState::new(SessionConfig {
        capacity,
        ..SessionConfig::default()
    })
}

fn transport(state: &SessionState, event: TransportEvent) -> Message {
    Message::Transport(StreamEvent::new(state.connection_id, event))
}

fn frame(state: &SessionState, text: impl Into<String>) -> Message {
    transport(state, TransportEvent::Message(text.into()))
}

/// Drive a fresh state to `Connected`
fn connected_state(capacity: usize) -> SessionState {
    let mut state = test_state(capacity);
    update(&mut state, Message::Start);
    let opened = transport(&state, TransportEvent::Opened);
    update(&mut state, opened);
    assert_eq!(state.connection, ConnectionState::Connected);
    state
}

fn raws(state: &SessionState) -> Vec<&str> {
    state.buffer.iter().map(|e| e.raw.as_str()).collect()
}

fn sent_filters(result: &UpdateResult) -> Vec<FilterState> {
    result
        .actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::Send(OutboundMessage::UpdateFilters { filters }) => Some(filters.clone()),
            _ => None,
        })
        .collect()
}

// ─────────────────────────────────────────────────────────
// Connection lifecycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_start_connects() {
    let mut state = test_state(10);
    let result = update(&mut state, Message::Start);

    assert_eq!(state.connection, ConnectionState::Connecting);
    assert_eq!(state.status_label(), "Connecting...");
    assert!(!state.is_live());
    assert_eq!(
        result.actions,
        vec![UpdateAction::Connect(state.connection_id)]
    );
}

#[test]
fn test_second_start_is_ignored() {
    let mut state = test_state(10);
    update(&mut state, Message::Start);
    let result = update(&mut state, Message::Start);
    assert!(result.actions.is_empty());
    assert_eq!(state.stats.connect_attempts, 1);
}

#[test]
fn test_opened_sends_current_filters() {
    let mut state = test_state(10);
    state.filters = FilterState::new("timeout", "ERROR", "auth");
    update(&mut state, Message::Start);

    let opened = transport(&state, TransportEvent::Opened);
    let result = update(&mut state, opened);

    assert_eq!(state.connection, ConnectionState::Connected);
    assert_eq!(state.status_label(), "Live");
    assert!(state.is_live());
    assert_eq!(
        sent_filters(&result),
        vec![FilterState::new("timeout", "ERROR", "auth")]
    );
}

#[test]
fn test_close_schedules_reconnect_with_fixed_delay() {
    let mut state = connected_state(10);
    let closed = transport(
        &state,
        TransportEvent::Closed {
            reason: Some("closed by server".to_string()),
        },
    );
    let result = update(&mut state, closed);

    assert_eq!(state.connection, ConnectionState::Reconnecting);
    assert_eq!(state.status_label(), "Reconnecting...");
    assert_eq!(state.last_close_reason.as_deref(), Some("closed by server"));
    assert_eq!(
        result.actions,
        vec![UpdateAction::ScheduleReconnect(Duration::from_millis(3000))]
    );
}

#[test]
fn test_error_closes_transport_then_single_reconnect() {
    let mut state = connected_state(10);
    let error = transport(&state, TransportEvent::Error("reset".to_string()));
    let result = update(&mut state, error);

    assert_eq!(state.connection, ConnectionState::Reconnecting);
    assert_eq!(
        result.actions,
        vec![
            UpdateAction::CloseTransport,
            UpdateAction::ScheduleReconnect(Duration::from_millis(3000)),
        ]
    );

    // The Closed that follows the explicit close must not schedule again
    let closed = transport(&state, TransportEvent::Closed { reason: None });
    let result = update(&mut state, closed);
    assert!(result.actions.is_empty());
}

#[test]
fn test_connect_failure_is_treated_as_closure() {
    let mut state = test_state(10);
    update(&mut state, Message::Start);
    let closed = transport(
        &state,
        TransportEvent::Closed {
            reason: Some("connect failed: refused".to_string()),
        },
    );
    let result = update(&mut state, closed);

    assert_eq!(state.connection, ConnectionState::Reconnecting);
    assert!(matches!(
        result.actions.as_slice(),
        [UpdateAction::ScheduleReconnect(_)]
    ));
}

#[test]
fn test_reconnect_delay_elapsed_opens_new_attempt() {
    let mut state = connected_state(10);
    let first = state.connection_id;
    let closed = transport(&state, TransportEvent::Closed { reason: None });
    update(&mut state, closed);

    let result = update(&mut state, Message::ReconnectDelayElapsed);
    assert_eq!(state.connection, ConnectionState::Connecting);
    assert_eq!(state.connection_id, first.next());
    assert_eq!(result.actions, vec![UpdateAction::Connect(first.next())]);
}

#[test]
fn test_reconnect_timer_ignored_when_not_reconnecting() {
    let mut state = connected_state(10);
    let result = update(&mut state, Message::ReconnectDelayElapsed);
    assert!(result.actions.is_empty());
    assert_eq!(state.connection, ConnectionState::Connected);
}

#[test]
fn test_events_from_superseded_transport_are_ignored() {
    let mut state = connected_state(10);
    let old_id = state.connection_id;
    let closed = transport(&state, TransportEvent::Closed { reason: None });
    update(&mut state, closed);
    update(&mut state, Message::ReconnectDelayElapsed);

    // Late events from the first socket
    let stale_close = Message::Transport(StreamEvent::new(
        old_id,
        TransportEvent::Closed { reason: None },
    ));
    let result = update(&mut state, stale_close);
    assert!(result.actions.is_empty());
    assert_eq!(state.connection, ConnectionState::Connecting);

    let stale_frame = Message::Transport(StreamEvent::new(
        old_id,
        TransportEvent::Message(format!(r#"{{"type":"new_log","data":{ENTRY_A}}}"#)),
    ));
    update(&mut state, stale_frame);
    assert!(state.buffer.is_empty());
}

#[test]
fn test_buffer_kept_during_reconnect_gap() {
    let mut state = connected_state(10);
    let history = frame(&state, format!(r#"{{"type":"history","data":[{ENTRY_A},{ENTRY_B}]}}"#));
    update(&mut state, history);

    let closed = transport(&state, TransportEvent::Closed { reason: None });
    update(&mut state, closed);
    assert_eq!(raws(&state), vec!["A", "B"]);
}

// ─────────────────────────────────────────────────────────
// Inbound dispatch
// ─────────────────────────────────────────────────────────

#[test]
fn test_history_then_live_evicts_tail() {
    let mut state = connected_state(3);
    let history = frame(
        &state,
        format!(r#"{{"type":"history","data":[{ENTRY_A},{ENTRY_B},{ENTRY_C}]}}"#),
    );
    update(&mut state, history);
    assert_eq!(raws(&state), vec!["A", "B", "C"]);

    let live = frame(&state, format!(r#"{{"type":"new_log","data":{ENTRY_D}}}"#));
    update(&mut state, live);
    assert_eq!(raws(&state), vec!["D", "A", "B"]);
    assert_eq!(state.stats.history_batches, 1);
    assert_eq!(state.stats.live_entries, 1);
}

#[test]
fn test_history_replaces_previous_entries() {
    let mut state = connected_state(10);
    let first = frame(&state, format!(r#"{{"type":"history","data":[{ENTRY_A},{ENTRY_B}]}}"#));
    update(&mut state, first);
    let second = frame(&state, format!(r#"{{"type":"history","data":[{ENTRY_C}]}}"#));
    update(&mut state, second);
    assert_eq!(raws(&state), vec!["C"]);
}

#[test]
fn test_malformed_and_unknown_frames_change_nothing() {
    let mut state = connected_state(10);
    let history = frame(&state, format!(r#"{{"type":"history","data":[{ENTRY_A}]}}"#));
    update(&mut state, history);
    let revision = state.buffer.revision();

    for text in [
        "not json at all",
        r#"{"type":"new_log","data":{"level":"INFO"}}"#,
        r#"{"type":"stats","data":{}}"#,
        r#"{"data":[]}"#,
    ] {
        let msg = frame(&state, text);
        let result = update(&mut state, msg);
        assert!(result.actions.is_empty());
    }

    assert_eq!(state.buffer.revision(), revision);
    assert_eq!(raws(&state), vec!["A"]);
    assert_eq!(state.connection, ConnectionState::Connected);
    assert_eq!(state.stats.ignored_messages, 4);
}

// ─────────────────────────────────────────────────────────
// Filters
// ─────────────────────────────────────────────────────────

/// The ticket carried by a single `Debounce` action
fn debounce_ticket(result: &UpdateResult) -> DebounceTicket {
    match result.actions.as_slice() {
        [UpdateAction::Debounce(ticket)] => *ticket,
        other => panic!("expected one Debounce action, got {:?}", other),
    }
}

#[test]
fn test_query_change_is_debounced_per_field() {
    let mut state = connected_state(10);
    let result = update(&mut state, Message::filter(FilterField::Query, "time"));

    assert_eq!(state.filters.query, "time");
    assert_eq!(
        debounce_ticket(&result).key,
        DebounceKey::Field(FilterField::Query)
    );

    let result = update(&mut state, Message::filter(FilterField::Service, "auth"));
    assert_eq!(
        debounce_ticket(&result).key,
        DebounceKey::Field(FilterField::Service)
    );
}

#[test]
fn test_coalesced_fields_share_one_key() {
    let mut state = SessionState::new(SessionConfig {
        coalesce_fields: true,
        ..SessionConfig::default()
    });
    let a = debounce_ticket(&update(&mut state, Message::filter(FilterField::Query, "x")));
    let b = debounce_ticket(&update(&mut state, Message::filter(FilterField::Service, "y")));
    assert_eq!(a.key, DebounceKey::Filters);
    assert_eq!(b.key, DebounceKey::Filters);
    assert_ne!(a, b);
}

#[test]
fn test_debounce_elapsed_sends_latest_filters() {
    let mut state = connected_state(10);
    let mut last = None;
    for value in ["t", "ti", "tim", "time", "timeo"] {
        let result = update(&mut state, Message::filter(FilterField::Query, value));
        last = Some(debounce_ticket(&result));
    }
    let ticket = last.unwrap();
    let result = update(&mut state, Message::DebounceElapsed(ticket));
    assert_eq!(sent_filters(&result), vec![FilterState::new("timeo", "", "")]);
}

#[test]
fn test_superseded_debounce_elapsed_sends_nothing() {
    let mut state = connected_state(10);
    let first = debounce_ticket(&update(&mut state, Message::filter(FilterField::Query, "ti")));
    let second = debounce_ticket(&update(&mut state, Message::filter(FilterField::Query, "tim")));

    // The older timer fired before it could be aborted
    let result = update(&mut state, Message::DebounceElapsed(first));
    assert!(result.actions.is_empty());
    assert_eq!(state.stats.dropped_sends, 0);

    let result = update(&mut state, Message::DebounceElapsed(second));
    assert_eq!(sent_filters(&result), vec![FilterState::new("tim", "", "")]);
}

#[test]
fn test_other_field_edit_keeps_ticket_current() {
    let mut state = connected_state(10);
    let query = debounce_ticket(&update(&mut state, Message::filter(FilterField::Query, "x")));
    update(&mut state, Message::filter(FilterField::Service, "db"));

    let result = update(&mut state, Message::DebounceElapsed(query));
    assert_eq!(sent_filters(&result), vec![FilterState::new("x", "", "db")]);
}

#[test]
fn test_level_change_revokes_pending_tickets() {
    let mut state = connected_state(10);
    let ticket = debounce_ticket(&update(&mut state, Message::filter(FilterField::Query, "x")));
    update(&mut state, Message::filter(FilterField::Level, "WARN"));

    let result = update(&mut state, Message::DebounceElapsed(ticket));
    assert!(result.actions.is_empty());
}

#[test]
fn test_level_change_clears_then_sends_immediately() {
    let mut state = connected_state(10);
    let history = frame(&state, format!(r#"{{"type":"history","data":[{ENTRY_A},{ENTRY_B}]}}"#));
    update(&mut state, history);

    let result = update(&mut state, Message::filter(FilterField::Level, "ERROR"));

    assert!(state.buffer.is_empty());
    assert_eq!(
        result.actions,
        vec![
            UpdateAction::CancelDebounces,
            UpdateAction::Send(OutboundMessage::update_filters(&FilterState::new(
                "", "ERROR", ""
            ))),
        ]
    );
}

#[test]
fn test_unchanged_value_is_noop() {
    let mut state = connected_state(10);
    update(&mut state, Message::filter(FilterField::Level, "WARN"));
    let result = update(&mut state, Message::filter(FilterField::Level, "WARN"));
    assert!(result.actions.is_empty());
}

#[test]
fn test_send_while_disconnected_is_dropped() {
    let mut state = connected_state(10);
    let closed = transport(&state, TransportEvent::Closed { reason: None });
    update(&mut state, closed);

    let result = update(&mut state, Message::filter(FilterField::Level, "INFO"));
    assert_eq!(result.actions, vec![UpdateAction::CancelDebounces]);
    assert_eq!(state.stats.dropped_sends, 1);

    let ticket = state
        .debounce_tickets
        .issue(DebounceKey::Field(FilterField::Query));
    let result = update(&mut state, Message::DebounceElapsed(ticket));
    assert!(result.actions.is_empty());
    assert_eq!(state.stats.dropped_sends, 2);

    // Reconnect sends the latest in-memory filters once
    update(&mut state, Message::ReconnectDelayElapsed);
    let opened = transport(&state, TransportEvent::Opened);
    let result = update(&mut state, opened);
    assert_eq!(sent_filters(&result), vec![FilterState::new("", "INFO", "")]);
}

#[test]
fn test_clear_logs() {
    let mut state = connected_state(10);
    let history = frame(&state, format!(r#"{{"type":"history","data":[{ENTRY_A}]}}"#));
    update(&mut state, history);
    update(&mut state, Message::ClearLogs);
    assert!(state.buffer.is_empty());
}

// ─────────────────────────────────────────────────────────
// Quit
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_shuts_down_and_ignores_later_messages() {
    let mut state = connected_state(10);
    let result = update(&mut state, Message::Quit);
    assert!(state.should_quit());
    assert_eq!(result.actions, vec![UpdateAction::Shutdown]);

    let closed = transport(&state, TransportEvent::Closed { reason: None });
    let result = update(&mut state, closed);
    assert!(result.actions.is_empty());
    assert_eq!(state.connection, ConnectionState::Connected);
}

// ─────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────

#[test]
fn test_q_and_esc_quit_in_browse_mode() {
    let mut state = test_state(10);
    let result = update(&mut state, Message::Key(InputKey::Char('q')));
    assert_eq!(result.message, Some(Message::Quit));

    let result = update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(result.message, Some(Message::Quit));
}

#[test]
fn test_ctrl_c_quits_while_editing() {
    let mut state = test_state(10);
    state.input_mode = InputMode::Edit(FilterField::Query);
    let result = update(&mut state, Message::Key(InputKey::CharCtrl('c')));
    assert_eq!(result.message, Some(Message::Quit));
}

#[test]
fn test_typing_in_query_produces_filter_change() {
    let mut state = test_state(10);
    update(&mut state, Message::Key(InputKey::Tab));
    assert_eq!(state.input_mode, InputMode::Edit(FilterField::Query));

    // 'q' is text while editing
    let result = update(&mut state, Message::Key(InputKey::Char('q')));
    assert_eq!(result.message, Some(Message::filter(FilterField::Query, "q")));
}

#[test]
fn test_backspace_edits_current_value() {
    let mut state = test_state(10);
    state.filters.service = "auth".to_string();
    state.input_mode = InputMode::Edit(FilterField::Service);

    let result = update(&mut state, Message::Key(InputKey::Backspace));
    assert_eq!(result.message, Some(Message::filter(FilterField::Service, "aut")));
}

#[test]
fn test_tab_cycles_focus() {
    let mut state = test_state(10);
    update(&mut state, Message::Key(InputKey::Tab));
    update(&mut state, Message::Key(InputKey::Tab));
    assert_eq!(state.input_mode, InputMode::Edit(FilterField::Level));
    update(&mut state, Message::Key(InputKey::Tab));
    assert_eq!(state.input_mode, InputMode::Edit(FilterField::Service));
    update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.input_mode, InputMode::Browse);
}

#[test]
fn test_level_selector_cycles_options() {
    let mut state = test_state(10);
    state.input_mode = InputMode::Edit(FilterField::Level);

    let result = update(&mut state, Message::Key(InputKey::Right));
    assert_eq!(result.message, Some(Message::filter(FilterField::Level, "ERROR")));

    state.filters.level = "DEBUG".to_string();
    let result = update(&mut state, Message::Key(InputKey::Right));
    assert_eq!(result.message, Some(Message::filter(FilterField::Level, "")));
}

#[test]
fn test_scroll_keys_stay_in_bounds() {
    let mut state = connected_state(10);
    for raw in [ENTRY_A, ENTRY_B, ENTRY_C] {
        let live = frame(&state, format!(r#"{{"type":"new_log","data":{raw}}}"#));
        update(&mut state, live);
    }

    update(&mut state, Message::Key(InputKey::PageDown));
    assert_eq!(state.log_view.offset, 2);
    update(&mut state, Message::Key(InputKey::Up));
    assert_eq!(state.log_view.offset, 1);
    update(&mut state, Message::Key(InputKey::Home));
    assert_eq!(state.log_view.offset, 0);
}

#[test]
fn test_live_entry_keeps_scrolled_view_anchored() {
    let mut state = connected_state(10);
    let history = frame(
        &state,
        format!(r#"{{"type":"history","data":[{ENTRY_C},{ENTRY_B},{ENTRY_A}]}}"#),
    );
    update(&mut state, history);
    state.log_view.offset = 1;
    let anchored = state.buffer.get(1).cloned();

    let live = frame(&state, format!(r#"{{"type":"new_log","data":{ENTRY_D}}}"#));
    update(&mut state, live);

    assert_eq!(state.log_view.offset, 2);
    assert_eq!(state.buffer.get(2).cloned(), anchored);
    assert_eq!(
        state.buffer.get(0).map(LogEntry::display_time),
        Some("10:03:00.000")
    );
}
