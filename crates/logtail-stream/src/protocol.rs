//! Wire protocol between the client and the log source.
//!
//! Every frame is one JSON object with a `type` discriminant:
//!
//! ```text
//! inbound   {"type":"history","data":[LogEntry, ...]}
//! inbound   {"type":"new_log","data":LogEntry}
//! outbound  {"type":"update_filters","filters":{"query":"","level":"","service":""}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use logtail_core::prelude::*;
use logtail_core::{FilterState, LogEntry};

/// Maximum characters of a rejected frame kept for log output
const PREVIEW_CHARS: usize = 120;

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A decoded message pushed by the log source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Replacement entry set, already in display order
    History(Vec<LogEntry>),
    /// One newly produced entry
    NewLog(LogEntry),
}

/// Outcome of decoding one inbound text frame.
///
/// Unknown and malformed frames are values, not errors: the session logs
/// them and keeps streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFrame {
    /// A known message type with a valid payload
    Message(InboundMessage),
    /// Valid JSON with a `type` this client does not handle
    Unknown { kind: String },
    /// Not JSON, no `type`, or a known `type` with an invalid payload
    Malformed { reason: String, preview: String },
}

/// Decode one inbound text frame.
pub fn parse_inbound(text: &str) -> ParsedFrame {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => return malformed(format!("invalid JSON: {e}"), text),
    };

    let kind = match value.get("type").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None => return malformed("missing 'type' discriminant", text),
    };

    match kind.as_str() {
        "history" | "new_log" => match serde_json::from_value::<InboundMessage>(value) {
            Ok(msg) => ParsedFrame::Message(msg),
            Err(e) => malformed(format!("invalid '{kind}' payload: {e}"), text),
        },
        _ => ParsedFrame::Unknown { kind },
    }
}

fn malformed(reason: impl Into<String>, text: &str) -> ParsedFrame {
    ParsedFrame::Malformed {
        reason: reason.into(),
        preview: text.chars().take(PREVIEW_CHARS).collect(),
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// A request sent to the log source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Replace the connection's filters; the source answers with `history`
    UpdateFilters { filters: FilterState },
}

impl OutboundMessage {
    pub fn update_filters(filters: &FilterState) -> Self {
        Self::UpdateFilters {
            filters: filters.clone(),
        }
    }

    /// Serialize to a text frame
    pub fn to_text(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::protocol(format!("Failed to serialize outbound message: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{"timestamp":"2024-05-01T10:00:00.123","level":"INFO","service":"auth","raw":"ok"}"#;

    #[test]
    fn test_parse_history() {
        let text = format!(r#"{{"type":"history","data":[{ENTRY},{ENTRY}]}}"#);
        match parse_inbound(&text) {
            ParsedFrame::Message(InboundMessage::History(entries)) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].service, "auth");
            }
            other => panic!("expected history, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_history() {
        let parsed = parse_inbound(r#"{"type":"history","data":[]}"#);
        assert_eq!(parsed, ParsedFrame::Message(InboundMessage::History(vec![])));
    }

    #[test]
    fn test_parse_new_log() {
        let text = format!(r#"{{"type":"new_log","data":{ENTRY}}}"#);
        match parse_inbound(&text) {
            ParsedFrame::Message(InboundMessage::NewLog(entry)) => {
                assert_eq!(entry.raw, "ok");
            }
            other => panic!("expected new_log, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_type() {
        let parsed = parse_inbound(r#"{"type":"stats","data":{"count":3}}"#);
        assert_eq!(
            parsed,
            ParsedFrame::Unknown {
                kind: "stats".to_string()
            }
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_inbound("{not json"),
            ParsedFrame::Malformed { .. }
        ));
    }

    #[test]
    fn test_parse_missing_type() {
        match parse_inbound(r#"{"data":[]}"#) {
            ParsedFrame::Malformed { reason, .. } => assert!(reason.contains("type")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_known_type_with_bad_payload() {
        match parse_inbound(r#"{"type":"new_log","data":[1,2,3]}"#) {
            ParsedFrame::Malformed { reason, .. } => assert!(reason.contains("new_log")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_preview_is_truncated() {
        let text = "x".repeat(1000);
        match parse_inbound(&text) {
            ParsedFrame::Malformed { preview, .. } => assert_eq!(preview.len(), PREVIEW_CHARS),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_update_filters_wire_shape() {
        let filters = FilterState::new("timeout", "ERROR", "");
        let text = OutboundMessage::update_filters(&filters).to_text().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "update_filters",
                "filters": { "query": "timeout", "level": "ERROR", "service": "" }
            })
        );
    }
}
