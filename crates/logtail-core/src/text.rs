//! Text helpers for rendering untrusted log content
//!
//! - [`display_time`] - `HH:MM:SS.mmm` slice of an ISO-8601 timestamp
//! - [`escape_html`] - entity-escape text for HTML output
//! - [`sanitize_for_terminal`] - strip ANSI sequences and control characters

use regex::Regex;
use std::sync::LazyLock;

/// Length of `HH:MM:SS.mmm`
const DISPLAY_TIME_LEN: usize = 12;

/// Regex pattern for ANSI escape sequences.
///
/// Covers:
/// - CSI sequences: ESC [ ... letter (colors, cursor, etc.)
/// - OSC sequences: ESC ] ... BEL or ST (hyperlinks, titles)
/// - Simple escapes: ESC letter
/// - Caret notation: ^[ ... (emitted by tools that escape the ESC byte)
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]               # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        | \x1b[A-Za-z]                       # Simple escapes
        | \^\[\[[0-9;?]*[A-Za-z]             # ^[[ CSI sequences
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Derive the display time from an ISO-8601 timestamp.
///
/// Takes the first 12 characters after the `T` date/time separator, so
/// `2024-05-01T10:11:12.345678` becomes `10:11:12.345`. A shorter time part
/// is returned as-is; a timestamp without `T` is returned verbatim. No date
/// parsing happens here.
pub fn display_time(timestamp: &str) -> &str {
    match timestamp.split_once('T') {
        Some((_, time)) => match time.char_indices().nth(DISPLAY_TIME_LEN) {
            Some((idx, _)) => &time[..idx],
            None => time,
        },
        None => timestamp,
    }
}

/// Escape `& < > " '` to their HTML entity forms.
///
/// Empty input yields an empty string.
pub fn escape_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Strip all ANSI escape sequences from a string.
pub fn strip_ansi_codes(input: &str) -> String {
    ANSI_ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Check if a string contains ANSI escape sequences.
fn contains_ansi_codes(input: &str) -> bool {
    ANSI_ESCAPE_PATTERN.is_match(input)
}

/// Make untrusted text safe to print as a single terminal line.
///
/// ANSI sequences are removed and any remaining control character
/// (newlines included) becomes a space, so a log line can neither move the
/// cursor nor span multiple rows.
pub fn sanitize_for_terminal(input: &str) -> String {
    let stripped = if contains_ansi_codes(input) {
        strip_ansi_codes(input)
    } else {
        input.to_string()
    };

    if !stripped.chars().any(char::is_control) {
        return stripped;
    }

    stripped
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
