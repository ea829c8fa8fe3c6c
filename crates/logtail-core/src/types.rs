//! Core domain types

use serde::{Deserialize, Serialize};

/// A single log line as delivered by the log source.
///
/// Entries are immutable once received. `raw` comes from whatever process
/// produced the line and must be treated as untrusted when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO-8601 timestamp with sub-second precision (`2024-05-01T10:00:00.123456`)
    pub timestamp: String,
    /// Severity tag as assigned by the source (`ERROR`, `WARN`, `INFO`, `DEBUG`)
    pub level: String,
    /// Origin identifier, `unknown` when the source could not extract one
    pub service: String,
    /// Unformatted message text
    pub raw: String,
    /// Ingest protocol (`UDP`/`TCP`), when the source reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Sending host address, when the source reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl LogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        level: impl Into<String>,
        service: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.into(),
            service: service.into(),
            raw: raw.into(),
            protocol: None,
            host: None,
        }
    }

    /// Display time (`HH:MM:SS.mmm`) derived from the timestamp
    pub fn display_time(&self) -> &str {
        crate::text::display_time(&self.timestamp)
    }
}

/// Identifies one of the three filter inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Free-text substring filter on the message
    Query,
    /// Exact-match severity filter
    Level,
    /// Substring filter on the service name
    Service,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [FilterField::Query, FilterField::Level, FilterField::Service];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Query => "Search",
            FilterField::Level => "Level",
            FilterField::Service => "Service",
        }
    }

    /// Next field in input focus order (wraps)
    pub fn next(&self) -> Self {
        match self {
            FilterField::Query => FilterField::Level,
            FilterField::Level => FilterField::Service,
            FilterField::Service => FilterField::Query,
        }
    }

    /// Previous field in input focus order (wraps)
    pub fn prev(&self) -> Self {
        match self {
            FilterField::Query => FilterField::Service,
            FilterField::Level => FilterField::Query,
            FilterField::Service => FilterField::Level,
        }
    }
}

/// The active filter predicate.
///
/// An empty string means "no constraint on this field". Filtering happens at
/// the remote source; this type is only ever serialized into an
/// `update_filters` request. No validation is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub service: String,
}

impl FilterState {
    pub fn new(
        query: impl Into<String>,
        level: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            level: level.into(),
            service: service.into(),
        }
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Query => &self.query,
            FilterField::Level => &self.level,
            FilterField::Service => &self.service,
        }
    }

    /// Set a field. Never triggers network activity by itself.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Query => self.query = value,
            FilterField::Level => self.level = value,
            FilterField::Service => self.service = value,
        }
    }

    /// Reset all filters to "no constraint"
    pub fn reset(&mut self) {
        self.query.clear();
        self.level.clear();
        self.service.clear();
    }

    /// Check if any filter constrains the stream
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.level.is_empty() || !self.service.is_empty()
    }
}

/// Level selector choices known to the log source.
///
/// The level filter itself is a free string; this only drives selector UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelOption {
    #[default]
    Any,
    Error,
    Warn,
    Info,
    Debug,
}

impl LevelOption {
    pub const ALL: [LevelOption; 5] = [
        LevelOption::Any,
        LevelOption::Error,
        LevelOption::Warn,
        LevelOption::Info,
        LevelOption::Debug,
    ];

    /// Wire value sent in `update_filters` (empty = any)
    pub fn as_filter(&self) -> &'static str {
        match self {
            LevelOption::Any => "",
            LevelOption::Error => "ERROR",
            LevelOption::Warn => "WARN",
            LevelOption::Info => "INFO",
            LevelOption::Debug => "DEBUG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LevelOption::Any => "All levels",
            other => other.as_filter(),
        }
    }

    /// Map a filter value back to a known option (case-insensitive)
    pub fn from_filter(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "" | "ANY" | "ALL" => Some(LevelOption::Any),
            "ERROR" => Some(LevelOption::Error),
            "WARN" | "WARNING" => Some(LevelOption::Warn),
            "INFO" => Some(LevelOption::Info),
            "DEBUG" => Some(LevelOption::Debug),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
