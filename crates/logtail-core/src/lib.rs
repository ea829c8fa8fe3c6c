//! # logtail-core - Core Domain Types
//!
//! Foundation crate for logtail. Provides domain types, the bounded display
//! buffer, text helpers for untrusted log content, error handling and the
//! logging bootstrap.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LogEntry`] - A single log line as delivered by the source
//! - [`FilterState`] - The query/level/service predicate sent to the source
//! - [`FilterField`] - Identifies one filter input
//! - [`LevelOption`] - Level selector choices
//!
//! ### Buffer (`buffer`)
//! - [`BoundedLogBuffer`] - Fixed-capacity entries in display order
//!
//! ### Text (`text`)
//! - [`display_time`], [`escape_html`], [`sanitize_for_terminal`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum grouped by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use logtail_core::prelude::*;
//! ```

pub mod buffer;
pub mod error;
pub mod logging;
pub mod text;
pub mod types;

/// Prelude for common imports used throughout all logtail crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use buffer::{BoundedLogBuffer, DEFAULT_CAPACITY};
pub use error::{Error, Result, ResultExt};
pub use text::{display_time, escape_html, sanitize_for_terminal, strip_ansi_codes};
pub use types::{FilterField, FilterState, LevelOption, LogEntry};
