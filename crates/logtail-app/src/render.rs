//! Render adapter boundary.
//!
//! The session core never draws anything. After each processed message the
//! [`Engine`](crate::Engine) compares a state snapshot and tells the sink
//! what changed. Sinks only read.

use logtail_core::{BoundedLogBuffer, FilterState};

/// Receives change notifications from the engine
pub trait RenderSink {
    /// Connection status changed (`"Live"`, `"Reconnecting..."`, ...)
    fn status_changed(&mut self, label: &str, is_live: bool);

    /// The displayed entry set changed
    fn buffer_changed(&mut self, buffer: &BoundedLogBuffer);

    /// The filter inputs changed (user edit or initial state)
    fn filters_changed(&mut self, _filters: &FilterState) {}
}

/// Sink that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn status_changed(&mut self, _label: &str, _is_live: bool) {}

    fn buffer_changed(&mut self, _buffer: &BoundedLogBuffer) {}
}
