//! Widgets

mod filter_bar;
mod log_view;
mod status_bar;

pub use filter_bar::FilterBar;
pub use log_view::LogView;
pub use status_bar::StatusBar;
