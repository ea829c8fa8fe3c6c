//! logtail library
//!
//! CLI parsing and the headless runner. The session itself lives in
//! `logtail-app`; the terminal UI in `logtail-tui`.

pub mod cli;
pub mod headless;

pub use cli::{Args, OutputFormat};
pub use headless::runner::run_headless;
