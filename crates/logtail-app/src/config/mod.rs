//! Configuration file parsing for logtail
//!
//! Supports `<config dir>/logtail/config.toml` or an explicit `--config` path.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config, load_settings, load_settings_strict};
pub use types::*;
