//! Settings loader for `config.toml`

use std::path::{Path, PathBuf};

use logtail_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "logtail";

const DEFAULT_CONFIG: &str = r#"# logtail configuration

[connection]
# ws:// or wss:// stream URL, or the http(s):// address of the log source
# (the stream is then expected at /ws on the same host)
url = "ws://127.0.0.1:8000/ws"
# Fixed delay before reconnecting after the stream drops
reconnect_delay_ms = 3000

[buffer]
# Maximum number of entries kept on screen
capacity = 1000

[filters]
# Inactivity window before a search/service edit is sent to the source
debounce_ms = 300
# true = one timer shared by search and service edits
coalesce_fields = false
# Initial filters (empty = no constraint)
query = ""
level = ""              # ERROR, WARN, INFO, DEBUG or empty
service = ""

[ui]
show_timestamps = true
show_service = true
"#;

/// Default location: `<config dir>/logtail/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`.
///
/// A missing file yields defaults. An unreadable or unparsable file is
/// logged and also yields defaults.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Strict variant of [`load_settings`] for explicitly requested files.
///
/// # Errors
///
/// [`Error::ConfigNotFound`] when the file is missing, [`Error::Config`]
/// when it cannot be parsed.
pub fn load_settings_strict(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write the commented default config to `path` unless a file exists there.
///
/// Returns `true` when a file was written.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        info!("Config file already exists at {:?}", path);
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)?;
    info!("Wrote default config to {:?}", path);
    Ok(true)
}
