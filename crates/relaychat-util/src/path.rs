//! Path utilities.
//!
//! Well-known directories for configuration, persisted data and logs.

use std::path::{Path, PathBuf};

/// Get the relaychat configuration directory.
///
/// This follows XDG conventions on Linux/macOS:
/// - `$XDG_CONFIG_HOME/relaychat` if set
/// - `~/.config/relaychat` otherwise
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("relaychat"))
}

/// Get the relaychat data directory.
///
/// This follows XDG conventions:
/// - `$XDG_DATA_HOME/relaychat` if set
/// - `~/.local/share/relaychat` otherwise
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("relaychat"))
}

/// Get the relaychat state directory.
///
/// This is where the key/value store (input history) lives.
pub fn state_dir() -> Option<PathBuf> {
    data_dir().map(|p| p.join("state"))
}

/// Get the relaychat logs directory.
pub fn logs_dir() -> Option<PathBuf> {
    data_dir().map(|p| p.join("logs"))
}

/// Path of the global config file.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.json"))
}

/// Path of the project config file inside `dir`.
pub fn project_config_file(dir: &Path) -> PathBuf {
    dir.join("relaychat.json")
}
