// src/infra/paths.rs — Config and data locations
//
// All paths respect ONTODASH_HOME. When set, config and data live under that
// directory. When unset, config uses ~/.ontodash/ and data uses
// XDG_DATA_HOME/ontodash.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn ontodash_home() -> Option<PathBuf> {
    std::env::var_os("ONTODASH_HOME").map(PathBuf::from)
}

/// Configuration directory: $ONTODASH_HOME/ or ~/.ontodash/
pub fn config_dir() -> PathBuf {
    if let Some(home) = ontodash_home() {
        return home;
    }
    match BaseDirs::new() {
        Some(base) => base.home_dir().join(".ontodash"),
        None => PathBuf::from(".ontodash"),
    }
}

/// Data directory: $ONTODASH_HOME/data/ or ~/.local/share/ontodash/
pub fn data_dir() -> PathBuf {
    if let Some(home) = ontodash_home() {
        return home.join("data");
    }
    match ProjectDirs::from("", "", "ontodash") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// TUI log file
pub fn log_file_path() -> PathBuf {
    data_dir().join("ontodash.log")
}
