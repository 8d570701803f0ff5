//! Centralized path resolution
//!
//! Every file the watcher touches is resolved here so relative paths behave
//! the same way regardless of where the scheduler launches the binary.
//!
//! ```text
//! <data-dir>/            (current directory unless --data-dir is given)
//! ├── config.toml
//! ├── processed_tokens.json
//! └── logs/              (only when a log file is configured)
//! ```

use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default seen-set file name
pub const DEFAULT_STATE_FILE: &str = "processed_tokens.json";

/// Resolve a configured path against the data directory
///
/// Absolute paths are returned unchanged. Relative paths are joined onto
/// `data_dir` when one is given, otherwise left relative to the working
/// directory.
pub fn resolve(data_dir: Option<&Path>, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        return candidate;
    }

    match data_dir {
        Some(dir) => dir.join(candidate),
        None => candidate,
    }
}

/// Returns the configuration file path
pub fn get_config_path(data_dir: Option<&Path>, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => resolve(data_dir, DEFAULT_CONFIG_FILE),
    }
}
