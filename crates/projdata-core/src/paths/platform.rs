//! Platform-specific path detection.
//!
//! Private helpers for locating the per-user data directory and choosing the
//! link kind. Public API is exposed through [`AppData`](super::AppData).

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use super::error::AppDataError;
use crate::config::{DATA_DIR_VAR, EnvSource};
use crate::ports::LinkKind;

/// Get the directory the product's data root is placed under.
///
/// Resolution order:
/// 1. Explicit directory from configuration
/// 2. `PROJDATA_DATA_DIR` environment variable
/// 3. System data directory (e.g., `~/.local/share`, `%APPDATA%`,
///    `~/Library/Application Support`)
pub(super) fn os_data_dir(
    explicit: Option<&Path>,
    env: &dyn EnvSource,
) -> Result<PathBuf, AppDataError> {
    // 1. Configuration (highest priority)
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    // 2. Runtime override
    if let Some(dir) = env.var(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    // 3. Default to system data directory
    dirs::data_dir().ok_or(AppDataError::NoDataDir)
}

/// Link kind used for the convenience link on this platform.
pub const fn link_kind() -> LinkKind {
    if cfg!(windows) {
        LinkKind::Junction
    } else {
        LinkKind::Dir
    }
}

/// Directory the convenience link is created in.
pub(super) fn working_dir(explicit: Option<&Path>) -> io::Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => env::current_dir(),
    }
}
