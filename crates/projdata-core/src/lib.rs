//! Per-project application data directories.
//!
//! Given an absolute project path, `projdata-core` derives a stable
//! identifier, places it under the platform's per-user data directory, and
//! provisions or tears down that location. A convenience link in the working
//! directory exposes the data outside production runs.
//!
//! ```no_run
//! use projdata_core::{AppData, AppDataConfig};
//!
//! # async fn demo() -> Result<(), projdata_core::AppDataError> {
//! let app = AppData::new(AppDataConfig::new())?;
//! app.ensure().await?;
//! let bundle = app.bundled_file_path("/home/me/project", "main.js")?;
//! # let _ = bundle;
//! # Ok(())
//! # }
//! ```

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod paths;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{AppDataConfig, EnvSource, ProcessEnv, RetryPolicy};
pub use paths::{
    AppData, AppDataError, Channel, CleanupOutcome, DataLayout, ProjectId, ProjectLayout,
    derive_identifier, sanitize_file_name,
};
pub use ports::{DataFs, LinkKind, OsFs};

#[cfg(test)]
use projdata_core as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
