//! Per-project application data paths.
//!
//! This module provides the canonical path resolution for project data:
//! - Project identifiers derived from absolute project paths
//! - The application data root and channel-scoped subpaths
//! - Provisioning and teardown of the data directory
//! - The convenience link in the working directory
//!
//! # Design
//!
//! - Returns `PathBuf` and `AppDataError` for clear error handling
//! - The data root is memoized per [`AppData`] instance, not globally
//! - OS-specific logic is kept private in `platform`

mod app_data;
mod channel;
mod ensure;
mod error;
mod identifier;
mod platform;
mod resolver;
mod teardown;

// Re-export public API

// Error type
pub use error::AppDataError;

// Manager and path builders
pub use app_data::{AppData, BUNDLES_SEGMENT, PARTITIONS_SEGMENT, PROJECTS_SEGMENT};

// Channel
pub use channel::Channel;

// Identifiers
pub use identifier::{ProjectId, derive_identifier, sanitize_file_name};

// Platform
pub use platform::link_kind;

// Provisioning
pub use ensure::CleanupOutcome;

// Layout snapshot
pub use resolver::{DataLayout, ProjectLayout};
