//! Path-related error types.
//!
//! Only failures that concern the primary data directory surface here.
//! Cleanup of the convenience link reports through
//! [`CleanupOutcome`](super::CleanupOutcome) and never becomes an error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution, provisioning and teardown.
#[derive(Debug, Error)]
pub enum AppDataError {
    /// The project path was empty or not absolute.
    #[error("Invalid project path: {0}")]
    InvalidInput(String),

    /// No product name was configured. Raised when the manager is built.
    #[error("Product name is not configured")]
    MissingProductName,

    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// Creating the data directory or its link failed on every attempt.
    #[error("Failed to provision {path} after {attempts} attempt(s): {source}")]
    ProvisioningFailed {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    /// An explicitly requested link could not be created.
    #[error("Failed to link {link} -> {target}: {source}")]
    SymlinkFailed {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Recursive removal of the data directory failed.
    #[error("Failed to remove {path}: {source}")]
    TeardownFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AppDataError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
