//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `AppDataError` to exit codes and user-facing messages.

use projdata_core::AppDataError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core error without a more specific category.
    #[error("{0}")]
    Core(String),

    /// Argument error (bad project path, etc.).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (permission denied, busy files, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 74, 78: see sysexits.h
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<AppDataError> for CliError {
    fn from(err: AppDataError) -> Self {
        match err {
            AppDataError::InvalidInput(msg) => Self::Arguments(msg),
            AppDataError::MissingProductName | AppDataError::NoDataDir => {
                Self::Config(err.to_string())
            }
            AppDataError::CurrentDir(_)
            | AppDataError::ProvisioningFailed { .. }
            | AppDataError::SymlinkFailed { .. }
            | AppDataError::TeardownFailed { .. } => Self::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Core(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_input_maps_to_usage() {
        let err = CliError::from(AppDataError::InvalidInput("relative".to_string()));
        assert!(matches!(err, CliError::Arguments(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_product_name_maps_to_config() {
        let err = CliError::from(AppDataError::MissingProductName);
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("Product name"));
    }

    #[test]
    fn test_filesystem_failures_map_to_io() {
        let err = CliError::from(AppDataError::TeardownFailed {
            path: PathBuf::from("/data"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("/data"));
    }
}
