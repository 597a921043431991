//! Command handlers.
//!
//! Each handler takes the finished [`AppData`](projdata_core::AppData),
//! calls into the core and formats the result for the terminal. Failures
//! from the core are wrapped in [`CliError`](crate::CliError) so `main`
//! can pick the exit code.

pub mod paths;
pub mod provision;
