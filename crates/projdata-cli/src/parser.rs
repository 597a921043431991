//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for managing per-project application data.
#[derive(Parser)]
#[command(name = "projdata")]
#[command(about = "Resolve, provision and tear down per-project data directories")]
#[command(version)]
pub struct Cli {
    /// Override the product name used for the data root
    #[arg(long = "product-name", global = true)]
    pub product_name: Option<String>,

    /// Directory the convenience link is created in (defaults to cwd)
    #[arg(long = "working-dir", global = true)]
    pub working_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "projdata",
            "--verbose",
            "--product-name",
            "tool",
            "--working-dir",
            "/tmp/work",
            "ensure",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.product_name.as_deref(), Some("tool"));
        assert_eq!(cli.working_dir, Some(PathBuf::from("/tmp/work")));
        assert!(matches!(cli.command, Some(Commands::Ensure)));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["projdata"]);
        assert!(cli.command.is_none());
    }
}
