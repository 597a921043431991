//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the identifier derived from an absolute project path
    Id {
        /// Absolute path to the project root
        project: PathBuf,
    },

    /// Print a path under the channel-scoped data directory
    Path {
        /// Extra path segments
        segments: Vec<String>,
    },

    /// Print a path under the projects directory
    Projects {
        /// Extra path segments
        segments: Vec<String>,
    },

    /// Print where a bundled file for a project is stored
    Bundled {
        /// Absolute path to the project root
        project: PathBuf,
        /// File path relative to the bundles directory
        file: String,
    },

    /// Print the browser partitions directory
    Partitions,

    /// Show all resolved paths
    Paths {
        /// Also resolve paths for this project
        #[arg(short, long)]
        project: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the data directory and the convenience link
    Ensure,

    /// Remove the data directory and the convenience link
    Remove,

    /// Create only the convenience link
    Symlink,

    /// Remove only the convenience link
    Unlink,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_bundled() {
        let cli = Cli::parse_from(["projdata", "bundled", "/home/me/app", "main.js"]);
        match cli.command {
            Some(Commands::Bundled { project, file }) => {
                assert_eq!(project, PathBuf::from("/home/me/app"));
                assert_eq!(file, "main.js");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_paths_flags() {
        let cli = Cli::parse_from(["projdata", "paths", "--project", "/p", "--json"]);
        match cli.command {
            Some(Commands::Paths { project, json }) => {
                assert_eq!(project, Some(PathBuf::from("/p")));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_segments() {
        let cli = Cli::parse_from(["projdata", "projects", "a", "b"]);
        match cli.command {
            Some(Commands::Projects { segments }) => assert_eq!(segments, ["a", "b"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_every_subcommand_parses() {
        for args in [
            vec!["id", "/p"],
            vec!["path"],
            vec!["projects"],
            vec!["bundled", "/p", "f"],
            vec!["partitions"],
            vec!["paths"],
            vec!["ensure"],
            vec!["remove"],
            vec!["symlink"],
            vec!["unlink"],
        ] {
            let argv = std::iter::once("projdata").chain(args.iter().copied());
            assert!(Cli::try_parse_from(argv).is_ok(), "failed to parse {args:?}");
        }
    }

    #[test]
    fn test_id_requires_project() {
        assert!(Cli::try_parse_from(["projdata", "id"]).is_err());
    }
}
