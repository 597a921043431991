//! CLI entry point.
//!
//! Parses arguments, installs logging, builds the manager via bootstrap
//! and dispatches to a handler. Exit codes come from [`CliError`].

use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use projdata_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use projdata_core::ProcessEnv;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let app = bootstrap(&config, Arc::new(ProcessEnv))?;

    match command {
        Commands::Id { project } => {
            handlers::paths::execute(handlers::paths::identifier(&project))?;
        }
        Commands::Path { segments } => {
            handlers::paths::execute(handlers::paths::data_path(&app, &segments))?;
        }
        Commands::Projects { segments } => {
            handlers::paths::execute(handlers::paths::projects_path(&app, &segments))?;
        }
        Commands::Bundled { project, file } => {
            handlers::paths::execute(handlers::paths::bundled_file_path(&app, &project, &file))?;
        }
        Commands::Partitions => {
            handlers::paths::execute(handlers::paths::partitions_path(&app))?;
        }
        Commands::Paths { project, json } => {
            handlers::paths::execute(handlers::paths::layout(&app, project.as_deref(), json))?;
        }
        Commands::Ensure => handlers::provision::ensure(&app).await?,
        Commands::Remove => handlers::provision::remove(&app).await?,
        Commands::Symlink => handlers::provision::symlink(&app).await?,
        Commands::Unlink => handlers::provision::unlink(&app).await?,
    }

    Ok(())
}
