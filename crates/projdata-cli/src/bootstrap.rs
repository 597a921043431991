//! CLI bootstrap - the composition root.
//!
//! The only place where process configuration is turned into an
//! [`AppData`] instance. Handlers receive the finished manager.

use std::path::PathBuf;
use std::sync::Arc;

use projdata_core::{AppData, AppDataConfig, EnvSource};

use crate::error::CliError;
use crate::parser::Cli;

/// Overrides collected from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Replaces `PROJDATA_PRODUCT_NAME` and the built-in default.
    pub product_name: Option<String>,
    /// Directory the convenience link is created in.
    pub working_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            product_name: cli.product_name.clone(),
            working_dir: cli.working_dir.clone(),
        }
    }
}

/// Build the manager from the environment plus CLI overrides.
///
/// A blank product name fails here, before any path is computed.
pub fn bootstrap(config: &CliConfig, env: Arc<dyn EnvSource>) -> Result<AppData, CliError> {
    let mut app_config = AppDataConfig::from_env(env);
    if let Some(name) = &config.product_name {
        app_config = app_config.with_product_name(name.clone());
    }
    if let Some(dir) = &config.working_dir {
        app_config = app_config.with_working_dir(dir.clone());
    }

    Ok(AppData::new(app_config)?)
}
