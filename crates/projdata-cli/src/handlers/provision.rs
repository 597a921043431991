//! Handlers that change the filesystem.

use anyhow::Result;
use tracing::{info, warn};

use projdata_core::{AppData, CleanupOutcome};

use crate::error::CliError;

/// Create the data directory and, outside production, the convenience link.
pub async fn ensure(app: &AppData) -> Result<()> {
    app.ensure().await.map_err(CliError::from)?;
    let dir = app.data_dir().map_err(CliError::from)?;
    info!(path = %dir.display(), "Data directory ready");
    println!("{}", dir.display());
    Ok(())
}

/// Remove the data directory and the convenience link.
pub async fn remove(app: &AppData) -> Result<()> {
    let dir = app.data_dir().map_err(CliError::from)?;
    app.remove().await.map_err(CliError::from)?;
    info!(path = %dir.display(), "Data directory removed");
    Ok(())
}

/// Create only the convenience link.
pub async fn symlink(app: &AppData) -> Result<()> {
    app.symlink().await.map_err(CliError::from)?;
    let link = app.link_path().map_err(CliError::from)?;
    println!("{}", link.display());
    Ok(())
}

/// Remove only the convenience link. Always succeeds.
pub async fn unlink(app: &AppData) -> Result<()> {
    match app.remove_symlink().await {
        CleanupOutcome::Removed => info!("Convenience link removed"),
        CleanupOutcome::Absent => info!("No convenience link present"),
        CleanupOutcome::Ignored(e) => warn!(error = %e, "Could not remove convenience link"),
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::sync::Arc;

    use projdata_core::AppDataConfig;
    use projdata_core::testing::StaticEnv;
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn test_ensure_then_remove() {
        let temp = tempdir().unwrap();
        let config = AppDataConfig::new()
            .with_product_name("cli-test")
            .with_data_dir(temp.path().join("data"))
            .with_working_dir(temp.path())
            .with_env_source(Arc::new(StaticEnv::new()));
        let app = AppData::new(config).unwrap();

        ensure(&app).await.unwrap();
        assert!(app.data_dir().unwrap().is_dir());
        assert!(temp.path().join(".projdata").is_symlink());

        unlink(&app).await.unwrap();
        assert!(!temp.path().join(".projdata").is_symlink());

        remove(&app).await.unwrap();
        assert!(!app.data_dir().unwrap().exists());
    }

    #[tokio::test]
    async fn test_ensure_error_keeps_exit_code() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let config = AppDataConfig::new()
            .with_product_name("cli-test")
            // Data root beneath a regular file cannot be created
            .with_data_dir(&blocker)
            .with_working_dir(temp.path())
            .with_env_source(Arc::new(StaticEnv::new()));
        let app = AppData::new(config).unwrap();

        let err = ensure(&app).await.unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().expect("CliError");
        assert_eq!(cli_err.exit_code(), 74);
    }
}
