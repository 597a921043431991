//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use projdata_core::testing::{FlakyFs, StaticEnv};
use projdata_core::{AppData, AppDataConfig, OsFs};
use tempfile::TempDir;

/// Scratch data and working directories plus a manager pointed at them.
///
/// All disk access goes through [`FlakyFs`], which behaves like the real
/// filesystem until failures are armed on it.
pub struct Sandbox {
    pub temp: TempDir,
    pub fs: Arc<FlakyFs>,
    pub app: AppData,
}

impl Sandbox {
    pub fn new(env: StaticEnv) -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir_all(temp.path().join("work")).unwrap();

        let fs = Arc::new(FlakyFs::new(Arc::new(OsFs)));
        let config = AppDataConfig::new()
            .with_product_name("projdata-it")
            .with_data_dir(temp.path().join("data"))
            .with_working_dir(temp.path().join("work"))
            .with_env_source(Arc::new(env));
        let app = AppData::with_fs(config, fs.clone()).unwrap();

        Self { temp, fs, app }
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    pub fn data_base(&self) -> &Path {
        self.temp.path()
    }
}
