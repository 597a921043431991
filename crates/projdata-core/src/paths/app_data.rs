//! The application data manager and its path builders.
//!
//! [`AppData`] owns the memoized data root. Every path it hands out is laid
//! out as:
//!
//! ```text
//! {os data dir}/{product}/{namespace}/{channel}/...
//! {os data dir}/{product}/Partitions
//! ```
//!
//! Provisioning and teardown live in sibling modules as further `impl` blocks.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::channel::Channel;
use super::error::AppDataError;
use super::identifier::derive_identifier;
use super::platform;
use crate::config::AppDataConfig;
use crate::ports::{DataFs, OsFs};

/// Segment under the channel that holds per-project directories.
pub const PROJECTS_SEGMENT: &str = "projects";

/// Segment under a project directory that holds bundled files.
pub const BUNDLES_SEGMENT: &str = "bundles";

/// Segment under the root for browser partitions. Not channel-scoped.
pub const PARTITIONS_SEGMENT: &str = "Partitions";

/// Per-machine, per-project application data directory manager.
#[derive(Debug)]
pub struct AppData {
    pub(super) config: AppDataConfig,
    pub(super) fs: Arc<dyn DataFs>,
    root: OnceLock<PathBuf>,
}

impl AppData {
    /// Create a manager backed by the host filesystem.
    ///
    /// Fails with [`AppDataError::MissingProductName`] when the product name is
    /// blank. Callers should treat that as a startup error.
    pub fn new(config: AppDataConfig) -> Result<Self, AppDataError> {
        Self::with_fs(config, Arc::new(OsFs))
    }

    /// Create a manager with an explicit filesystem implementation.
    pub fn with_fs(config: AppDataConfig, fs: Arc<dyn DataFs>) -> Result<Self, AppDataError> {
        if config.product_name.trim().is_empty() {
            return Err(AppDataError::MissingProductName);
        }

        Ok(Self {
            config,
            fs,
            root: OnceLock::new(),
        })
    }

    pub const fn config(&self) -> &AppDataConfig {
        &self.config
    }

    /// The application data root, `{os data dir}/{product}`.
    ///
    /// Computed on first call and cached for the lifetime of this instance;
    /// later changes to the data-dir override are not observed.
    pub fn root(&self) -> Result<&Path, AppDataError> {
        if let Some(root) = self.root.get() {
            return Ok(root.as_path());
        }

        let base =
            platform::os_data_dir(self.config.data_dir.as_deref(), self.config.env.as_ref())?;
        let root = base.join(&self.config.product_name);
        debug!(root = %root.display(), "Resolved application data root");

        Ok(self.root.get_or_init(|| root).as_path())
    }

    /// Read the current environment channel.
    pub fn channel(&self) -> Channel {
        Channel::from_env(self.config.env.as_ref())
    }

    /// Build `{root}/{namespace}/{channel}/{segments..}`.
    ///
    /// The channel is read from configuration on every call. Root and prefix
    /// components inside `segments` are dropped, so an absolute segment
    /// cannot escape the data directory.
    pub fn data_path<I, S>(&self, segments: I) -> Result<PathBuf, AppDataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let channel = self.channel();
        let mut path = self
            .root()?
            .join(&self.config.namespace)
            .join(channel.name());
        for segment in segments {
            push_segment(&mut path, segment.as_ref());
        }

        debug!(path = %path.display(), "data path");
        Ok(path)
    }

    /// The provisioned directory: [`data_path`](Self::data_path) with no
    /// extra segments.
    pub fn data_dir(&self) -> Result<PathBuf, AppDataError> {
        self.data_path(std::iter::empty::<&Path>())
    }

    /// Build `{data_path}/projects/{segments..}`.
    pub fn projects_path<I, S>(&self, segments: I) -> Result<PathBuf, AppDataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let rest = segments.into_iter().map(|s| s.as_ref().to_path_buf());
        self.data_path(std::iter::once(PathBuf::from(PROJECTS_SEGMENT)).chain(rest))
    }

    /// Location of a bundled file for a project:
    /// `{projects_path}/{identifier}/bundles/{file_path}`.
    pub fn bundled_file_path(
        &self,
        project_root: impl AsRef<Path>,
        file_path: impl AsRef<Path>,
    ) -> Result<PathBuf, AppDataError> {
        let id = derive_identifier(project_root)?;
        self.projects_path([
            Path::new(id.as_str()),
            Path::new(BUNDLES_SEGMENT),
            file_path.as_ref(),
        ])
    }

    /// Build `{root}/Partitions`. Independent of the channel.
    pub fn partitions_path(&self) -> Result<PathBuf, AppDataError> {
        let path = self.root()?.join(PARTITIONS_SEGMENT);
        debug!(path = %path.display(), "partitions path");
        Ok(path)
    }

    /// Directory the convenience link is created in.
    pub fn working_dir(&self) -> Result<PathBuf, AppDataError> {
        platform::working_dir(self.config.working_dir.as_deref()).map_err(AppDataError::CurrentDir)
    }

    /// Location of the convenience link, `{working dir}/{link name}`.
    pub fn link_path(&self) -> Result<PathBuf, AppDataError> {
        Ok(self.working_dir()?.join(&self.config.link_name))
    }

    /// What the convenience link points at: the parent of
    /// [`data_dir`](Self::data_dir), so every channel is reachable through it.
    pub fn link_target(&self) -> Result<PathBuf, AppDataError> {
        let data_dir = self.data_dir()?;
        Ok(data_dir
            .parent()
            .map_or_else(|| data_dir.clone(), Path::to_path_buf))
    }
}

fn push_segment(path: &mut PathBuf, segment: &Path) {
    for component in segment.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => path.push(component),
        }
    }
}
