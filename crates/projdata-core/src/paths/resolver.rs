//! Snapshot of every resolved path.
//!
//! Captures the whole layout in one call, for the `projdata paths` command
//! and for consistency checks in tests.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::app_data::{AppData, BUNDLES_SEGMENT};
use super::error::AppDataError;
use super::identifier::{ProjectId, derive_identifier};
use super::platform::link_kind;
use crate::ports::LinkKind;

/// Paths belonging to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLayout {
    /// Absolute project path the identifier was derived from
    pub project_root: PathBuf,
    /// Derived project identifier
    pub identifier: ProjectId,
    /// `{projects_dir}/{identifier}`
    pub project_dir: PathBuf,
    /// `{project_dir}/bundles`
    pub bundles_dir: PathBuf,
}

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataLayout {
    /// Application data root (`{os data dir}/{product}`)
    pub root: PathBuf,
    /// Environment channel name, including any self-test suffix
    pub channel: String,
    /// Whether the channel marks a production run
    pub production: bool,
    /// The provisioned directory
    pub data_dir: PathBuf,
    /// Parent of all project directories
    pub projects_dir: PathBuf,
    /// Browser partitions directory
    pub partitions_dir: PathBuf,
    /// Where the convenience link lives
    pub link_path: PathBuf,
    /// What the convenience link points at
    pub link_target: PathBuf,
    /// Link kind used on this platform
    pub link_kind: LinkKind,
    /// Present when a project path was given
    pub project: Option<ProjectLayout>,
}

impl DataLayout {
    /// Resolve the layout, optionally for one project.
    pub fn resolve(app: &AppData, project_root: Option<&Path>) -> Result<Self, AppDataError> {
        let channel = app.channel();
        let projects_dir = app.projects_path(std::iter::empty::<&Path>())?;

        let project = match project_root {
            Some(root) => {
                let identifier = derive_identifier(root)?;
                let project_dir = projects_dir.join(identifier.as_str());
                Some(ProjectLayout {
                    project_root: root.to_path_buf(),
                    bundles_dir: project_dir.join(BUNDLES_SEGMENT),
                    project_dir,
                    identifier,
                })
            }
            None => None,
        };

        Ok(Self {
            root: app.root()?.to_path_buf(),
            channel: channel.name().to_string(),
            production: channel.is_production(),
            data_dir: app.data_dir()?,
            projects_dir,
            partitions_dir: app.partitions_path()?,
            link_path: app.link_path()?,
            link_target: app.link_target()?,
            link_kind: link_kind(),
            project,
        })
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root = {}", self.root.display())?;
        writeln!(f, "channel = {}", self.channel)?;
        writeln!(f, "production = {}", self.production)?;
        writeln!(f, "data_dir = {}", self.data_dir.display())?;
        writeln!(f, "projects_dir = {}", self.projects_dir.display())?;
        writeln!(f, "partitions_dir = {}", self.partitions_dir.display())?;
        writeln!(f, "link_path = {}", self.link_path.display())?;
        writeln!(f, "link_target = {}", self.link_target.display())?;
        write!(f, "link_kind = {}", self.link_kind)?;
        if let Some(project) = &self.project {
            writeln!(f)?;
            writeln!(f, "project_root = {}", project.project_root.display())?;
            writeln!(f, "identifier = {}", project.identifier)?;
            writeln!(f, "project_dir = {}", project.project_dir.display())?;
            write!(f, "bundles_dir = {}", project.bundles_dir.display())?;
        }
        Ok(())
    }
}
