//! Directory provisioning and convenience link management.
//!
//! `ensure` is retried under the configured [`RetryPolicy`] because another
//! process (a parallel test runner, say) may be tearing down or recreating the
//! same directory at the same moment.
//!
//! [`RetryPolicy`]: crate::config::RetryPolicy

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::app_data::AppData;
use super::error::AppDataError;
use super::platform;

/// Result of a best-effort cleanup step.
///
/// Cleanup of the convenience link never fails the surrounding operation;
/// this type records what happened instead.
#[derive(Debug)]
pub enum CleanupOutcome {
    /// Something was at the link location and it is gone now.
    Removed,
    /// Nothing was there.
    Absent,
    /// Removal failed and the failure was ignored.
    Ignored(io::Error),
}

impl CleanupOutcome {
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

impl AppData {
    /// Ensure the data directory exists, and (outside production) that the
    /// convenience link points at it.
    ///
    /// Each attempt first removes any existing link, then creates the
    /// directory and the link concurrently. A failed attempt is retried after
    /// the policy delay; once attempts are exhausted this fails with
    /// [`AppDataError::ProvisioningFailed`].
    pub async fn ensure(&self) -> Result<(), AppDataError> {
        let policy = self.config.retry;
        let path = self.data_dir()?;
        let link = if self.channel().is_production() {
            None
        } else {
            Some((self.link_target()?, self.link_path()?))
        };

        let mut attempt = 1;
        loop {
            match self.ensure_once(&path, link.as_ref()).await {
                Ok(()) => {
                    debug!(path = %path.display(), attempt, "Provisioned data directory");
                    return Ok(());
                }
                Err(e) if attempt < policy.max_attempts() => {
                    warn!(
                        path = %path.display(),
                        attempt,
                        error = %e,
                        "Provisioning failed, retrying"
                    );
                    tokio::time::sleep(policy.delay()).await;
                    attempt += 1;
                }
                Err(source) => {
                    return Err(AppDataError::ProvisioningFailed {
                        path,
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }

    async fn ensure_once(&self, path: &Path, link: Option<&(PathBuf, PathBuf)>) -> io::Result<()> {
        self.remove_symlink().await;

        let (dir, link) = tokio::join!(self.fs.create_dir_all(path), async {
            match link {
                Some((target, link)) => self.ensure_link(target, link).await,
                None => Ok(()),
            }
        });

        match (dir, link) {
            (Err(dir_err), Err(link_err)) => {
                warn!(path = %path.display(), error = %link_err, "Link creation also failed");
                Err(io::Error::new(
                    dir_err.kind(),
                    format!("{dir_err}; link: {link_err}"),
                ))
            }
            (dir, link) => dir.and(link),
        }
    }

    /// Create the convenience link pointing at the parent of the data
    /// directory.
    ///
    /// A link that already points at the right place is left alone.
    pub async fn symlink(&self) -> Result<(), AppDataError> {
        let target = self.link_target()?;
        let link = self.link_path()?;

        debug!(from = %target.display(), to = %link.display(), "symlink folder");

        match self.ensure_link(&target, &link).await {
            Ok(()) => Ok(()),
            Err(source) => Err(AppDataError::SymlinkFailed {
                link,
                target,
                source,
            }),
        }
    }

    /// Remove the convenience link if present. Never fails.
    pub async fn remove_symlink(&self) -> CleanupOutcome {
        let link = match self.link_path() {
            Ok(link) => link,
            Err(AppDataError::CurrentDir(e)) => return ignored(e),
            Err(e) => return ignored(io::Error::other(e.to_string())),
        };

        match self.fs.remove_link(&link).await {
            Ok(true) => CleanupOutcome::Removed,
            Ok(false) => CleanupOutcome::Absent,
            Err(e) => ignored(e),
        }
    }

    async fn ensure_link(&self, target: &Path, link: &Path) -> io::Result<()> {
        if let Ok(existing) = self.fs.read_link(link).await {
            if existing == target {
                return Ok(());
            }
        }

        if let Some(parent) = link.parent() {
            self.fs.create_dir_all(parent).await?;
        }

        self.fs.symlink(target, link, platform::link_kind()).await
    }
}

fn ignored(error: io::Error) -> CleanupOutcome {
    debug!(error = %error, "Ignoring failure to remove convenience link");
    CleanupOutcome::Ignored(error)
}
