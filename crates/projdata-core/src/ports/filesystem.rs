//! Filesystem port.
//!
//! The provisioner and teardown only touch the disk through [`DataFs`], so
//! tests can inject failures without racing real processes.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

/// Kind of directory link to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Plain directory symbolic link.
    Dir,
    /// NTFS directory junction. Only meaningful on Windows; elsewhere it is
    /// created as a plain directory link.
    Junction,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir => f.write_str("dir"),
            Self::Junction => f.write_str("junction"),
        }
    }
}

/// Filesystem primitives used by provisioning and teardown.
#[async_trait]
pub trait DataFs: Send + Sync + fmt::Debug {
    /// Create `path` and any missing parents. Succeeds if it already exists.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove `path` recursively. Succeeds if it does not exist.
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a link at `link` that points to `target`.
    async fn symlink(&self, target: &Path, link: &Path, kind: LinkKind) -> io::Result<()>;

    /// Remove whatever sits at `path` without following links.
    ///
    /// Returns `Ok(false)` when nothing was there.
    async fn remove_link(&self, path: &Path) -> io::Result<bool>;

    /// Read the target of the link at `path`.
    async fn read_link(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`DataFs`] backed by the host filesystem via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

#[async_trait]
impl DataFs for OsFs {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    async fn symlink(&self, target: &Path, link: &Path, kind: LinkKind) -> io::Result<()> {
        match kind {
            LinkKind::Dir => symlink_dir(target, link).await,
            LinkKind::Junction => create_junction(target, link).await,
        }
    }

    async fn remove_link(&self, path: &Path) -> io::Result<bool> {
        let meta = match tokio::fs::symlink_metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };

        let result = if meta.file_type().is_symlink() {
            // Windows directory links and junctions need remove_dir
            match tokio::fs::remove_file(path).await {
                Err(e) if cfg!(windows) && e.kind() != io::ErrorKind::NotFound => {
                    tokio::fs::remove_dir(path).await
                }
                other => other,
            }
        } else if meta.is_dir() {
            tokio::fs::remove_dir_all(path).await
        } else {
            tokio::fs::remove_file(path).await
        };

        match result {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        tokio::fs::read_link(path).await
    }
}

#[cfg(unix)]
async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    tokio::fs::symlink(target, link).await
}

#[cfg(windows)]
async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    tokio::fs::symlink_dir(target, link).await
}

#[cfg(not(any(unix, windows)))]
async fn symlink_dir(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "directory links are not supported on this platform",
    ))
}

#[cfg(windows)]
async fn create_junction(target: &Path, link: &Path) -> io::Result<()> {
    let target = target.to_path_buf();
    let link = link.to_path_buf();

    // Junctions don't need the symlink privilege
    tokio::task::spawn_blocking(move || junction::create(&target, &link))
        .await
        .map_err(io::Error::other)?
}

#[cfg(not(windows))]
async fn create_junction(target: &Path, link: &Path) -> io::Result<()> {
    symlink_dir(target, link).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn remove_dir_all_missing_is_ok() {
        let temp = tempdir().unwrap();
        OsFs.remove_dir_all(&temp.path().join("nope")).await.unwrap();
    }

    #[tokio::test]
    async fn symlink_then_remove_link_keeps_target() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "data").unwrap();

        OsFs.symlink(&target, &link, LinkKind::Dir).await.unwrap();
        assert_eq!(OsFs.read_link(&link).await.unwrap(), target);

        assert!(OsFs.remove_link(&link).await.unwrap());
        assert!(std::fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn remove_link_reports_absent() {
        let temp = tempdir().unwrap();
        assert!(!OsFs.remove_link(&temp.path().join("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn remove_link_clears_plain_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("dir");
        std::fs::create_dir_all(dir.join("nested")).unwrap();

        assert!(OsFs.remove_link(&dir).await.unwrap());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn junction_falls_back_to_symlink() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        std::fs::create_dir(&target).unwrap();

        OsFs.symlink(&target, &link, LinkKind::Junction).await.unwrap();
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn link_kind_display() {
        assert_eq!(LinkKind::Dir.to_string(), "dir");
        assert_eq!(LinkKind::Junction.to_string(), "junction");
    }
}
