//! Test doubles for configuration and the filesystem.
//!
//! [`StaticEnv`] replaces the process environment so tests never mutate real
//! environment variables. [`FlakyFs`] wraps a real [`DataFs`] and injects a
//! fixed number of failures per operation, which is how the provisioning
//! retry is exercised deterministically.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;

use crate::config::EnvSource;
use crate::ports::{DataFs, LinkKind};

/// In-memory [`EnvSource`] that can be changed between calls.
#[derive(Debug, Default)]
pub struct StaticEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

#[derive(Debug, Default)]
struct FailureState {
    create_failures: HashMap<PathBuf, u32>,
    remove_failures: HashMap<PathBuf, u32>,
    link_failures: u32,
    unlink_failures: u32,
    create_calls: HashMap<PathBuf, u32>,
}

/// [`DataFs`] wrapper that fails the next N calls of selected operations.
#[derive(Debug)]
pub struct FlakyFs {
    inner: Arc<dyn DataFs>,
    state: Mutex<FailureState>,
}

impl FlakyFs {
    pub fn new(inner: Arc<dyn DataFs>) -> Self {
        Self {
            inner,
            state: Mutex::new(FailureState::default()),
        }
    }

    /// Fail the next `times` calls to `create_dir_all` for exactly `path`.
    pub fn fail_creating(&self, path: &Path, times: u32) {
        self.lock().create_failures.insert(path.to_path_buf(), times);
    }

    /// Fail the next `times` calls to `remove_dir_all` for exactly `path`.
    pub fn fail_removing(&self, path: &Path, times: u32) {
        self.lock().remove_failures.insert(path.to_path_buf(), times);
    }

    /// Fail the next `times` calls to `symlink`.
    pub fn fail_linking(&self, times: u32) {
        self.lock().link_failures = times;
    }

    /// Fail the next `times` calls to `remove_link`.
    pub fn fail_removing_links(&self, times: u32) {
        self.lock().unlink_failures = times;
    }

    /// How many times `create_dir_all` was called for `path`, failed or not.
    pub fn create_calls(&self, path: &Path) -> u32 {
        self.lock().create_calls.get(path).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, FailureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn take_failure(remaining: Option<&mut u32>) -> bool {
    match remaining {
        Some(n) if *n > 0 => {
            *n -= 1;
            true
        }
        _ => false,
    }
}

fn injected(op: &str, path: &Path) -> io::Error {
    io::Error::other(format!("injected {op} failure at {}", path.display()))
}

#[async_trait]
impl DataFs for FlakyFs {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let fail = {
            let mut state = self.lock();
            *state.create_calls.entry(path.to_path_buf()).or_default() += 1;
            take_failure(state.create_failures.get_mut(path))
        };
        if fail {
            return Err(injected("create_dir_all", path));
        }
        self.inner.create_dir_all(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let fail = take_failure(self.lock().remove_failures.get_mut(path));
        if fail {
            return Err(injected("remove_dir_all", path));
        }
        self.inner.remove_dir_all(path).await
    }

    async fn symlink(&self, target: &Path, link: &Path, kind: LinkKind) -> io::Result<()> {
        let fail = take_failure(Some(&mut self.lock().link_failures));
        if fail {
            return Err(injected("symlink", link));
        }
        self.inner.symlink(target, link, kind).await
    }

    async fn remove_link(&self, path: &Path) -> io::Result<bool> {
        let fail = take_failure(Some(&mut self.lock().unlink_failures));
        if fail {
            return Err(injected("remove_link", path));
        }
        self.inner.remove_link(path).await
    }

    async fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.read_link(path).await
    }
}
