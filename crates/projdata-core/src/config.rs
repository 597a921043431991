//! Configuration for the application data manager.
//!
//! [`AppDataConfig`] is built once at startup and handed to
//! [`AppData::new`](crate::paths::AppData::new). Values that must be read at
//! call time (the environment channel and the self-test flag) go through an
//! [`EnvSource`] so tests can swap the process environment for a fixed map.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Overrides the product name used as the last segment of the data root.
pub const PRODUCT_NAME_VAR: &str = "PROJDATA_PRODUCT_NAME";

/// Overrides the OS per-user data directory the root is placed under.
pub const DATA_DIR_VAR: &str = "PROJDATA_DATA_DIR";

/// User-facing channel override. Takes precedence over [`INTERNAL_ENV_VAR`].
pub const CONFIG_ENV_VAR: &str = "PROJDATA_CONFIG_ENV";

/// Internal channel selector. Also decides whether this is a production run.
pub const INTERNAL_ENV_VAR: &str = "PROJDATA_INTERNAL_ENV";

/// When truthy, the channel gets [`SELF_TEST_SUFFIX`] appended.
pub const SELF_TEST_VAR: &str = "PROJDATA_INTERNAL_SELF_TEST";

/// Appended to the channel name during self-test runs.
pub const SELF_TEST_SUFFIX: &str = "-self-test";

/// Channel used when neither channel variable is set.
pub const DEFAULT_CHANNEL: &str = "development";

/// Value of [`INTERNAL_ENV_VAR`] that marks a production run.
pub const PRODUCTION_CHANNEL: &str = "production";

/// Product name used when nothing else is configured.
pub const DEFAULT_PRODUCT_NAME: &str = "projdata";

/// Fixed sub-namespace between the data root and the channel.
pub const DEFAULT_NAMESPACE: &str = "app";

/// Name of the convenience link created in the working directory.
pub const DEFAULT_LINK_NAME: &str = ".projdata";

/// Delay between provisioning attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Source of configuration values that are read on every call.
pub trait EnvSource: Send + Sync + fmt::Debug {
    /// Look up a variable. Unset and non-unicode values are both `None`.
    fn var(&self, key: &str) -> Option<String>;
}

/// [`EnvSource`] backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// How many times provisioning is attempted, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    /// Two attempts with a fixed 100ms pause.
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least one.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt, no retry.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

/// Startup configuration for [`AppData`](crate::paths::AppData).
///
/// Use the builder methods to customize.
///
/// # Example
///
/// ```
/// use projdata_core::{AppDataConfig, RetryPolicy};
/// use std::time::Duration;
///
/// let config = AppDataConfig::new()
///     .with_product_name("my-tool")
///     .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(50)));
/// assert_eq!(config.product_name(), "my-tool");
/// ```
#[derive(Debug, Clone)]
pub struct AppDataConfig {
    /// Last segment of the data root
    pub(crate) product_name: String,
    /// Literal segment between the root and the channel
    pub(crate) namespace: String,
    /// File name of the convenience link
    pub(crate) link_name: String,
    /// Directory the link is created in (process cwd when `None`)
    pub(crate) working_dir: Option<PathBuf>,
    /// Replaces the OS data directory when set
    pub(crate) data_dir: Option<PathBuf>,
    /// Provisioning retry policy
    pub(crate) retry: RetryPolicy,
    /// Where call-time configuration is read from
    pub(crate) env: Arc<dyn EnvSource>,
}

impl Default for AppDataConfig {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            link_name: DEFAULT_LINK_NAME.to_string(),
            working_dir: None,
            data_dir: None,
            retry: RetryPolicy::default(),
            env: Arc::new(ProcessEnv),
        }
    }
}

impl AppDataConfig {
    /// Create a configuration with default settings, reading the process
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from an environment source.
    ///
    /// Picks up [`PRODUCT_NAME_VAR`]. An explicitly empty product name is kept
    /// as-is so that [`AppData::new`] can reject it. [`DATA_DIR_VAR`] is read
    /// later, when the root is first resolved.
    ///
    /// [`AppData::new`]: crate::paths::AppData::new
    #[must_use]
    pub fn from_env(env: Arc<dyn EnvSource>) -> Self {
        let mut config = Self::default();
        if let Some(name) = env.var(PRODUCT_NAME_VAR) {
            config.product_name = name;
        }
        config.env = env;
        config
    }

    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Set the literal segment placed between the root and the channel.
    ///
    /// Defaults to `app`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the file name of the convenience link.
    ///
    /// Defaults to `.projdata`.
    #[must_use]
    pub fn with_link_name(mut self, name: impl Into<String>) -> Self {
        self.link_name = name.into();
        self
    }

    /// Pin the directory the convenience link lives in.
    ///
    /// Defaults to the process working directory at call time.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Place the data root under `dir` instead of the OS data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the source of call-time configuration.
    #[must_use]
    pub fn with_env_source(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}
