//! Environment channel resolution.
//!
//! The channel separates data written by development, test and production
//! runs. It is read from configuration on every call and never cached.

use serde::Serialize;

use crate::config::{
    CONFIG_ENV_VAR, DEFAULT_CHANNEL, EnvSource, INTERNAL_ENV_VAR, PRODUCTION_CHANNEL,
    SELF_TEST_SUFFIX, SELF_TEST_VAR,
};

/// Snapshot of the channel configuration at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    name: String,
    production: bool,
    self_test: bool,
}

impl Channel {
    /// Read the channel from `env`.
    ///
    /// Resolution order for the name:
    /// 1. `PROJDATA_CONFIG_ENV`
    /// 2. `PROJDATA_INTERNAL_ENV`
    /// 3. `development`
    ///
    /// Only `PROJDATA_INTERNAL_ENV` decides whether this is a production run.
    pub fn from_env(env: &dyn EnvSource) -> Self {
        let internal = non_empty(env, INTERNAL_ENV_VAR);
        let production = internal.as_deref() == Some(PRODUCTION_CHANNEL);
        let self_test = env.var(SELF_TEST_VAR).as_deref().is_some_and(is_truthy);

        let mut name = non_empty(env, CONFIG_ENV_VAR)
            .or(internal)
            .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());
        if self_test {
            name.push_str(SELF_TEST_SUFFIX);
        }

        Self {
            name,
            production,
            self_test,
        }
    }

    /// Directory segment for this channel, including any self-test suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_production(&self) -> bool {
        self.production
    }

    pub const fn is_self_test(&self) -> bool {
        self.self_test
    }
}

fn non_empty(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}
