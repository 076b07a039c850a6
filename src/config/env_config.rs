//! Provides the `EnvConfig` object, used to access config values from the running program's
//! environment variables.

use super::{Config, ConfigSource};
use crate::{archive::ArchiveFormat, util, util::LogLevel, APP_PREFIX};
use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

/// Contains the config values from the environment variables prefixed with
/// [`APP_PREFIX`](crate::APP_PREFIX).
#[derive(Debug, Deserialize, Default)]
pub struct EnvConfig {
    log_level: Option<LogLevel>,
    base_directory: Option<PathBuf>,
    server_url: Option<String>,
    archive_format: Option<ArchiveFormat>,
    connect_timeout: Option<u64>,
    timeout: Option<u64>,
}

impl EnvConfig {
    /// Returns a new `EnvConfig` built from the program's environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        envy::prefixed(APP_PREFIX).from_env::<Self>().with_context(|| {
            format!(
                "Failed to load config from environment variables:\n{}",
                util::env::dump_string(APP_PREFIX)
            )
        })
    }
}

impl ConfigSource for EnvConfig {
    fn apply_to_config(self, config: Config) -> Config {
        Config {
            log_level: self.log_level.unwrap_or(config.log_level),
            base_directory: self.base_directory.unwrap_or(config.base_directory),
            server_url: self.server_url.unwrap_or(config.server_url),
            server_format: self.archive_format.unwrap_or(config.server_format),
            connect_timeout: self.connect_timeout.unwrap_or(config.connect_timeout),
            timeout: self.timeout.unwrap_or(config.timeout),
        }
    }
}
