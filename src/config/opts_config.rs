//! Provides the `OptsConfig` object, used to access config values from the running program's
//! command line arguments.

use super::{Config, ConfigSource};
use crate::{opts::Opts, util::LogLevel};
use std::path::PathBuf;

/// Contains the config values from the running program's command line arguments.
#[derive(Debug, Default)]
pub struct OptsConfig {
    /// Corresponds to the `--log-level` option.
    log_level: Option<LogLevel>,
    /// Corresponds to the `--base-dir` option.
    base_directory: Option<PathBuf>,
    /// Corresponds to the `--server-url` option.
    server_url: Option<String>,
}

impl ConfigSource for OptsConfig {
    fn apply_to_config(self, config: Config) -> Config {
        Config {
            log_level: self.log_level.unwrap_or(config.log_level),
            base_directory: self.base_directory.unwrap_or(config.base_directory),
            server_url: self.server_url.unwrap_or(config.server_url),
            ..config
        }
    }
}

impl OptsConfig {
    /// Returns a new `OptsConfig` built from a given `Opts` object.
    pub fn new(opts: &Opts) -> Self {
        Self {
            log_level: opts.log_level,
            base_directory: opts.base_dir.clone(),
            server_url: opts.server_url.clone(),
        }
    }
}
