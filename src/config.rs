//! The configuration framework for factinstall.
//!
//! A [`Config`](Config) starts from its defaults and is layered with values from, in order, the
//! config file, the environment variables and the command line. Later sources override earlier
//! ones, and a source only overrides the values it actually specifies.

mod env_config;
mod file_config;
mod opts_config;

use crate::{archive::ArchiveFormat, opts::Opts, util, APP_PREFIX};
use env_config::EnvConfig;
use file_config::FileConfig;
use log::*;
use opts_config::OptsConfig;
use std::path::{Path, PathBuf};
use util::LogLevel;

/// The default config file location.
pub const DEFAULT_CONFIG_FILE_LOCATION: &str = "factinstall.toml";
/// The default base installation directory.
pub const DEFAULT_BASE_DIRECTORY: &str = "/opt/factorio";
/// The default URL of the latest stable headless server archive.
pub const DEFAULT_SERVER_URL: &str = "https://www.factorio.com/get-download/stable/headless/linux64";
/// The default format of the headless server archive.
pub const DEFAULT_SERVER_FORMAT: ArchiveFormat = ArchiveFormat::TarXz;
/// The default HTTP connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 30;
/// The default HTTP request timeout in seconds, covering the whole download.
pub const DEFAULT_TIMEOUT: u64 = 1800;

/// Defines a source of configuration values.
pub trait ConfigSource {
    /// Applies the contained config values to a given `Config`, returning a new `Config` with the
    /// values set.
    fn apply_to_config(self, config: Config) -> Config;
}

/// The program configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The log level to use.
    pub log_level: LogLevel,
    /// The server installation's base directory.
    pub base_directory: PathBuf,
    /// URL of the headless server archive.
    pub server_url: String,
    /// Format of the headless server archive.
    pub server_format: ArchiveFormat,
    /// HTTP connect timeout in seconds.
    pub connect_timeout: u64,
    /// HTTP request timeout in seconds.
    pub timeout: u64,
}

/// Builds a [`Config`](Config) by layering config sources on top of the defaults.
pub struct Builder {
    /// The config built so far.
    config: Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            base_directory: PathBuf::from(DEFAULT_BASE_DIRECTORY),
            server_url: String::from(DEFAULT_SERVER_URL),
            server_format: DEFAULT_SERVER_FORMAT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Logs the environment variables relevant to the config and the config itself.
    pub fn debug_values(&self) {
        debug!("{:?}", util::env::dump_lines(APP_PREFIX));
        debug!("{:?}", self);
    }
}

impl Builder {
    /// Returns a new `Builder` starting from the default config.
    pub fn new() -> Builder {
        Builder {
            config: Config::default(),
        }
    }

    /// Applies a given config file. A file that doesn't exist is skipped.
    pub fn apply_config_file<P>(self, path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        match FileConfig::from_path(path)? {
            Some(file_config) => Ok(self.apply(file_config)),
            None => Ok(self),
        }
    }

    /// Applies the program's environment variables. In debug builds a `.env` file is loaded first.
    pub fn apply_env(self) -> anyhow::Result<Self> {
        if cfg!(debug_assertions) {
            dotenv::dotenv().ok();
        }

        Ok(self.apply(EnvConfig::from_env()?))
    }

    /// Applies the program's command line parameters.
    pub fn apply_opts(self, opts: &Opts) -> Self {
        self.apply(OptsConfig::new(opts))
    }

    /// Returns the built config.
    pub fn build(self) -> Config {
        self.config
    }

    fn apply<S>(self, source: S) -> Self
    where
        S: ConfigSource,
    {
        Builder {
            config: source.apply_to_config(self.config),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
