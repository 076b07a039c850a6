//! Provides the `FileConfig` object, used to access config values from a config file.

use super::{Config, ConfigSource};
use crate::{archive::ArchiveFormat, util::LogLevel};
use anyhow::Context;
use serde::Deserialize;
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// Contains the config values from a config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// General config options
    general: GeneralOptions,
    /// Server installation config options
    server: ServerOptions,
    /// HTTP config options
    network: NetworkOptions,
}

/// Contains the config values from the `[general]` section of a config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GeneralOptions {
    /// The log level to use.
    log_level: Option<LogLevel>,
}

/// Contains the config values from the `[server]` section of a config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ServerOptions {
    /// The installation's base directory.
    base_directory: Option<PathBuf>,
    /// URL of the headless server archive.
    download_url: Option<String>,
    /// Format of the headless server archive.
    archive_format: Option<ArchiveFormat>,
}

/// Contains the config values from the `[network]` section of a config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NetworkOptions {
    /// HTTP connect timeout in seconds.
    connect_timeout: Option<u64>,
    /// HTTP request timeout in seconds.
    timeout: Option<u64>,
}

impl FileConfig {
    /// Returns a new `FileConfig` built from a given config file reader.
    pub fn from_reader<R>(file: &mut R) -> anyhow::Result<Self>
    where
        R: Read,
    {
        let mut file_contents = String::new();
        file.read_to_string(&mut file_contents)?;
        Ok(toml::from_str(&file_contents)?)
    }

    /// Returns a new `FileConfig` built from the config file at a given path, or `None` if the file
    /// doesn't exist.
    pub fn from_path<P>(path: P) -> anyhow::Result<Option<Self>>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut file = match fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to open config file {}", path.display())),
        };

        Self::from_reader(&mut file)
            .with_context(|| format!("Failed to load config file {}", path.display()))
            .map(Some)
    }
}

impl ConfigSource for FileConfig {
    fn apply_to_config(self, config: Config) -> Config {
        Config {
            log_level: self.general.log_level.unwrap_or(config.log_level),
            base_directory: self.server.base_directory.unwrap_or(config.base_directory),
            server_url: self.server.download_url.unwrap_or(config.server_url),
            server_format: self.server.archive_format.unwrap_or(config.server_format),
            connect_timeout: self.network.connect_timeout.unwrap_or(config.connect_timeout),
            timeout: self.network.timeout.unwrap_or(config.timeout),
        }
    }
}
