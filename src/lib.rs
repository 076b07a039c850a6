//! Provisions a headless Linux Factorio server: downloads and unpacks the server, writes its
//! settings file, fetches a save and a set of mods, and produces the command that launches it.

#![warn(clippy::if_not_else)]
#![warn(clippy::needless_pass_by_value)]

pub mod archive;
pub mod config;
pub mod error;
pub mod factorio;
pub mod fetcher;
pub mod log;
pub mod opts;
pub mod util;

use ::log::*;
use archive::ArchiveFormat;
use config::Config;
use error::{ExtractError, ProvisionError};
use factorio::{
    settings::{ServerSettings, SettingsParams},
    Layout,
};
use fetcher::{FetchResult, Fetcher};
use strum_macros::Display;
use tokio::task;

/// The prefix used with every environment value related to the program configuration.
pub const APP_PREFIX: &str = "FACTINSTALL_";

/// The steps of a provisioning run, in the order they're executed. Displays as the action the
/// step performs.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    #[strum(to_string = "create the base directory")]
    CreateBaseDirectory,
    #[strum(to_string = "download the server archive")]
    DownloadServer,
    #[strum(to_string = "unpack the server archive")]
    ExtractServer,
    #[strum(to_string = "remove the staged server archive")]
    RemoveStagedServer,
    #[strum(to_string = "write the server settings")]
    WriteSettings,
    #[strum(to_string = "create the save and mod directories")]
    CreateSubdirectories,
    #[strum(to_string = "download the save file")]
    DownloadSave,
    #[strum(to_string = "download the mods archive")]
    DownloadMods,
    #[strum(to_string = "unpack the mods archive")]
    ExtractMods,
    #[strum(to_string = "remove the staged mods archive")]
    RemoveStagedMods,
}

/// The caller-supplied values of a single provisioning run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionParams {
    /// Values written into the server settings.
    pub settings: SettingsParams,
    /// URL of the save file.
    pub save_url: String,
    /// URL of the mods zip.
    pub mods_url: String,
}

/// The outcome of a completed provisioning run.
#[derive(Debug, Clone, PartialEq)]
pub struct Provisioned {
    /// The downloaded server archive. The file itself is removed once it has been unpacked.
    pub server: FetchResult,
    /// The downloaded save file.
    pub save: FetchResult,
    /// The shell command that starts the provisioned server.
    pub launch_command: String,
}

/// Installs and configures a Factorio server into the base directory of a given config.
#[derive(Debug)]
pub struct Provisioner {
    /// The program config.
    config: Config,
    /// The installation's paths.
    layout: Layout,
    /// Used for every download.
    fetcher: Fetcher,
}

impl Provisioner {
    /// Returns a new `Provisioner` with a given config.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        let layout = Layout::new(&config.base_directory);

        Ok(Self {
            config,
            layout,
            fetcher,
        })
    }

    /// Returns the installation's paths.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Runs every provisioning step in order. The first failing step aborts the run; whatever the
    /// previous steps produced is left in place.
    pub async fn run(&self, params: &ProvisionParams) -> Result<Provisioned, ProvisionError> {
        let base = self.layout.base();

        info!("Creating base directory {}", base.display());
        util::file::ensure_directory(base).map_err(ProvisionError::at(Step::CreateBaseDirectory))?;

        info!("Downloading server from {}", self.config.server_url);
        let server = self
            .fetcher
            .fetch_into(base, &self.config.server_url)
            .await
            .map_err(ProvisionError::at(Step::DownloadServer))?;

        info!("Unpacking server archive {}", server.file_name);
        let (staged, target, format) = (server.path.clone(), base.to_path_buf(), self.config.server_format);
        unpack(Step::ExtractServer, move || {
            archive::extract_unwrapping(&staged, &target, format, factorio::EXECUTABLE)
        })
        .await?;
        if !self.layout.executable().is_file() {
            warn!(
                "The server archive didn't contain {}, the launch command won't work as is",
                factorio::EXECUTABLE
            );
        }

        info!("Removing staged server archive {}", server.path.display());
        util::file::remove_file_if_exists(&server.path).map_err(ProvisionError::at(Step::RemoveStagedServer))?;

        info!("Writing server settings into {}", self.layout.settings_file().display());
        self.write_settings(&params.settings)
            .map_err(ProvisionError::at(Step::WriteSettings))?;

        info!("Creating save and mod directories");
        util::file::ensure_directory(self.layout.saves())
            .and_then(|_| util::file::ensure_directory(self.layout.mods()))
            .map_err(ProvisionError::at(Step::CreateSubdirectories))?;

        info!("Downloading save from {}", params.save_url);
        let save = self
            .fetcher
            .fetch_into(self.layout.saves(), &params.save_url)
            .await
            .map_err(ProvisionError::at(Step::DownloadSave))?;

        info!("Downloading mods from {}", params.mods_url);
        let mods = self
            .fetcher
            .fetch_into(self.layout.mods(), &params.mods_url)
            .await
            .map_err(ProvisionError::at(Step::DownloadMods))?;

        info!("Unpacking mods archive {}", mods.file_name);
        let (staged, target) = (mods.path.clone(), self.layout.mods());
        unpack(Step::ExtractMods, move || {
            archive::extract(&staged, &target, ArchiveFormat::Zip)
        })
        .await?;

        info!("Removing staged mods archive {}", mods.path.display());
        util::file::remove_file_if_exists(&mods.path).map_err(ProvisionError::at(Step::RemoveStagedMods))?;

        let launch_command = self.layout.launch_command(&save.file_name);
        info!("Server provisioned into {}", base.display());

        Ok(Provisioned {
            server,
            save,
            launch_command,
        })
    }

    /// Builds the server settings from given values and writes them into the settings file.
    fn write_settings(&self, params: &SettingsParams) -> anyhow::Result<()> {
        let settings = ServerSettings::build(params);
        debug!("{:?}", settings);

        util::file::write_file(self.layout.settings_file(), settings.to_json()?)?;
        Ok(())
    }
}

/// Runs a given extraction on the blocking thread pool and waits for it to finish.
async fn unpack<F, T>(step: Step, extraction: F) -> Result<T, ProvisionError>
where
    F: FnOnce() -> Result<T, ExtractError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(extraction)
        .await
        .map_err(ProvisionError::at(step))?
        .map_err(ProvisionError::at(step))
}
