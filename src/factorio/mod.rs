//! Provides the [`Layout`](Layout) of a provisioned Factorio server installation and its
//! [`settings`](settings).

pub mod settings;

use std::path::{Path, PathBuf};

/// The server settings file's name inside the base directory.
pub const SETTINGS_FILE: &str = "config.json";
/// The save directory's name inside the base directory.
pub const SAVES_DIRECTORY: &str = "saves";
/// The mod directory's name inside the base directory.
pub const MODS_DIRECTORY: &str = "mods";
/// The server executable's path relative to the base directory.
pub const EXECUTABLE: &str = "bin/x64/factorio";

/// The paths of a Factorio server installation, all derived from its base directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// The installation's base directory.
    base: PathBuf,
}

impl Layout {
    /// Returns a new `Layout` rooted at a given base directory.
    pub fn new<P>(base: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Returns the base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the path of the server settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.base.join(SETTINGS_FILE)
    }

    /// Returns the save directory.
    pub fn saves(&self) -> PathBuf {
        self.base.join(SAVES_DIRECTORY)
    }

    /// Returns the mod directory.
    pub fn mods(&self) -> PathBuf {
        self.base.join(MODS_DIRECTORY)
    }

    /// Returns the path of the server executable.
    pub fn executable(&self) -> PathBuf {
        self.base.join(EXECUTABLE)
    }

    /// Returns the shell command that starts the server with a given save file from the saves
    /// directory and the provisioned settings file.
    pub fn launch_command(&self, save_file: &str) -> String {
        format!(
            "{} --start-server {} --server-settings {}",
            self.executable().display(),
            self.saves().join(save_file).display(),
            self.settings_file().display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_command() {
        let layout = Layout::new("/opt/factorio");

        assert_eq!(layout.settings_file(), Path::new("/opt/factorio/config.json"));
        assert_eq!(
            layout.launch_command("save.zip"),
            "/opt/factorio/bin/x64/factorio --start-server /opt/factorio/saves/save.zip --server-settings \
             /opt/factorio/config.json"
        );
    }
}
