//! Provides the [`ServerSettings`](ServerSettings) object written as the server's settings file,
//! and the builder functions that assemble it from user-supplied values and
//! [`SettingsDefaults`](SettingsDefaults).

mod allow_commands;
mod defaults;

use crate::error::SettingsError;
pub use allow_commands::AllowCommands;
pub use defaults::{SettingsDefaults, DEFAULT_ADMIN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a secret value in debug output.
const REDACTED: &str = "<redacted>";

/// The settings values supplied by the user. The debug output hides the token and the password.
#[derive(Clone, Default, PartialEq)]
pub struct SettingsParams {
    /// The name shown in server listings.
    pub name: String,
    /// The description shown in server listings.
    pub description: String,
    /// The factorio.com account token used to list the server publicly.
    pub token: String,
    /// The password players need to join. Empty means no password.
    pub game_password: String,
}

/// Corresponds to the `visibility` setting object.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Visibility {
    /// Corresponds to the `Public` field.
    pub public: bool,
    /// Corresponds to the `Lan` field.
    pub lan: bool,
}

/// Stores a server's settings in the same structure and field order as the game's server settings
/// file. The debug output hides the token and the password.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    /// 0 means unlimited.
    pub max_players: u64,
    pub visibility: Visibility,
    pub token: String,
    pub game_password: String,
    pub require_user_verification: bool,
    /// In kilobytes per second, 0 means unlimited.
    #[serde(rename = "max_upload_in_kilobytes_per_second")]
    pub max_upload: u64,
    #[serde(rename = "minimum_latency_in_ticks")]
    pub minimum_latency: u64,
    pub ignore_player_limit_for_returning_players: bool,
    pub allow_commands: AllowCommands,
    /// In minutes.
    pub autosave_interval: u64,
    pub autosave_slots: u64,
    /// In minutes, 0 means disabled.
    pub afk_autokick_interval: u64,
    pub auto_pause: bool,
    pub only_admins_can_pause_the_game: bool,
    pub autosave_only_on_server: bool,
    pub admins: Vec<String>,
}

impl ServerSettings {
    /// Returns new settings built from given user-supplied values and the default
    /// [`SettingsDefaults`](SettingsDefaults).
    pub fn build(params: &SettingsParams) -> Self {
        Self::build_with(params, &SettingsDefaults::default())
    }

    /// Returns new settings built from given user-supplied values and a given set of defaults.
    pub fn build_with(params: &SettingsParams, defaults: &SettingsDefaults) -> Self {
        Self {
            name: params.name.clone(),
            description: params.description.clone(),
            tags: defaults.tags.clone(),
            max_players: defaults.max_players,
            visibility: defaults.visibility,
            token: params.token.clone(),
            game_password: params.game_password.clone(),
            require_user_verification: defaults.require_user_verification,
            max_upload: defaults.max_upload,
            minimum_latency: defaults.minimum_latency,
            ignore_player_limit_for_returning_players: defaults.ignore_player_limit_for_returning_players,
            allow_commands: defaults.allow_commands,
            autosave_interval: defaults.autosave_interval,
            autosave_slots: defaults.autosave_slots,
            afk_autokick_interval: defaults.afk_autokick_interval,
            auto_pause: defaults.auto_pause,
            only_admins_can_pause_the_game: defaults.only_admins_can_pause_the_game,
            autosave_only_on_server: defaults.autosave_only_on_server,
            admins: defaults.admins.clone(),
        }
    }

    /// Returns a compact JSON string in the game's server settings format.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns new settings parsed from a JSON string in the game's server settings format.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Returns a placeholder for a non-empty secret, so the debug output still tells whether it was set.
fn redact(secret: &str) -> &str {
    if secret.is_empty() {
        secret
    } else {
        REDACTED
    }
}

impl fmt::Debug for SettingsParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsParams")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("token", &redact(&self.token))
            .field("game_password", &redact(&self.game_password))
            .finish()
    }
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("tags", &self.tags)
            .field("max_players", &self.max_players)
            .field("visibility", &self.visibility)
            .field("token", &redact(&self.token))
            .field("game_password", &redact(&self.game_password))
            .field("require_user_verification", &self.require_user_verification)
            .field("max_upload", &self.max_upload)
            .field("minimum_latency", &self.minimum_latency)
            .field(
                "ignore_player_limit_for_returning_players",
                &self.ignore_player_limit_for_returning_players,
            )
            .field("allow_commands", &self.allow_commands)
            .field("autosave_interval", &self.autosave_interval)
            .field("autosave_slots", &self.autosave_slots)
            .field("afk_autokick_interval", &self.afk_autokick_interval)
            .field("auto_pause", &self.auto_pause)
            .field("only_admins_can_pause_the_game", &self.only_admins_can_pause_the_game)
            .field("autosave_only_on_server", &self.autosave_only_on_server)
            .field("admins", &self.admins)
            .finish()
    }
}
