//! Provides the [`SettingsDefaults`](SettingsDefaults) struct which holds every server setting that
//! isn't supplied by the user.

use super::{AllowCommands, Visibility};

/// The admin added to every provisioned server.
pub const DEFAULT_ADMIN: &str = "heschlie";

/// The values of all server settings not given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDefaults {
    /// Defaults to no tags.
    pub tags: Vec<String>,
    /// Defaults to 0 (unlimited).
    pub max_players: u64,
    /// Defaults to both public and LAN visibility.
    pub visibility: Visibility,
    /// Defaults to `false`.
    pub require_user_verification: bool,
    /// Defaults to 0 (unlimited).
    pub max_upload: u64,
    /// Defaults to 0.
    pub minimum_latency: u64,
    /// Defaults to `true`.
    pub ignore_player_limit_for_returning_players: bool,
    /// Defaults to `AllowCommands::AdminsOnly`.
    pub allow_commands: AllowCommands,
    /// Defaults to 10 minutes.
    pub autosave_interval: u64,
    /// Defaults to 5.
    pub autosave_slots: u64,
    /// Defaults to 0 (disabled).
    pub afk_autokick_interval: u64,
    /// Defaults to `true`.
    pub auto_pause: bool,
    /// Defaults to `true`.
    pub only_admins_can_pause_the_game: bool,
    /// Defaults to `true`.
    pub autosave_only_on_server: bool,
    /// Defaults to [`DEFAULT_ADMIN`](DEFAULT_ADMIN) alone.
    pub admins: Vec<String>,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            max_players: 0,
            visibility: Visibility { public: true, lan: true },
            require_user_verification: false,
            max_upload: 0,
            minimum_latency: 0,
            ignore_player_limit_for_returning_players: true,
            allow_commands: AllowCommands::AdminsOnly,
            autosave_interval: 10,
            autosave_slots: 5,
            afk_autokick_interval: 0,
            auto_pause: true,
            only_admins_can_pause_the_game: true,
            autosave_only_on_server: true,
            admins: vec![String::from(DEFAULT_ADMIN)],
        }
    }
}
