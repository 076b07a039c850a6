//! Provides the [`AllowCommands`](AllowCommands) enum which represents the `allow_commands` setting.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Represents who is allowed to run console commands on the server.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Copy, Clone, Display, EnumString, Default)]
pub enum AllowCommands {
    /// Everyone is allowed to run commands.
    #[serde(rename = "true")]
    #[strum(serialize = "true")]
    Yes,
    /// No one is allowed to run commands.
    #[serde(rename = "false")]
    #[strum(serialize = "false")]
    No,
    /// Only admins are allowed to run commands.
    #[default]
    #[serde(rename = "admins-only")]
    #[strum(serialize = "admins-only")]
    AdminsOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_values() {
        assert_eq!(serde_json::to_string(&AllowCommands::AdminsOnly).unwrap(), r#""admins-only""#);
        assert_eq!(serde_json::to_string(&AllowCommands::Yes).unwrap(), r#""true""#);
        assert_eq!(serde_json::from_str::<AllowCommands>(r#""false""#).unwrap(), AllowCommands::No);
        assert_eq!("admins-only".parse::<AllowCommands>().unwrap(), AllowCommands::AdminsOnly);
    }
}
