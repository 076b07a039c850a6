//! Provides the [`LogLevel`](LogLevel) enum used to select the program's logging verbosity.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, VariantNames};

/// The verbosity of the program's log output.
#[derive(
    Debug, Deserialize, Serialize, Eq, PartialEq, EnumString, Display, VariantNames, Copy, Clone, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    #[strum(serialize = "trace")]
    Trace,
    #[strum(serialize = "debug")]
    Debug,
    #[default]
    #[strum(serialize = "info")]
    Info,
    #[strum(serialize = "warn")]
    Warn,
    #[strum(serialize = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}
