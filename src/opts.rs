//! Provides the [`Opts`](Opts) struct, used to read and access the program's command line
//! arguments.

use crate::{config, factorio::settings::SettingsParams, util::LogLevel, ProvisionParams};
use clap::{builder::PossibleValuesParser, Arg, ArgMatches, Command};
use std::{ffi::OsString, path::PathBuf};
use strum::VariantNames;

/// The default server name.
pub const DEFAULT_NAME: &str = "My server";
/// The default server description.
pub const DEFAULT_DESCRIPTION: &str = "Created by golang script";

/// Long options that may also be spelled with a single dash, such as `-token`.
const LONG_OPTIONS: [&str; 12] = [
    "token",
    "name",
    "description",
    "save",
    "password",
    "modsUrl",
    "config",
    "log-level",
    "base-dir",
    "server-url",
    "help",
    "version",
];

/// Stores command line parameters.
#[derive(Debug)]
pub struct Opts {
    /// Path to the config file.
    pub config: PathBuf,
    /// The log level to use.
    pub log_level: Option<LogLevel>,
    /// The server installation's base directory.
    pub base_dir: Option<PathBuf>,
    /// URL of the headless server archive.
    pub server_url: Option<String>,
    /// The values for the provisioning run itself.
    pub params: ProvisionParams,
}

impl Opts {
    /// Builds a new `clap::Command` used to parse a given set of command line parameters.
    fn build_app() -> Command {
        Command::new(clap::crate_name!())
            .version(clap::crate_version!())
            .author(clap::crate_authors!())
            .about(clap::crate_description!())
            .arg(
                Arg::new("token")
                    .long("token")
                    .value_name("TOKEN")
                    .help("Factorio account token"),
            )
            .arg(
                Arg::new("name")
                    .long("name")
                    .value_name("NAME")
                    .default_value(DEFAULT_NAME)
                    .help("Server name to display on server listings"),
            )
            .arg(
                Arg::new("description")
                    .long("description")
                    .value_name("TEXT")
                    .default_value(DEFAULT_DESCRIPTION)
                    .help("Server description"),
            )
            .arg(
                Arg::new("save")
                    .long("save")
                    .value_name("URL")
                    .help("The URL to download save file from"),
            )
            .arg(
                Arg::new("password")
                    .long("password")
                    .value_name("PASSWORD")
                    .help("Password for server, default is blank"),
            )
            .arg(
                Arg::new("modsUrl")
                    .long("modsUrl")
                    .value_name("URL")
                    .help("URL for a zip of mods to install"),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .default_value(config::DEFAULT_CONFIG_FILE_LOCATION)
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Sets a custom config file. A missing file is skipped."),
            )
            .arg(
                Arg::new("log-level")
                    .long("log-level")
                    .value_name("LOG LEVEL")
                    .value_parser(PossibleValuesParser::new(LogLevel::VARIANTS.iter().copied()))
                    .ignore_case(true)
                    .help("Specify the log level to use."),
            )
            .arg(
                Arg::new("base-dir")
                    .long("base-dir")
                    .value_name("DIRECTORY")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Directory to install the server into."),
            )
            .arg(
                Arg::new("server-url")
                    .long("server-url")
                    .value_name("URL")
                    .help("URL to download the headless server archive from."),
            )
    }

    /// Returns a new `Opts` object from a given set of matched command line parameters.
    fn from_matches(matches: &ArgMatches) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Opts {
            config: matches
                .get_one::<PathBuf>("config")
                .expect("config option has no value")
                .clone(),
            log_level: matches
                .get_one::<String>("log-level")
                .map(|s| s.parse().expect("failed to parse value as log level")),
            base_dir: matches.get_one::<PathBuf>("base-dir").cloned(),
            server_url: matches.get_one::<String>("server-url").cloned(),
            params: ProvisionParams {
                settings: SettingsParams {
                    name: string("name"),
                    description: string("description"),
                    token: string("token"),
                    game_password: string("password"),
                },
                save_url: string("save"),
                mods_url: string("modsUrl"),
            },
        }
    }

    /// Returns a new `Opts` object built from the program's command line parameters.
    pub fn get() -> Opts {
        let args = normalize_args(std::env::args_os());
        Opts::from_matches(&Opts::build_app().get_matches_from(args))
    }

    /// Returns a new `Opts` object built from custom command line parameters.
    pub fn custom_args(args: &[&str]) -> Opts {
        let full_args = std::iter::once("factinstall").chain(args.iter().copied()).map(OsString::from);
        Opts::from_matches(&Opts::build_app().get_matches_from(normalize_args(full_args)))
    }
}

/// Rewrites single-dash spellings of the known long options (`-token`, `-name=x`) into their
/// double-dash forms. The first argument is the program name and is left as is.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 {
                return arg;
            }

            match arg.to_str() {
                Some(s) if is_single_dash_long(s) => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

/// Returns whether a given argument is a known long option spelled with a single dash.
fn is_single_dash_long(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) if !rest.starts_with('-') => {
            let name = rest.split('=').next().unwrap_or_default();
            LONG_OPTIONS.contains(&name)
        }
        _ => false,
    }
}
