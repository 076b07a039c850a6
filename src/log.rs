//! Sets up the program's logging.

use crate::config::Config;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::time::Instant;

/// Targets whose debug output drowns everything else. They're capped to `info`.
const NOISY_TARGETS: [&str; 3] = ["hyper", "hyper_util", "reqwest"];

/// Installs the global logger. Records go to stderr so stdout only carries the launch command, each
/// prefixed with the seconds elapsed since the logger was installed, its level and its target.
pub fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Magenta)
        .warn(Color::Yellow)
        .error(Color::Red);
    let start = Instant::now();

    let dispatch = Dispatch::new()
        .format(move |out, msg, record| {
            out.finish(format_args!(
                "[{: >11.3}] [{: >5}] {{{}}} {}",
                start.elapsed().as_secs_f32(),
                colors.color(record.level()),
                record.target(),
                msg
            ))
        })
        .level(config.log_level.into());

    NOISY_TARGETS
        .iter()
        .fold(dispatch, |dispatch, target| {
            dispatch.level_for(*target, LevelFilter::Info.min(config.log_level.into()))
        })
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
