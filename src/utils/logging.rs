//! Logger initialisation for the command line tool

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Build a configuration that writes every record at `level` or above to stderr
pub fn logging_config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .context("Failed to build logging configuration")
}

/// Install the stderr logger; call once at startup
pub fn init_logging(level: LevelFilter) -> Result<()> {
    log4rs::init_config(logging_config(level)?).context("Failed to initialise logging")?;
    Ok(())
}
