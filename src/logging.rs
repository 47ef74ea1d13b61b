//! log4rs setup.

use crate::config;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Initialise log4rs from the configured yml file, or log `info` to stderr without one.
///
/// stdout carries the plan output, so the fallback never logs there.
pub fn init_logging() -> Result<(), Box<dyn Error>> {
    let log_config = config::log_config_file();
    if Path::new(&log_config).exists() {
        log4rs::init_file(&log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {log_config}: {e}"))?;
        log::debug!("Logging configured from {log_config}");
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let log_config_default = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        .map_err(|e| format!("Error building default log4rs config: {e}"))?;
    log4rs::init_config(log_config_default)
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;

    log::debug!("{log_config} not found, logging to stderr");
    Ok(())
}
