//! Logger initialisation for applications built on the kernel.
//!
//! The kernel itself only emits records through the `log` macros; an application
//! decides where they go by calling [`init_logger`] once, usually with the settings
//! loaded from the `logging` section of a [`KernelConfig`](crate::Utils::kernel_config::KernelConfig).

use crate::Utils::kernel_config::ConfigError;
use log::{LevelFilter, info};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    /// log to the terminal
    pub console: bool,
    /// log to this file, truncated on initialisation
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: LevelFilter::Info,
            console: true,
            file: None,
        }
    }
}

/// Installs a `CombinedLogger` of a terminal logger and/or a file logger.
///
/// Returns `Ok(false)` without touching the global logger when neither sink is enabled.
///
/// # Errors
/// `Io` when the log file cannot be created, `Logger` when a global logger is
/// already installed.
pub fn init_logger(settings: &LoggingSettings) -> Result<bool, ConfigError> {
    let level = settings.level;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    if settings.console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    // File logger
    if let Some(ref filename) = settings.file {
        let file = File::create(filename)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    if loggers.is_empty() {
        return Ok(false);
    }
    CombinedLogger::init(loggers)?;
    info!("logger initialised at level {}", level);
    Ok(true)
}
