//! Kernel configuration: numeric tolerances and logger settings read from a plain-text
//! document of sections.
//!
//! ```text
//! numeric_control
//! epsilon: 1e-8
//! delta: 1e-6
//! logging
//! level: info
//! console: true
//! file: kernel.log
//! ```
//!
//! Every key is optional and falls back to its default. Unknown sections and keys are
//! skipped with a warning, ill-typed values are rejected.

use crate::Utils::logger::{LoggingSettings, init_logger};
use crate::Utils::task_parser::{SectionMap, Value, parse_config_document};
use crate::numeric::control::NumericControl;
use log::{LevelFilter, info, warn};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse configuration document: {0}")]
    Parse(String),
    #[error("invalid value for '{key}' in section '{section}': {reason}")]
    InvalidValue {
        section: String,
        key: String,
        reason: String,
    },
    #[error("configuration i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KernelConfig {
    pub control: NumericControl,
    pub logging: LoggingSettings,
}

const NUMERIC_SECTION: &str = "numeric_control";
const LOGGING_SECTION: &str = "logging";

impl KernelConfig {
    /// Builds the configuration from document text.
    pub fn from_document(text: &str) -> Result<Self, ConfigError> {
        let document = parse_config_document(text)?;
        let mut config = KernelConfig::default();
        for (title, section) in &document {
            match title.as_str() {
                NUMERIC_SECTION => config.control = read_numeric_control(section)?,
                LOGGING_SECTION => config.logging = read_logging(section)?,
                other => warn!("unknown configuration section '{}' ignored", other),
            }
        }
        info!(
            "kernel configuration loaded: epsilon = {}, delta = {}, log level = {}",
            config.control.epsilon,
            config.control.delta,
            config.logging.level
        );
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        info!("reading kernel configuration from {}", path.as_ref().display());
        Self::from_document(&text)
    }

    /// installs the configured logger, see [`init_logger`]
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        init_logger(&self.logging)
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// the key must carry exactly one value
fn single<'a>(section: &str, key: &str, values: &'a [Value]) -> Result<&'a Value, ConfigError> {
    match values {
        [value] => Ok(value),
        _ => Err(invalid(
            section,
            key,
            format!("expected one value, found {}", values.len()),
        )),
    }
}

fn positive_float(section: &str, key: &str, values: &[Value]) -> Result<f64, ConfigError> {
    let value = single(section, key, values)?;
    match value.as_float() {
        Some(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(invalid(
            section,
            key,
            format!("expected a positive number, found '{}'", value),
        )),
    }
}

fn read_numeric_control(section: &SectionMap) -> Result<NumericControl, ConfigError> {
    let mut control = NumericControl::default();
    for (key, values) in section {
        match key.as_str() {
            "epsilon" => control.epsilon = positive_float(NUMERIC_SECTION, key, values)?,
            "delta" => control.delta = positive_float(NUMERIC_SECTION, key, values)?,
            other => warn!("unknown key '{}' in section '{}' ignored", other, NUMERIC_SECTION),
        }
    }
    Ok(control)
}

fn read_logging(section: &SectionMap) -> Result<LoggingSettings, ConfigError> {
    let mut logging = LoggingSettings::default();
    for (key, values) in section {
        match key.as_str() {
            "level" => {
                let value = single(LOGGING_SECTION, key, values)?;
                logging.level = LevelFilter::from_str(&value.to_string()).map_err(|_| {
                    invalid(
                        LOGGING_SECTION,
                        key,
                        format!("unknown log level '{}'", value),
                    )
                })?;
            }
            "console" => {
                let value = single(LOGGING_SECTION, key, values)?;
                logging.console = value.as_boolean().ok_or_else(|| {
                    invalid(
                        LOGGING_SECTION,
                        key,
                        format!("expected true or false, found '{}'", value),
                    )
                })?;
            }
            "file" => {
                let value = single(LOGGING_SECTION, key, values)?;
                logging.file = match value.as_string().map(|s| s.as_str()) {
                    Some("none") => None,
                    _ => Some(PathBuf::from(value.to_string())),
                };
            }
            other => warn!("unknown key '{}' in section '{}' ignored", other, LOGGING_SECTION),
        }
    }
    Ok(logging)
}
