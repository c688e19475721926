//! Logger configuration
//!
//! Settings come from code, from serialized data, or from the
//! `LOGAROO_*` environment variables.

use super::error::{LoggerError, Result};
use super::logger::parse_layout;
use super::registry::Registry;
use super::timestamp::{TimestampFormat, Timezone};
use serde::{Deserialize, Serialize};

/// Initial threshold level name
pub const ENV_LEVEL: &str = "LOGAROO_LEVEL";
/// Line layout template
pub const ENV_TEMPLATE: &str = "LOGAROO_TEMPLATE";
/// Timestamp format for `{time}`
pub const ENV_TIMESTAMP_FORMAT: &str = "LOGAROO_TIMESTAMP_FORMAT";
/// Timezone for `{time}`
pub const ENV_TIMEZONE: &str = "LOGAROO_TIMEZONE";

pub const DEFAULT_LEVEL: &str = "info";
pub const DEFAULT_TEMPLATE: &str = "[green]{time}[/] | {level:<8} | {color}{icon} {message}";

/// Configuration for a [`Logger`](crate::Logger)
///
/// # Examples
///
/// ```
/// use logaroo::{LoggerConfig, Timezone};
///
/// let config = LoggerConfig::new()
///     .with_level("debug")
///     .with_template("{level}: {message}")
///     .with_timezone(Timezone::Local);
/// assert_eq!(config.level, "debug");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub template: String,
    pub timestamp_format: TimestampFormat,
    pub timezone: Timezone,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            timestamp_format: TimestampFormat::default(),
            timezone: Timezone::default(),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `LOGAROO_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; keys that are absent keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level;
        }
        if let Some(template) = lookup(ENV_TEMPLATE) {
            config.template = template;
        }
        if let Some(format) = lookup(ENV_TIMESTAMP_FORMAT) {
            config.timestamp_format = format.parse()?;
        }
        if let Some(timezone) = lookup(ENV_TIMEZONE) {
            config.timezone = timezone.parse()?;
        }
        Ok(config)
    }

    /// Read settings through `lookup`, dropping only the ones that are invalid.
    ///
    /// Each setting that fails to parse keeps its default and its error is
    /// returned; the others are applied. The level is checked against the
    /// default levels and the template against the layout fields.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<LoggerError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(level) = lookup(ENV_LEVEL) {
            match Registry::defaults().lookup(&level) {
                Ok(_) => config.level = level,
                Err(e) => errors.push(e),
            }
        }
        if let Some(template) = lookup(ENV_TEMPLATE) {
            match parse_layout(&template) {
                Ok(_) => config.template = template,
                Err(e) => errors.push(e),
            }
        }
        if let Some(format) = lookup(ENV_TIMESTAMP_FORMAT) {
            match format.parse() {
                Ok(format) => config.timestamp_format = format,
                Err(e) => errors.push(e),
            }
        }
        if let Some(timezone) = lookup(ENV_TIMEZONE) {
            match timezone.parse() {
                Ok(timezone) => config.timezone = timezone,
                Err(e) => errors.push(e),
            }
        }
        (config, errors)
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }
}
