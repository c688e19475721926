//! Process-wide default logger
//!
//! The default logger is built from the `LOGAROO_*` environment variables on
//! first use. It can be rebuilt or replaced explicitly at any time; callers
//! holding an `Arc` from before keep using the old instance.

use crate::core::{Logger, LoggerConfig, Result};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn from_environment() -> Result<Logger> {
    Logger::from_config(&LoggerConfig::from_env()?)
}

/// Build a logger from the settings in `lookup`, replacing each invalid
/// setting with its default
fn lenient_logger<F>(lookup: F) -> Logger
where
    F: Fn(&str) -> Option<String>,
{
    let (config, errors) = LoggerConfig::from_lookup_lenient(lookup);
    for e in &errors {
        eprintln!(
            "[LOGGER WARNING] Ignoring invalid environment setting ({}), using its default",
            e
        );
    }
    Logger::from_config(&config).unwrap_or_else(|e| {
        eprintln!("[LOGGER ERROR] Cannot build the default logger ({}), using defaults", e);
        Logger::new()
    })
}

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| {
        let logger = lenient_logger(|key| std::env::var(key).ok());
        RwLock::new(Arc::new(logger))
    })
}

/// The default logger, built from the environment on first use
///
/// # Example
///
/// ```
/// use logaroo::{args, global};
///
/// global::default_logger().info("ready", args!()).unwrap();
/// ```
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&slot().read())
}

/// Rebuild the default logger from the environment and return it.
///
/// Unlike the lazy path, which drops invalid settings one by one with a
/// warning, any invalid setting is reported as an error and the current
/// default stays in place.
pub fn init_default() -> Result<Arc<Logger>> {
    let logger = Arc::new(from_environment()?);
    *slot().write() = Arc::clone(&logger);
    Ok(logger)
}

/// Re-read the environment into the default logger
pub fn configure_from_environment() -> Result<()> {
    init_default().map(|_| ())
}

/// Install `logger` as the default
pub fn set_default(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    *slot().write() = Arc::clone(&logger);
    logger
}
