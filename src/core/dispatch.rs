//! Per-level dispatch
//!
//! Every registered level gets a dispatcher that logs at that level. The
//! registry rebuilds the map whenever levels change, so user-added levels
//! are callable by name exactly like the defaults.

use super::args::Args;
use super::error::Result;
use super::level::Level;
use super::logger::Logger;
use std::fmt;
use std::sync::Arc;

/// Dispatcher bound to one level name
pub type LogFn = Arc<dyn Fn(&Logger, &str, Args<'_>) -> Result<()> + Send + Sync>;

pub(crate) fn dispatcher(level: &str) -> LogFn {
    let level = level.to_string();
    Arc::new(move |logger: &Logger, message: &str, args: Args<'_>| {
        logger.log(&level, message, args)
    })
}

/// A level's dispatcher bound to a logger
///
/// # Examples
///
/// ```
/// use logaroo::{Logger, MemoryConsole};
///
/// let console = MemoryConsole::new();
/// let logger = Logger::with_console(console.clone());
/// logger.add_level("time", 23, "[cyan]", "⏰", false).unwrap();
///
/// let time = logger.level_fn("time").unwrap();
/// time.log("I'm not a standard log level").unwrap();
/// assert!(console.output().contains("TIME"));
/// ```
pub struct LevelLogger<'a> {
    logger: &'a Logger,
    level: Level,
    func: LogFn,
}

impl<'a> LevelLogger<'a> {
    pub(crate) fn new(logger: &'a Logger, level: Level, func: LogFn) -> Self {
        Self {
            logger,
            level,
            func,
        }
    }

    /// The level this handle logs at, as registered when it was created
    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn log(&self, message: &str) -> Result<()> {
        (self.func)(self.logger, message, Args::new())
    }

    pub fn log_with(&self, message: &str, args: Args<'_>) -> Result<()> {
        (self.func)(self.logger, message, args)
    }
}

impl fmt::Debug for LevelLogger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
