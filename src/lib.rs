//! # logaroo
//!
//! A leveled logging library for human-readable, styled console output.
//!
//! ## Features
//!
//! - **Extensible Levels**: Seven default severities plus any number added at runtime
//! - **Templates**: Message and line layout with named placeholders and format specs
//! - **Lazy Arguments**: Expensive values are computed only for emitted lines
//! - **Escalation**: Critical lines are written, then surface as an error
//!
//! ## Example
//!
//! ```
//! use logaroo::prelude::*;
//! use logaroo::{args, info};
//!
//! let console = MemoryConsole::new();
//! let logger = Logger::with_console(console.clone());
//!
//! info!(logger, "Logging is {adjective}!", adjective = "fun")?;
//! logger.add_level("time", 23, "[cyan]", "⏰", false)?;
//! logger.call("time", "I'm not a standard log level", args!())?;
//!
//! assert_eq!(console.len(), 2);
//! # Ok::<(), logaroo::LoggerError>(())
//! ```

pub mod consoles;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::consoles::{MemoryConsole, TerminalConsole, WriterConsole};
    pub use crate::core::{
        Args, Console, Level, LevelLogger, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, RenderMode, Result, ResultExt, TimestampFormat, Timezone, Value,
    };
}

pub use consoles::{MemoryConsole, TerminalConsole, WriterConsole};
pub use core::{
    default_levels, Arg, Args, Console, Level, LevelLogger, LogFn, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, Registry, RenderMode, Result, ResultExt, Template,
    Threshold, ThresholdGuard, TimestampFormat, Timezone, Value,
};
pub use global::default_logger;
