//! Basic logaroo usage
//!
//! Demonstrates levels, templates, runtime-added levels and the level sweep
//! on the process-wide default logger.
//!
//! Run with: cargo run --example basic_logging

use logaroo::prelude::*;
use logaroo::{args, debug, global, info, warning};

fn main() -> Result<()> {
    let logger = global::default_logger();

    // Basic logging, everything is ready to go
    info!(logger, "This is a simple log message")?;
    warning!(logger, "You can use different severity levels")?;
    debug!(logger, "This isn't shown, because the default log level is INFO")?;

    // Change the log level
    logger.set_level("debug")?;
    info!(
        logger,
        "Changing the log level to {level}",
        level = logger.level().to_uppercase()
    )?;
    debug!(logger, "Now you can see debug messages")?;

    // Change the log template
    logger.set_template("{elapsed} {color}{icon} {level:<8} {message}")?;
    info!(logger, "You can change the log message template")?;
    warning!(logger, "For example, using elapsed time instead of time stamp")?;

    // Add a log level
    logger.add_level("time", 23, "[cyan]", "\u{23F0}", false)?;
    info!(logger, "Adding a new log level: TIME")?;
    logger.level_fn("time")?.log("I'm not a standard log level")?;

    // Lazy arguments are only computed for emitted lines
    logger.trace(
        "Never computed: {report}",
        args!(report => expensive_report()),
    )?;

    // Show all levels
    info!(logger, "During development, you can inspect all available log levels")?;
    logger.log_to_all_levels_default()?;
    info!(
        logger,
        "The log level is still {level}",
        level = logger.level().to_uppercase()
    )?;

    // Critical lines are written, then returned as an error
    if let Err(e) = logger.critical("Something went badly wrong", args!()) {
        eprintln!("caught: {}", e);
    }

    logger.flush()
}

fn expensive_report() -> String {
    (0..10_000).map(|i| i.to_string()).collect()
}
