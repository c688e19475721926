//! Logging macros with named arguments.
//!
//! Arguments are written `name = value`. Writing `name => expr` defers `expr`
//! until the line is known to pass the threshold.
//!
//! # Examples
//!
//! ```
//! use logaroo::{info, Logger, MemoryConsole};
//!
//! let console = MemoryConsole::new();
//! let logger = Logger::with_console(console.clone());
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With named arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {port}", port = port).unwrap();
//!
//! // Computed only if emitted
//! info!(logger, "Cache holds {entries} entries", entries => 40 + 2).unwrap();
//!
//! assert!(console.output().ends_with("Cache holds 42 entries\n"));
//! ```

/// Build [`Args`](crate::Args) from `name = value` and `name => lazy` pairs.
///
/// # Examples
///
/// ```
/// use logaroo::args;
///
/// let empty = args!();
/// assert!(empty.is_empty());
///
/// let args = args!(user = "ada", attempts = 3, report => format!("{} lines", 10));
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    (@acc $args:expr;) => {
        $args
    };
    (@acc $args:expr; $key:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@acc $args.with(stringify!($key), $value); $($($rest)*)?)
    };
    (@acc $args:expr; $key:ident => $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(
            @acc $args.lazy(stringify!($key), || $crate::Value::from($value));
            $($($rest)*)?
        )
    };
    () => {
        $crate::Args::new()
    };
    ($($rest:tt)+) => {
        $crate::args!(@acc $crate::Args::new(); $($rest)+)
    };
}

/// Log at a level given by name.
///
/// # Examples
///
/// ```
/// # use logaroo::{Logger, MemoryConsole};
/// # let logger = Logger::with_console(MemoryConsole::new());
/// use logaroo::log;
/// log!(logger, "info", "Simple message").unwrap();
/// log!(logger, "WARNING", "Error code: {code}", code = 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $message:expr) => {
        $logger.log($level, $message, $crate::Args::new())
    };
    ($logger:expr, $level:expr, $message:expr, $($args:tt)+) => {
        $logger.log($level, $message, $crate::args!($($args)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use logaroo::{Logger, MemoryConsole};
/// # let logger = Logger::with_console(MemoryConsole::new());
/// # logger.set_level("trace").unwrap();
/// use logaroo::trace;
/// trace!(logger, "Entering function: calculate()").unwrap();
/// trace!(logger, "Variable value: {value}", value = 42).unwrap();
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "trace", $message $(, $($args)+)?)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "debug", $message $(, $($args)+)?)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "info", $message $(, $($args)+)?)
    };
}

/// Log a success-level message.
#[macro_export]
macro_rules! success {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "success", $message $(, $($args)+)?)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logaroo::{Logger, MemoryConsole};
/// # let logger = Logger::with_console(MemoryConsole::new());
/// use logaroo::warning;
/// warning!(logger, "Disk usage at {pct:.1%}", pct = 0.913).unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "warning", $message $(, $($args)+)?)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "error", $message $(, $($args)+)?)
    };
}

/// Log a critical-level message.
///
/// With the default levels the line is written and the call then returns
/// [`LoggerError::Escalated`](crate::LoggerError::Escalated).
///
/// # Examples
///
/// ```
/// # use logaroo::{Logger, MemoryConsole};
/// # let logger = Logger::with_console(MemoryConsole::new());
/// use logaroo::critical;
/// let err = critical!(logger, "Lost {count} workers", count = 3).unwrap_err();
/// assert!(err.is_escalation());
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $message:expr $(, $($args:tt)+)?) => {
        $crate::log!($logger, "critical", $message $(, $($args)+)?)
    };
}
