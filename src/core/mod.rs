//! Core logger types and traits

pub mod args;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod format_spec;
pub mod level;
pub mod logger;
pub mod markup;
pub mod metrics;
pub mod registry;
pub mod template;
pub mod threshold;
pub mod timestamp;

pub use args::{Arg, Args, Value};
pub use config::{LoggerConfig, DEFAULT_LEVEL, DEFAULT_TEMPLATE};
pub use console::Console;
pub use dispatch::{LevelLogger, LogFn};
pub use error::{LoggerError, Result, ResultExt};
pub use level::{default_levels, Level};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SWEEP_TEMPLATE, LAYOUT_FIELDS};
pub use markup::RenderMode;
pub use metrics::LoggerMetrics;
pub use registry::Registry;
pub use template::Template;
pub use threshold::{Threshold, ThresholdGuard};
pub use timestamp::{TimestampFormat, Timezone, DEFAULT_TIMESTAMP_FORMAT};
