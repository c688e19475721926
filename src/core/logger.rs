//! Main logger implementation

use super::{
    args::{Args, Value},
    config::LoggerConfig,
    console::Console,
    dispatch::LevelLogger,
    error::{LoggerError, Result, ResultExt},
    level::Level,
    markup::{self, RenderMode},
    metrics::LoggerMetrics,
    registry::Registry,
    template::Template,
    threshold::{Threshold, ThresholdGuard},
    timestamp::{TimestampFormat, Timezone},
};
use crate::consoles::TerminalConsole;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Template used by [`Logger::log_to_all_levels_default`]
pub const DEFAULT_SWEEP_TEMPLATE: &str = "Log with {name}() ({no})";

/// Fields available to the layout template
pub const LAYOUT_FIELDS: &[&str] = &[
    "message", "level", "no", "color", "icon", "time", "elapsed",
];

/// Mutable logger state. Every field is replaced wholesale, never patched.
struct State {
    registry: Arc<Registry>,
    threshold: Threshold,
    layout: Arc<Template>,
    timestamp_format: Arc<TimestampFormat>,
    timezone: Timezone,
}

/// Consistent view of the state for the duration of one log call
struct Snapshot {
    registry: Arc<Registry>,
    threshold: Threshold,
    layout: Arc<Template>,
    timestamp_format: Arc<TimestampFormat>,
    timezone: Timezone,
}

impl Snapshot {
    fn render_line(
        &self,
        level: &Level,
        message: &str,
        now: &DateTime<Utc>,
        elapsed: Duration,
        mode: RenderMode,
    ) -> Result<String> {
        let time = self.timestamp_format.format_in(now, self.timezone)?;
        let (color, icon) = match mode {
            RenderMode::Markup => (level.color().to_string(), level.icon().to_string()),
            RenderMode::Plain => (String::new(), markup::strip(level.icon())),
        };

        self.layout.render_with(
            |field| match field {
                "message" => Some(Value::Str(message.to_string())),
                "level" => Some(Value::Str(level.display_name())),
                "no" => Some(Value::Int(i64::from(level.number()))),
                "color" => Some(Value::Str(color.clone())),
                "icon" => Some(Value::Str(icon.clone())),
                "time" => Some(Value::Str(time.clone())),
                "elapsed" => Some(Value::Str(format!("{:.6}", elapsed.as_secs_f64()))),
                _ => None,
            },
            |literal| match mode {
                RenderMode::Markup => literal.to_string(),
                RenderMode::Plain => markup::strip(literal),
            },
        )
    }
}

/// Parse a layout template and check it only uses known fields
pub(crate) fn parse_layout(template: &str) -> Result<Template> {
    let layout = Template::parse(template)?;
    if let Some(unknown) = layout
        .field_names()
        .find(|name| !LAYOUT_FIELDS.contains(name))
    {
        return Err(LoggerError::message_format(
            template,
            format!(
                "unknown layout field '{}', expected one of {}",
                unknown,
                LAYOUT_FIELDS.join(", ")
            ),
        ));
    }
    Ok(layout)
}

/// Leveled logger with a runtime-extensible level registry
///
/// # Example
///
/// ```
/// use logaroo::{args, Logger, MemoryConsole};
///
/// let console = MemoryConsole::new();
/// let logger = Logger::with_console(console.clone());
///
/// logger.info("This is a simple log message", args!()).unwrap();
/// logger.debug("Hidden, the default threshold is INFO", args!()).unwrap();
/// logger
///     .log("warning", "{count} retries left", args!(count = 3))
///     .unwrap();
///
/// let lines = console.lines();
/// assert_eq!(lines.len(), 2);
/// assert!(lines[1].ends_with("3 retries left"));
/// ```
pub struct Logger {
    state: RwLock<State>,
    console: Mutex<Box<dyn Console>>,
    start: Instant,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with the default configuration writing to the terminal
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(TerminalConsole::new())
    }

    /// Logger with the default configuration writing to `console`
    #[must_use]
    pub fn with_console<C: Console + 'static>(console: C) -> Self {
        Self::builder()
            .console(console)
            .build()
            .expect("default configuration is valid")
    }

    /// Logger from a configuration, writing to the terminal
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Self::builder().config(config.clone()).build()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_state(state: State, console: Box<dyn Console>) -> Self {
        Self {
            state: RwLock::new(state),
            console: Mutex::new(console),
            start: Instant::now(),
            metrics: LoggerMetrics::new(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        Snapshot {
            registry: Arc::clone(&state.registry),
            threshold: state.threshold.clone(),
            layout: Arc::clone(&state.layout),
            timestamp_format: Arc::clone(&state.timestamp_format),
            timezone: state.timezone,
        }
    }

    /// Current threshold level name, lowercase
    pub fn level(&self) -> String {
        self.state.read().threshold.get().to_string()
    }

    /// Set the threshold. Names are case-insensitive.
    pub fn set_level(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        let registry = Arc::clone(&state.registry);
        state.threshold.set(&registry, name)
    }

    /// The level the threshold currently points at
    pub fn level_config(&self) -> Level {
        let snapshot = self.snapshot();
        snapshot
            .registry
            .get(snapshot.threshold.get())
            .unwrap_or_else(|| snapshot.registry.lowest())
            .clone()
    }

    /// Whether a line at `name` would currently be emitted
    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        let snapshot = self.snapshot();
        let level = snapshot.registry.lookup(name)?;
        Ok(snapshot.threshold.is_enabled(&snapshot.registry, level))
    }

    /// Temporarily set the threshold; the guard restores the current one
    pub fn override_level(&self, name: &str) -> Result<ThresholdGuard<'_>> {
        let mut state = self.state.write();
        let registry = Arc::clone(&state.registry);
        let previous = state.threshold.clone();
        state.threshold.set(&registry, name)?;
        Ok(ThresholdGuard::new(self, previous))
    }

    pub(crate) fn restore_threshold(&self, threshold: Threshold) {
        let mut state = self.state.write();
        if state.registry.contains(threshold.get()) {
            state.threshold = threshold;
        }
    }

    /// Current layout template source
    pub fn template(&self) -> String {
        self.state.read().layout.source().to_string()
    }

    /// Replace the layout template.
    ///
    /// Fails with `MessageFormat` if the template is malformed or uses a
    /// field other than those in [`LAYOUT_FIELDS`].
    pub fn set_template(&self, template: &str) -> Result<()> {
        let layout = Arc::new(parse_layout(template)?);
        self.state.write().layout = layout;
        Ok(())
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.state.read().timestamp_format.as_ref().clone()
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        self.state.write().timestamp_format = Arc::new(format);
    }

    pub fn timezone(&self) -> Timezone {
        self.state.read().timezone
    }

    pub fn set_timezone(&self, timezone: Timezone) {
        self.state.write().timezone = timezone;
    }

    /// Current registry snapshot
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.state.read().registry)
    }

    /// Registered levels in severity order
    pub fn levels(&self) -> Vec<Level> {
        self.registry().levels().to_vec()
    }

    /// Registered level names in severity order
    pub fn level_names(&self) -> Vec<String> {
        self.registry().names()
    }

    /// Names callable through [`Logger::call`] and [`Logger::level_fn`]
    pub fn functions(&self) -> Vec<String> {
        let registry = self.registry();
        registry
            .names()
            .into_iter()
            .filter(|name| registry.function(name).is_some())
            .collect()
    }

    /// Register a new level, or redefine an existing one with the same name
    pub fn add_level(
        &self,
        name: &str,
        number: i32,
        color: &str,
        icon: &str,
        escalates: bool,
    ) -> Result<()> {
        self.add(Level::new(name, number, color, icon).with_escalation(escalates))
    }

    /// Register a prepared [`Level`]
    pub fn add(&self, level: Level) -> Result<()> {
        // readers keep logging while the new registry is built
        let state = self.state.upgradable_read();
        let registry = Arc::new(state.registry.add(level)?);
        RwLockUpgradableReadGuard::upgrade(state).registry = registry;
        Ok(())
    }

    /// Log `message` at the named level.
    ///
    /// Nothing is formatted and no supplier runs unless the level passes the
    /// threshold. For an escalating level the line is emitted first and the
    /// call then fails with [`LoggerError::Escalated`].
    pub fn log(&self, level: &str, message: &str, args: Args<'_>) -> Result<()> {
        let snapshot = self.snapshot();
        let level = snapshot.registry.lookup(level)?;
        if !snapshot.threshold.is_enabled(&snapshot.registry, level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let result = self.emit(&snapshot, level, message, args);
        match &result {
            Err(LoggerError::Escalated(_)) => {
                self.metrics.record_escalated();
            }
            Err(_) => {
                self.metrics.record_failed();
            }
            Ok(()) => {}
        }
        result
    }

    fn emit(
        &self,
        snapshot: &Snapshot,
        level: &Level,
        message: &str,
        args: Args<'_>,
    ) -> Result<()> {
        let values = args.resolve();
        let message = Template::parse(message)?.render(&values)?;
        let now = Utc::now();
        let elapsed = self.start.elapsed();

        let line = snapshot.render_line(level, &message, &now, elapsed, RenderMode::Markup)?;
        self.console.lock().print(&line, true)?;
        self.metrics.record_emitted();

        if level.escalates() {
            let clean = snapshot.render_line(level, &message, &now, elapsed, RenderMode::Plain)?;
            return Err(LoggerError::Escalated(clean));
        }
        Ok(())
    }

    /// Render a line without emitting it or checking the threshold
    pub fn format(
        &self,
        level: &str,
        message: &str,
        args: Args<'_>,
        mode: RenderMode,
    ) -> Result<String> {
        let snapshot = self.snapshot();
        let level = snapshot.registry.lookup(level)?;
        let message = Template::parse(message)?.render(&args.resolve())?;
        snapshot.render_line(level, &message, &Utc::now(), self.start.elapsed(), mode)
    }

    /// Log through the registered dispatcher for `level`
    pub fn call(&self, level: &str, message: &str, args: Args<'_>) -> Result<()> {
        let registry = self.registry();
        let func = registry
            .function(level)
            .ok_or_else(|| LoggerError::unknown_level(level, registry.names()))?;
        func(self, message, args)
    }

    /// Handle logging at one level, usable for user-added levels
    pub fn level_fn(&self, level: &str) -> Result<LevelLogger<'_>> {
        let registry = self.registry();
        let found = registry.lookup(level)?.clone();
        let func = registry
            .function(level)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_level(level, registry.names()))?;
        Ok(LevelLogger::new(self, found, func))
    }

    #[inline]
    pub fn trace(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("trace", message, args)
    }

    #[inline]
    pub fn debug(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("debug", message, args)
    }

    #[inline]
    pub fn info(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("info", message, args)
    }

    #[inline]
    pub fn success(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("success", message, args)
    }

    #[inline]
    pub fn warning(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("warning", message, args)
    }

    #[inline]
    pub fn error(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("error", message, args)
    }

    /// Log at `critical`; with the default levels this returns
    /// [`LoggerError::Escalated`] after the line is written.
    #[inline]
    pub fn critical(&self, message: &str, args: Args<'_>) -> Result<()> {
        self.log("critical", message, args)
    }

    /// Log `template` once per registered level, lowest first.
    ///
    /// The template can use `{name}` and `{no}`. The threshold is lowered to
    /// the least severe level for the sweep and restored afterwards, even if
    /// a line fails to format. Escalations are suppressed.
    pub fn log_to_all_levels(&self, template: &str) -> Result<()> {
        let registry = self.registry();
        let _guard = self.override_level(registry.lowest().name())?;

        for level in registry.levels() {
            let args = Args::new()
                .with("name", level.name())
                .with("no", level.number());
            self.log(level.name(), template, args).suppress_escalation()?;
        }
        Ok(())
    }

    /// [`Logger::log_to_all_levels`] with [`DEFAULT_SWEEP_TEMPLATE`]
    pub fn log_to_all_levels_default(&self) -> Result<()> {
        self.log_to_all_levels(DEFAULT_SWEEP_TEMPLATE)
    }

    /// Time since this logger was created, as used by `{elapsed}`
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.console.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("level", &state.threshold.get())
            .field("template", &state.layout.source())
            .field("levels", &state.registry.names())
            .field("console", &self.console.lock().name())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logger`]
///
/// # Example
///
/// ```
/// use logaroo::{Level, Logger, MemoryConsole};
///
/// let logger = Logger::builder()
///     .level("debug")
///     .template("{level}: {message}")
///     .add_level(Level::new("audit", 35, "[magenta]", "🔎"))
///     .console(MemoryConsole::new())
///     .build()
///     .unwrap();
/// assert_eq!(logger.level(), "debug");
/// assert!(logger.level_names().contains(&"audit".to_string()));
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    levels: Option<Vec<Level>>,
    extra: Vec<Level>,
    console: Option<Box<dyn Console>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial threshold level name
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.config.template = template.into();
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn timezone(mut self, timezone: Timezone) -> Self {
        self.config.timezone = timezone;
        self
    }

    /// Start from these levels instead of the defaults
    #[must_use]
    pub fn levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Register one more level on top of the base set
    #[must_use]
    pub fn add_level(mut self, level: Level) -> Self {
        self.extra.push(level);
        self
    }

    #[must_use]
    pub fn console<C: Console + 'static>(mut self, console: C) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Build the logger.
    ///
    /// Fails if the threshold names an unknown level, the template is
    /// invalid, or the level set is empty.
    pub fn build(self) -> Result<Logger> {
        let base = self.levels.unwrap_or_else(super::level::default_levels);
        // later additions win over earlier ones and over the base set
        let registry = Registry::register(self.extra.into_iter().rev().chain(base))?;
        let threshold = Threshold::new(&registry, &self.config.level)?;
        let layout = parse_layout(&self.config.template)?;

        let state = State {
            registry: Arc::new(registry),
            threshold,
            layout: Arc::new(layout),
            timestamp_format: Arc::new(self.config.timestamp_format),
            timezone: self.config.timezone,
        };
        let console = self
            .console
            .unwrap_or_else(|| Box::new(TerminalConsole::new()));
        Ok(Logger::from_state(state, console))
    }
}
