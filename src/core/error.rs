//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name not present in the registry
    #[error("unknown level '{name}'. Use one of {}", .known.join(", "))]
    UnknownLevel { name: String, known: Vec<String> },

    /// Message or layout template could not be interpolated
    #[error("cannot format '{template}': {message}")]
    MessageFormat { template: String, message: String },

    /// Raised after a line at an escalating level was emitted.
    ///
    /// Carries the rendered line with all display markup removed.
    #[error("{0}")]
    Escalated(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create an unknown level error listing the names that would have worked
    pub fn unknown_level(name: impl Into<String>, known: Vec<String>) -> Self {
        LoggerError::UnknownLevel {
            name: name.into(),
            known,
        }
    }

    /// Create a template interpolation error
    pub fn message_format(template: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::MessageFormat {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    /// Whether this is the control-flow signal of an escalating level
    #[must_use]
    pub fn is_escalation(&self) -> bool {
        matches!(self, LoggerError::Escalated(_))
    }

    /// The clean rendered line, if this is an escalation
    #[must_use]
    pub fn escalated_message(&self) -> Option<&str> {
        match self {
            LoggerError::Escalated(message) => Some(message),
            _ => None,
        }
    }
}

/// Extension for call sites that want to log at an escalating level
/// without propagating the escalation.
pub trait ResultExt {
    /// Turn `Err(Escalated)` into `Ok(())`, passing every other error through
    fn suppress_escalation(self) -> Result<()>;
}

impl ResultExt for Result<()> {
    fn suppress_escalation(self) -> Result<()> {
        match self {
            Err(LoggerError::Escalated(_)) => Ok(()),
            other => other,
        }
    }
}
