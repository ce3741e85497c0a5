//! Error types for ruledesk
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for ruledesk operations
pub type Result<T> = std::result::Result<T, RuledeskError>;

/// Main error type for all ruledesk operations
#[derive(Debug, Error)]
pub enum RuledeskError {
    /// A submission is missing required fields; shown to the user verbatim
    #[error("{0}")]
    Validation(String),

    /// Lifecycle precondition violated (e.g. releasing an application that is not ready)
    #[error("State transition error: {0}")]
    StateTransition(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unrecognized filter label or enum value on the command line
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl RuledeskError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            RuledeskError::Validation(_) => "VALIDATION",
            RuledeskError::StateTransition(_) => "STATE_TRANSITION",
            RuledeskError::InvalidJson(_) => "INVALID_JSON",
            RuledeskError::FileNotFound(_) => "FILE_NOT_FOUND",
            RuledeskError::ConfigError(_) => "CONFIG_ERROR",
            RuledeskError::InvalidArgument(_) => "INVALID_ARGUMENT",
            RuledeskError::Io(_) => "IO_ERROR",
            RuledeskError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Whether this error is a user-facing validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, RuledeskError::Validation(_))
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        RuledeskError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &RuledeskError) -> i32 {
    match error {
        RuledeskError::Validation(_) => 2,
        RuledeskError::InvalidArgument(_) => 64,
        _ => 1,
    }
}
