//! Error types for tflens-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tflens-core
    #[error(transparent)]
    Core(#[from] tflens_core::Error),

    #[error("couldn't serialize result: {0}")]
    Json(#[from] serde_json::Error),

    /// At least one module is out of sync; the report has already been printed
    #[error("modules not in sync")]
    ModulesNotInSync,

    /// The validation report has already been printed
    #[error("config validation found errors")]
    ConfigValidationFoundErrors,

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Whether `main` should stay quiet and only set the exit code
    pub fn is_silent(&self) -> bool {
        matches!(self, CliError::ModulesNotInSync)
    }
}
