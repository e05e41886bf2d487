//! Feeder Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum FeederError {
    /// The configured data filter rejected a command with an error.
    ///
    /// The command has already been removed from the queue when this is raised.
    #[error("Data filter failed on command '{command}': {message}")]
    Filter { command: String, message: String },
}

impl FeederError {
    pub fn filter(command: impl Into<String>, message: impl Into<String>) -> Self {
        FeederError::Filter {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl ContextualError for FeederError {
    fn is_user_actionable(&self) -> bool {
        // A filter failure points at a malformed input line the user can fix
        matches!(self, FeederError::Filter { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            FeederError::Filter { message, .. } => Some(message.as_str()),
        }
    }
}

/// Result type for feeder operations
pub type FeederResult<T> = Result<T, FeederError>;
