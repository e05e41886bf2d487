//! Application error types

use crate::core::error_handling::ContextualError;
use crate::feeder::api::FeederError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Parse { message, .. } | ConfigError::InvalidValue { message, .. } => {
                Some(message.as_str())
            }
            ConfigError::NotFound { .. } => Some("configuration file not found"),
            ConfigError::Read { .. } => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Error reading input {name}: {source}")]
    Input {
        name: String,
        /// `<name>: <cause>`, shown to the user
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing output: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Feeder(#[from] FeederError),
}

impl DriverError {
    pub fn input(name: impl Into<String>, source: std::io::Error) -> Self {
        let name = name.into();
        DriverError::Input {
            message: format!("{name}: {source}"),
            name,
            source,
        }
    }
}

impl ContextualError for DriverError {
    fn is_user_actionable(&self) -> bool {
        match self {
            DriverError::Input { .. } => true,
            DriverError::Output(_) => false,
            DriverError::Feeder(e) => e.is_user_actionable(),
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            DriverError::Input { message, .. } => Some(message.as_str()),
            DriverError::Output(_) => None,
            DriverError::Feeder(e) => e.user_message(),
        }
    }
}

pub type DriverResult<T> = Result<T, DriverError>;
