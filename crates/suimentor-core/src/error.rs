//! Error types for the SuiMentor application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire SuiMentor application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MentorError {
    /// Configuration error (missing API key, bad environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation provider error (transport, auth, malformed response)
    #[error("Provider error{}: {message}", .status_code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Provider {
        status_code: Option<u16>,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MentorError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Provider error without an HTTP status
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a Provider error carrying the upstream HTTP status
    pub fn provider_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a provider-class error.
    ///
    /// Provider errors are recovered inside the orchestrator into a degraded
    /// reply; every other variant propagates to the outer submission handler.
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

impl From<serde_json::Error> for MentorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MentorError>`.
pub type Result<T> = std::result::Result<T, MentorError>;
