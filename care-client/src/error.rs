//! Client error types

use http::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token in the session store or persistent storage.
    /// Raised before any request is sent.
    #[error("Not authenticated")]
    Unauthenticated,

    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the token
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-side guard or backend validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// In-process transport failure: the request could not be built for the
    /// router, or the response body could not be read. Never produced by the
    /// network transport.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Text for a transient notification: the backend/guard message when one
    /// exists, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Unauthenticated => "Sessão expirada. Faça login novamente.".to_string(),
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Api { message: msg, .. }
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Failed because no token was available, or the backend refused it
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(crate::validation::describe(&errors))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
