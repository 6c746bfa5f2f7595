//! Error types for the ecommerce SDK.
//!
//! This module defines the `EcomError` enum which represents every failure
//! an API call can end with. Each call returns exactly one of them to the
//! immediate caller; nothing is retried or suppressed.

use thiserror::Error;

/// Coarse classification of an [`EcomError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The HTTP exchange itself failed (connection, timeout, body read).
    Transport,
    /// A body was received but it is not valid JSON.
    InvalidResponse,
    /// The API answered with an `errorCode`.
    ApiError,
}

/// The main error type for API calls.
#[derive(Debug, Error)]
pub enum EcomError {
    // ==================== Transport Errors ====================
    /// The request could not be completed by the transport.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        /// Last status code the transport saw, if any.
        status: Option<u16>,
    },

    // ==================== Response Errors ====================
    /// The response body could not be decoded as JSON.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        message: String,
        status: Option<u16>,
    },

    /// The API reported an error in the response body.
    ///
    /// `message` is the `description` of the reply, or the `errorCode`
    /// itself when no description was sent.
    #[error("{message}")]
    Api {
        code: String,
        message: String,
        status: Option<u16>,
    },
}

impl EcomError {
    /// Creates a new transport error.
    pub fn transport(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Transport {
            message: message.into(),
            status,
        }
    }

    /// Creates a new invalid response error.
    pub fn invalid_response(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            status,
        }
    }

    /// Creates a new API error from an error code and optional description.
    pub fn api(code: impl Into<String>, description: Option<String>, status: Option<u16>) -> Self {
        let code = code.into();
        let message = description.unwrap_or_else(|| code.clone());
        Self::Api {
            code,
            message,
            status,
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Api { .. } => ErrorKind::ApiError,
        }
    }

    /// Returns the human readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. }
            | Self::InvalidResponse { message, .. }
            | Self::Api { message, .. } => message,
        }
    }

    /// Returns the HTTP status code known when the error was raised.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. }
            | Self::InvalidResponse { status, .. }
            | Self::Api { status, .. } => *status,
        }
    }

    /// Returns the API error code, for [`ErrorKind::ApiError`] only.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// A Result type alias using EcomError.
pub type EcomResult<T> = Result<T, EcomError>;

impl From<serde_json::Error> for EcomError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse {
            message: err.to_string(),
            status: None,
        }
    }
}
