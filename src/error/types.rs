/**
 * Application Error Types
 *
 * This module defines the error types used across the HTTP handlers and the
 * conversation service. Each variant maps to an HTTP status code and can be
 * converted to an HTTP response.
 *
 * # Error Categories
 *
 * - `Validation` - The request was well-formed HTTP but semantically invalid
 * - `Auth` - Missing, malformed, or expired credentials
 * - `Store` - A database operation failed
 * - `Upstream` - A collaborating service (image upload) failed
 * - `Internal` - Anything else that should not leak detail to clients
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while serving a request
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request content (e.g., a message with no text and no image)
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Authentication failure
    #[error("Authentication error: {message}")]
    Auth {
        /// Human-readable error message
        message: String,
    },

    /// Database operation failure
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Collaborating service failure (image upload)
    #[error("Upstream error: {message}")]
    Upstream {
        /// Human-readable error message
        message: String,
    },

    /// Internal error that should not leak detail to clients
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Auth` - 401 Unauthorized
    /// - `Store` / `Upstream` / `Internal` / `Serialization` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Auth { .. } => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message safe to return to clients
    ///
    /// Server-side failures are collapsed to a generic message; the full
    /// error is logged at the conversion site instead.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Auth { message } => message.clone(),
            Self::Store(_) | Self::Upstream { .. } | Self::Internal { .. } | Self::Serialization(_) => {
                "Internal server error".to_string()
            }
        }
    }
}
