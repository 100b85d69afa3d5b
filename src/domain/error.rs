//! Domain-level error types for chat-vault.
//!
//! All errors are typed with `thiserror` and provide meaningful context
//! without exposing internal details to end users.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors covering every failure path of an export flow.
#[derive(Error, Debug)]
pub enum AppError {
    /// No browser cookie database could be located.
    #[error("No Firefox cookie database found under: {path}")]
    CookieDbNotFound { path: PathBuf },

    /// Failed to open or query the cookie database.
    #[error("Cookie database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The given URL is not a supported conversation page.
    #[error("{message}")]
    WrongPage { message: String },

    /// Required credentials (cookies or session token) are absent.
    #[error("{message}")]
    NotAuthenticated { message: String },

    /// The provider API answered with a non-success status.
    #[error("HTTP error! status: {status}, response: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a wrong-page error with a user-facing message.
    pub fn wrong_page(message: impl Into<String>) -> Self {
        Self::WrongPage {
            message: message.into(),
        }
    }

    /// Create a not-authenticated error with a user-facing message.
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::NotAuthenticated {
            message: message.into(),
        }
    }

    /// Create a network error with context.
    pub fn network(message: impl Into<String>, err: reqwest::Error) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
