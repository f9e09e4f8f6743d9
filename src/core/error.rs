//! Error types and error handling for the linequery service.
//!
//! This module defines the error types used throughout the
//! application. Wire-level error reporting (the fixed failure lines
//! sent to clients) lives in the TCP adapter.

use thiserror::Error;

/// Result type alias for linequery operations
pub type Result<T> = std::result::Result<T, LineQueryError>;

/// Main error type for the linequery service
#[derive(Error, Debug)]
pub enum LineQueryError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed - PSK mismatch")]
    AuthFailed,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LineQueryError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error must abort the process.
    ///
    /// Only startup-time failures qualify; everything else is local to
    /// one query or one connection.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LineQueryError::Bind { .. } | LineQueryError::Config(_) | LineQueryError::Toml(_)
        )
    }

    /// Check if this error terminates the offending connection.
    ///
    /// A failed PSK check or an unreadable reference file does not;
    /// malformed input does.
    pub fn closes_connection(&self) -> bool {
        matches!(self, LineQueryError::Protocol(_))
    }
}
