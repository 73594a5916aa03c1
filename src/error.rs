//! Error types for nzb-grab
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (NotFound, NothingRetrievable, etc.)
//! - HTTP status code mapping for embedding API integration
//! - Machine-readable error codes

use thiserror::Error;

/// Result type alias for nzb-grab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nzb-grab
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Network error while fetching from an origin (timeout, connect, non-2xx)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error while assembling a bundle
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Search result not found (invalid or outdated reference)
    #[error("search result not found: {0}")]
    NotFound(String),

    /// No indexer is registered under the requested name
    #[error("unknown indexer: {0}")]
    UnknownIndexer(String),

    /// Every search result in a bundle request failed to download
    #[error("no NZBs could be retrieved")]
    NothingRetrievable,

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Convert errors to HTTP status codes for embedding API layers
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,

            // 404 Not Found
            Error::NotFound(_) => 404,
            Error::UnknownIndexer(_) => 404,
            Error::NothingRetrievable => 404,

            // 500 Internal Server Error - Server-side issues
            Error::Database(_) => 500,
            Error::Sqlx(_) => 500,
            Error::Io(_) => 500,
            Error::Zip(_) => 500,
            Error::Other(_) => 500,

            // 502 Bad Gateway - External service errors
            Error::Network(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Database(_) => "database_error",
            Error::Sqlx(_) => "database_error",
            Error::Network(_) => "network_error",
            Error::Io(_) => "io_error",
            Error::Zip(_) => "zip_error",
            Error::NotFound(_) => "not_found",
            Error::UnknownIndexer(_) => "unknown_indexer",
            Error::NothingRetrievable => "nothing_retrievable",
            Error::Other(_) => "internal_error",
        }
    }
}
