//! Error types for Gradebook.
//!
//! Defines the main error enum used throughout the crate.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Main error type for Gradebook operations.
#[derive(Error, Debug)]
pub enum GradebookError {
    /// Database connection errors (unreadable file, pool exhausted, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors raised by the storage layer.
    #[error("Query error: {0}")]
    Query(String),

    /// Integrity violations (duplicate names/emails, restricted or dangling references).
    #[error("Constraint error: {0}")]
    Constraint(String),

    /// Schema creation or versioning errors.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration errors (invalid config file, bad CLI values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GradebookError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a constraint error with the given message.
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a migration error with the given message.
    pub fn migration(msg: impl Into<String>) -> Self {
        Self::Migration(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Maps a sqlx error from a write path, separating integrity violations
    /// from other storage failures.
    pub fn from_write(context: &str, err: sqlx::Error) -> Self {
        let is_constraint = err.as_database_error().is_some_and(|db| {
            matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            )
        });

        if is_constraint {
            Self::constraint(format!("{context}: {err}"))
        } else {
            Self::query(format!("{context}: {err}"))
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Constraint(_) => "Constraint Error",
            Self::Migration(_) => "Migration Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using GradebookError.
pub type Result<T> = std::result::Result<T, GradebookError>;
