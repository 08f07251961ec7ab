//! Repository Module
//!
//! Provides CRUD operations for SQLite tables as free functions over the
//! shared connection pool.

// Accounts
pub mod account;

// Vendor Domain
pub mod listing;
pub mod vendor;

// Booking Domain
pub mod comment;
pub mod reservation;
pub mod visit;

// Media
pub mod media;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Unique index violations surface as Duplicate so callers can
            // distinguish conflicts from real failures
            sqlx::Error::Database(e) if e.is_unique_violation() => {
                RepoError::Duplicate(e.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
