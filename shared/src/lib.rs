//! Shared types for the Trellis marketplace
//!
//! Common types used across crates including error types, response
//! structures, database models and utility types.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
