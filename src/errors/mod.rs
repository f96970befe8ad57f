//! Centralized error handling for the meal planner
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed request bodies and date keys
//! - **Not Found**: lookups for a date with no stored record
//! - **Backend Unavailable**: the storage engine cannot be reached
//! - **Repository Errors**: any other storage failure
//! - **Configuration Errors**: invalid startup configuration
//!
//! # Usage
//!
//! ```rust
//! use meal_planner::errors::{AppError, AppResult};
//!
//! fn example_function(date: &str) -> AppResult<()> {
//!     if date.is_empty() {
//!         return Err(AppError::validation("date is required"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
