//! Repository pattern implementation for data access
//!
//! [`MealRepository`] is the one storage capability the rest of the crate
//! sees. Two implementations exist:
//!
//! - [`SqliteMealRepository`]: embedded file database, payloads as text
//! - [`PostgresMealRepository`]: networked database, payloads as `jsonb`
//!
//! # Usage
//!
//! ```rust,no_run
//! use meal_planner::repositories::MealRepository;
//!
//! async fn example(repo: &dyn MealRepository) -> anyhow::Result<()> {
//!     if let Some(day) = repo.get("2024-03-01").await? {
//!         println!("lunch: {}", day.lunch.summary());
//!     }
//!     Ok(())
//! }
//! ```

pub mod payload;
pub mod postgres;
pub mod sqlite;
pub mod traits;

// Re-export main traits and types
pub use payload::{decode_payload, StoredPayload};
pub use postgres::PostgresMealRepository;
pub use sqlite::SqliteMealRepository;
pub use traits::MealRepository;
