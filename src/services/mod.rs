//! Service layer for business logic
//!
//! Services sit between the web handlers and the repository layer. They
//! depend on the [`MealRepository`](crate::repositories::MealRepository)
//! trait rather than a concrete backend.

pub mod meal;

pub use meal::MealService;
