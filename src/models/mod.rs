//! Record model shared by storage, the HTTP layer and the client

pub mod meal;

pub use meal::{validate_date, MealDay, MealPart, PingStatus, SaveReceipt, DATE_FORMAT};
