use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Format of the date key, e.g. `2024-03-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One meal of a day
///
/// `dish` is always serialized, as `null` when nothing is planned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPart {
    #[serde(default)]
    pub dish: Option<String>,
    #[serde(default)]
    pub frozen: bool,
}

impl MealPart {
    pub fn new<S: Into<String>>(dish: S, frozen: bool) -> Self {
        Self {
            dish: Some(dish.into()),
            frozen,
        }
    }

    /// Build a part from raw form input; a blank dish means "nothing planned"
    pub fn from_form(dish: &str, frozen: bool) -> Self {
        let dish = dish.trim();
        Self {
            dish: (!dish.is_empty()).then(|| dish.to_string()),
            frozen,
        }
    }

    /// Human readable summary used by the client, e.g. `Lentils (frozen)`
    pub fn summary(&self) -> String {
        let dish = self.dish.as_deref().unwrap_or("—");
        if self.frozen {
            format!("{dish} (frozen)")
        } else {
            dish.to_string()
        }
    }
}

/// The plan for a single day, keyed by its date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealDay {
    pub date: String,
    #[serde(default)]
    pub lunch: MealPart,
    #[serde(default)]
    pub dinner: MealPart,
}

impl MealDay {
    pub fn new<S: Into<String>>(date: S, lunch: MealPart, dinner: MealPart) -> Self {
        Self {
            date: date.into(),
            lunch,
            dinner,
        }
    }

    /// Check the record before it is handed to storage
    pub fn validate(&self) -> AppResult<()> {
        validate_date(&self.date).map(|_| ())
    }
}

/// Acknowledgement returned by a successful upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub ok: bool,
    pub message: String,
}

impl SaveReceipt {
    pub fn saved(date: &str) -> Self {
        Self {
            ok: true,
            message: format!("saved for {date}"),
        }
    }
}

/// Diagnostic payload of the health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingStatus {
    pub ok: bool,
    pub driver: String,
}

/// Validate that `date` is a canonical `YYYY-MM-DD` calendar date
///
/// Only zero-padded dates that name a real day are accepted, so each day has
/// exactly one key in storage.
pub fn validate_date(date: &str) -> AppResult<NaiveDate> {
    if date.is_empty() {
        return Err(AppError::validation("date is required"));
    }

    if !has_date_shape(date) {
        return Err(AppError::validation(format!(
            "date '{date}' must be written as YYYY-MM-DD"
        )));
    }

    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        AppError::validation(format!("date '{date}' is not a valid YYYY-MM-DD date"))
    })?;

    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(AppError::validation(format!(
            "date '{date}' must be written as YYYY-MM-DD"
        )));
    }

    if parsed.year() == 0 {
        return Err(AppError::validation(format!(
            "date '{date}' is outside the supported range of years"
        )));
    }

    Ok(parsed)
}

/// Exactly `DDDD-DD-DD` in ASCII digits
fn has_date_shape(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
