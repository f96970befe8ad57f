//! Meal plan HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::{MealDay, SaveReceipt};
use crate::web::AppState;

/// Upsert the plan for one day
///
/// Bodies that fail to deserialize are reported as validation errors with
/// the same `{ok, detail}` shape as every other failure.
pub async fn save_meals(
    State(state): State<AppState>,
    payload: Result<Json<MealDay>, JsonRejection>,
) -> AppResult<Json<SaveReceipt>> {
    let Json(day) = payload.map_err(|rejection| AppError::validation(rejection.body_text()))?;
    debug!(date = %day.date, "Saving meals");
    let receipt = state.meals.save(day).await?;
    Ok(Json(receipt))
}

/// Fetch the plan stored for `date`
pub async fn get_meals(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<MealDay>> {
    let day = state.meals.find(&date).await?;
    Ok(Json(day))
}
