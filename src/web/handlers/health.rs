//! Health check HTTP handlers

use axum::{extract::State, Json};

use crate::errors::AppResult;
use crate::models::PingStatus;
use crate::web::AppState;

/// Liveness endpoint
///
/// Reports which storage backend the process was started with. Does not
/// touch storage.
pub async fn ping(State(state): State<AppState>) -> Json<PingStatus> {
    Json(PingStatus {
        ok: true,
        driver: state.meals.driver().to_string(),
    })
}

/// Readiness endpoint; 503 when storage cannot be reached
pub async fn readiness_check(State(state): State<AppState>) -> AppResult<Json<PingStatus>> {
    state.meals.ready().await?;
    Ok(Json(PingStatus {
        ok: true,
        driver: state.meals.driver().to_string(),
    }))
}
