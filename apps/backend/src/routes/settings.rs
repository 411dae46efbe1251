//! Settings endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/settings
pub async fn get_all(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let config = &state.config;
    let scheduler = state.scheduler.lock().await;
    Ok(Json(SettingsResponse {
        algorithm: scheduler.algorithm().name().to_string(),
        ladder: config.ladder.intervals().to_vec(),
        failure_policy: config.failure_policy,
        experience: scheduler.rules(),
        daily_reset_hour: config.daily_reset_hour,
    }))
}
