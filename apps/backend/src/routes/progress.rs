//! Progress endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/progress
pub async fn summary(State(state): State<AppState>) -> Result<Json<ProgressResponse>> {
    let vocabulary = state.vocabulary.read().await;
    let scheduler = state.scheduler.lock().await;
    let items = vocabulary.items();

    Ok(Json(ProgressResponse {
        overall: scheduler.progress(items),
        by_category: scheduler.progress_by_category(items),
        by_level: scheduler.progress_by_level(items),
        experience: scheduler.experience(),
        pending_write: scheduler.has_pending_write(),
    }))
}
