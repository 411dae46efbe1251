//! Study endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/study/due
pub async fn due(
    State(state): State<AppState>,
    Query(query): Query<DueQuery>,
) -> Result<Json<DueResponse>> {
    let today = state.today();
    let vocabulary = state.vocabulary.read().await;
    let scheduler = state.scheduler.lock().await;

    let candidates = vocabulary.filter(query.category.as_deref(), query.level.as_deref());
    let items: Vec<DueItem> = scheduler
        .due_queue(candidates, today)
        .into_iter()
        .map(|item| {
            let review = scheduler.state(&item.term);
            DueItem {
                item: item.clone(),
                rung: review.map_or(0, |s| s.rung),
                last_reviewed_date: review.and_then(|s| s.last_reviewed_date),
            }
        })
        .collect();

    Ok(Json(DueResponse {
        today,
        total: items.len(),
        items,
    }))
}

/// POST /api/study/review
pub async fn review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let today = state.today();

    {
        let vocabulary = state.vocabulary.read().await;
        let item = vocabulary
            .get(&payload.term)
            .ok_or_else(|| ApiError::NotFound(format!("Term '{}' not found", payload.term)))?;
        if item.is_mission() {
            return Err(ApiError::BadRequest(format!(
                "'{}' is a mission and is not scheduled",
                payload.term
            )));
        }
    }

    // Recording an outcome fsyncs the progress file.
    let scheduler = state.scheduler.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || -> Result<Json<SubmitReviewResponse>> {
        let mut scheduler = scheduler;
        let interval_days = scheduler.record_outcome(&payload.term, payload.succeeded, today)?;

        let review = scheduler
            .state(&payload.term)
            .cloned()
            .ok_or_else(|| ApiError::Internal(format!("No review state for '{}'", payload.term)))?;

        Ok(Json(SubmitReviewResponse {
            rung: review.rung,
            interval_days,
            next_due_date: review.next_due_date,
            mastered: scheduler.is_mastered(&payload.term),
            experience: scheduler.experience(),
            term: payload.term,
        }))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Review task failed: {}", e)))?
}
