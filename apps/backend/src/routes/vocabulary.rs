//! Vocabulary endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use vocab_core::Vocabulary;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/vocabulary
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<VocabularyQuery>,
) -> Result<Json<VocabularyListResponse>> {
    let vocabulary = state.vocabulary.read().await;
    let search = query.search.as_deref().unwrap_or("");

    let items: Vec<VocabularyItem> = vocabulary
        .search(search)
        .into_iter()
        .filter(|item| query.category.as_deref().map_or(true, |c| item.category == c))
        .filter(|item| query.level.as_deref().map_or(true, |l| item.level == l))
        .cloned()
        .collect();

    Ok(Json(VocabularyListResponse {
        total: items.len(),
        items,
    }))
}

/// GET /api/vocabulary/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<VocabularyStatsResponse>> {
    let vocabulary = state.vocabulary.read().await;
    Ok(Json(VocabularyStatsResponse {
        stats: vocabulary.stats(),
        categories: vocabulary.categories(),
        levels: vocabulary.levels(),
    }))
}

/// GET /api/missions
pub async fn missions(State(state): State<AppState>) -> Result<Json<MissionListResponse>> {
    let vocabulary = state.vocabulary.read().await;
    Ok(Json(MissionListResponse {
        missions: vocabulary.missions().into_iter().cloned().collect(),
    }))
}

/// POST /api/vocabulary/reload
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>> {
    let path = state.config.vocab_path.clone();
    let mode = state.config.parse_mode;

    let fresh = tokio::task::spawn_blocking(move || Vocabulary::load(&path, mode))
        .await
        .map_err(|e| ApiError::Internal(format!("Vocabulary reload failed: {}", e)))?;

    let response = ReloadResponse {
        total: fresh.len(),
        reviewable: fresh.reviewable().len(),
        missions: fresh.missions().len(),
    };
    tracing::info!(items = response.total, missions = response.missions, "reloaded vocabulary");

    *state.vocabulary.write().await = fresh;
    Ok(Json(response))
}
