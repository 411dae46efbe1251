//! API request and response types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export shared types from vocab-core
pub use vocab_core::types::{FailurePolicy, ProgressSummary, VocabularyItem};
pub use vocab_core::{Experience, ExperienceRules, VocabularyStats};

// Study types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DueQuery {
    pub category: Option<String>,
    pub level: Option<String>,
}

/// Vocabulary item with its current review state.
#[derive(Debug, Serialize, Deserialize)]
pub struct DueItem {
    #[serde(flatten)]
    pub item: VocabularyItem,
    pub rung: usize,
    pub last_reviewed_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueResponse {
    pub today: NaiveDate,
    pub total: usize,
    pub items: Vec<DueItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub term: String,
    pub succeeded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub term: String,
    pub rung: usize,
    pub interval_days: u32,
    pub next_due_date: NaiveDate,
    pub mastered: bool,
    pub experience: Experience,
}

// Progress types
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub overall: ProgressSummary,
    pub by_category: BTreeMap<String, ProgressSummary>,
    pub by_level: BTreeMap<String, ProgressSummary>,
    pub experience: Experience,
    pub pending_write: bool,
}

// Vocabulary types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VocabularyQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyListResponse {
    pub total: usize,
    pub items: Vec<VocabularyItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyStatsResponse {
    #[serde(flatten)]
    pub stats: VocabularyStats,
    pub categories: Vec<String>,
    pub levels: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MissionListResponse {
    pub missions: Vec<VocabularyItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub total: usize,
    pub reviewable: usize,
    pub missions: usize,
}

// Settings types
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub algorithm: String,
    pub ladder: Vec<u32>,
    pub failure_policy: FailurePolicy,
    pub experience: ExperienceRules,
    pub daily_reset_hour: u32,
}
