//! Core types for the vocabulary trainer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category and level assigned when a source line leaves them out.
pub const DEFAULT_TAG: &str = "General";

/// Placeholder for missing phonetic hints and translations in lenient mode.
pub const MISSING_FIELD: &str = "-";

/// Categories that are listed as tasks and never scheduled.
pub const MISSION_CATEGORIES: [&str; 2] = ["Mission", "Quest"];

/// Check whether a category is one of the reserved mission tags.
pub fn is_mission_category(category: &str) -> bool {
    MISSION_CATEGORIES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(category.trim()))
}

/// A single vocabulary entry loaded from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub term: String,
    pub phonetic: String,
    pub translation: String,
    pub category: String,
    pub level: String,
    pub line_number: usize,
}

impl VocabularyItem {
    /// Create an item with default category and level.
    pub fn new(term: impl Into<String>, phonetic: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            phonetic: phonetic.into(),
            translation: translation.into(),
            category: DEFAULT_TAG.to_string(),
            level: DEFAULT_TAG.to_string(),
            line_number: 0,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Mission items follow no spaced-repetition lifecycle.
    pub fn is_mission(&self) -> bool {
        is_mission_category(&self.category)
    }
}

/// Review state of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    pub rung: usize,
    pub next_due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_date: Option<NaiveDate>,
}

impl ReviewState {
    /// Due date assumed for terms that were never reviewed.
    pub fn never_reviewed_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Whether the term may be shown on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_due_date <= today
    }
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            rung: 0,
            next_due_date: Self::never_reviewed_due_date(),
            last_reviewed_date: None,
        }
    }
}

/// Review states keyed by term.
pub type ReviewMap = BTreeMap<String, ReviewState>;

/// Everything written to the progress store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub items: ReviewMap,
}

/// How a failed review treats the current rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Drop back to rung 0.
    Reset,
    /// Step down a single rung.
    DemoteOne,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Reset
    }
}

impl FailurePolicy {
    /// Get the policy name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::DemoteOne => "demote_one",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reset" => Some(Self::Reset),
            "demote_one" => Some(Self::DemoteOne),
            _ => None,
        }
    }
}

/// How strictly source lines are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Lines need term, phonetic hint and translation.
    Strict,
    /// Any line with a term is accepted.
    Lenient,
}

impl Default for ParseMode {
    fn default() -> Self {
        Self::Strict
    }
}

/// Started/mastered counts over a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub started: usize,
    pub mastered: usize,
}
