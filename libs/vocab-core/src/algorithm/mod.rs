//! Spaced repetition scheduling.

pub mod ladder;

use crate::types::ReviewState;
use chrono::NaiveDate;

pub use ladder::{IntervalLadder, LadderScheduler, DEFAULT_LADDER};

/// Result of scheduling a term after review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingResult {
    pub new_state: ReviewState,
    /// Days until the term is due again (0 after a failure).
    pub interval_days: u32,
}

/// Trait for spaced repetition algorithms.
pub trait SchedulingAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review state after an outcome.
    ///
    /// `state` is `None` for terms that were never reviewed.
    fn schedule(&self, state: Option<&ReviewState>, succeeded: bool, today: NaiveDate) -> SchedulingResult;

    /// Whether the state sits on the terminal rung.
    fn is_mastered(&self, state: &ReviewState) -> bool;
}
