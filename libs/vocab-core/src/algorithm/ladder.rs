//! Fixed interval ladder scheduling.
//!
//! Every term sits on a rung of a shared ladder of day intervals. A correct
//! answer climbs one rung and schedules the term that rung's interval into
//! the future; the last rung is "mastered" and cannot be climbed past. A wrong
//! answer makes the term due again today and lowers its rung according to the
//! configured [`FailurePolicy`].

use super::{SchedulingAlgorithm, SchedulingResult};
use crate::error::LadderError;
use crate::types::{FailurePolicy, ReviewState};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Days until next review for each rung.
pub const DEFAULT_LADDER: [u32; 11] = [1, 3, 7, 15, 30, 60, 120, 240, 365, 730, 1095];

/// Ordered day intervals, indexed by rung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalLadder {
    intervals: Vec<u32>,
}

impl IntervalLadder {
    /// Build a ladder, rejecting empty ladders and zero-day intervals.
    pub fn new(intervals: Vec<u32>) -> Result<Self, LadderError> {
        if intervals.is_empty() {
            return Err(LadderError::Empty);
        }
        if let Some(rung) = intervals.iter().position(|&days| days == 0) {
            return Err(LadderError::ZeroInterval { rung });
        }
        Ok(Self { intervals })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Index of the mastery rung.
    pub fn max_rung(&self) -> usize {
        self.intervals.len() - 1
    }

    /// Interval for a rung, clamped to the mastery rung.
    pub fn interval(&self, rung: usize) -> u32 {
        self.intervals[rung.min(self.max_rung())]
    }

    /// Rung reached after a correct answer.
    pub fn next_rung(&self, rung: usize) -> usize {
        rung.saturating_add(1).min(self.max_rung())
    }

    pub fn is_mastered(&self, rung: usize) -> bool {
        rung >= self.max_rung()
    }

    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }
}

impl Default for IntervalLadder {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_LADDER.to_vec(),
        }
    }
}

impl TryFrom<Vec<u32>> for IntervalLadder {
    type Error = LadderError;

    fn try_from(intervals: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(intervals)
    }
}

impl From<IntervalLadder> for Vec<u32> {
    fn from(ladder: IntervalLadder) -> Self {
        ladder.intervals
    }
}

/// Parse a comma-separated list such as `"1,3,7"`.
impl FromStr for IntervalLadder {
    type Err = LadderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let intervals = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>().map_err(|_| LadderError::Invalid {
                    value: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(intervals)
    }
}

/// Ladder scheduler with a configurable failure policy.
#[derive(Debug, Clone, Default)]
pub struct LadderScheduler {
    pub ladder: IntervalLadder,
    pub failure_policy: FailurePolicy,
}

impl LadderScheduler {
    pub fn new(ladder: IntervalLadder, failure_policy: FailurePolicy) -> Self {
        Self {
            ladder,
            failure_policy,
        }
    }
}

impl SchedulingAlgorithm for LadderScheduler {
    fn name(&self) -> &'static str {
        "ladder"
    }

    fn schedule(&self, state: Option<&ReviewState>, succeeded: bool, today: NaiveDate) -> SchedulingResult {
        // Stored rungs may exceed a ladder that was shortened since.
        let current_rung = state.map_or(0, |s| s.rung).min(self.ladder.max_rung());

        if succeeded {
            let rung = self.ladder.next_rung(current_rung);
            let interval_days = self.ladder.interval(rung);
            SchedulingResult {
                new_state: ReviewState {
                    rung,
                    next_due_date: today + Duration::days(i64::from(interval_days)),
                    last_reviewed_date: Some(today),
                },
                interval_days,
            }
        } else {
            let rung = match self.failure_policy {
                FailurePolicy::Reset => 0,
                FailurePolicy::DemoteOne => current_rung.saturating_sub(1),
            };
            SchedulingResult {
                new_state: ReviewState {
                    rung,
                    next_due_date: today,
                    last_reviewed_date: Some(today),
                },
                interval_days: 0,
            }
        }
    }

    fn is_mastered(&self, state: &ReviewState) -> bool {
        self.ladder.is_mastered(state.rung)
    }
}
