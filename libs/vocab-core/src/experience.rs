//! Experience points and levels.

use serde::{Deserialize, Serialize};

/// Points awarded per outcome and points needed per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRules {
    pub per_success: u64,
    pub per_failure: u64,
    pub per_level: u64,
}

impl Default for ExperienceRules {
    fn default() -> Self {
        Self {
            per_success: 10,
            per_failure: 2,
            per_level: 100,
        }
    }
}

impl ExperienceRules {
    /// Points earned for one recorded outcome.
    pub fn award(&self, succeeded: bool) -> u64 {
        if succeeded {
            self.per_success
        } else {
            self.per_failure
        }
    }

    pub fn experience(&self, total: u64) -> Experience {
        Experience::new(total, self.per_level)
    }
}

/// Experience total with derived level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub total: u64,
    pub level: u64,
    pub into_level: u64,
    pub to_next_level: u64,
}

impl Experience {
    /// Levels start at 1; a `per_level` of zero is treated as 1.
    pub fn new(total: u64, per_level: u64) -> Self {
        let per_level = per_level.max(1);
        let into_level = total % per_level;
        Self {
            total,
            level: 1 + total / per_level,
            into_level,
            to_next_level: per_level - into_level,
        }
    }
}
