//! Progress state and level derivation.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u64 = 20;

/// Date format used for `last_access`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage keys for progress fields.
pub mod keys {
    pub const SCORE: &str = "score";
    pub const LEVEL: &str = "level";
    pub const COMPLETED: &str = "completed";
    pub const DAILY_SKILL: &str = "daily_skill";
    pub const STREAK: &str = "streak";
    pub const LAST_ACCESS: &str = "last_access";
    pub const IS_PREMIUM: &str = "is_premium";
}

/// Level reached with `score` points: `floor(score / 20) + 1`.
pub fn level_for_score(score: u64) -> u64 {
    score / POINTS_PER_LEVEL + 1
}

/// A learner's cumulative progress.
///
/// `level` is not a field: it is always derived from `score`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressState {
    pub score: u64,
    pub completed_skills: BTreeSet<String>,
    /// Today's assigned lesson. Empty until the store initializes.
    pub daily_skill_id: String,
    pub streak: u32,
    pub last_access_date: Option<NaiveDate>,
    pub is_premium: bool,
}

impl ProgressState {
    pub fn level(&self) -> u64 {
        level_for_score(self.score)
    }

    /// Points still needed to reach the next level.
    pub fn points_to_next_level(&self) -> u64 {
        POINTS_PER_LEVEL - self.score % POINTS_PER_LEVEL
    }

    /// Add points and optionally mark a skill completed.
    ///
    /// Returns true if `skill_id` was newly completed.
    pub fn add_score(&mut self, points: u32, skill_id: Option<&str>) -> bool {
        self.score = self.score.saturating_add(u64::from(points));
        match skill_id {
            Some(id) => self.completed_skills.insert(id.to_string()),
            None => false,
        }
    }

    pub fn is_completed(&self, skill_id: &str) -> bool {
        self.completed_skills.contains(skill_id)
    }
}
