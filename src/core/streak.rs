//! Daily streak transitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the streak moved when the app was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// Already opened today.
    SameDay,
    /// Last opened yesterday.
    Continued,
    /// First run, a gap of more than one day, or the clock moved backward.
    Reset,
}

impl StreakTransition {
    /// Classify `today` against the last recorded access.
    pub fn between(last_access: Option<NaiveDate>, today: NaiveDate) -> Self {
        match last_access {
            Some(last) if last == today => Self::SameDay,
            Some(last) if last.succ_opt() == Some(today) => Self::Continued,
            _ => Self::Reset,
        }
    }

    /// Apply the transition to the previous streak value.
    pub fn apply(self, streak: u32) -> u32 {
        match self {
            Self::SameDay => streak,
            Self::Continued => streak.saturating_add(1),
            Self::Reset => 1,
        }
    }
}

/// Compute the streak for `today`.
pub fn next_streak(streak: u32, last_access: Option<NaiveDate>, today: NaiveDate) -> u32 {
    StreakTransition::between(last_access, today).apply(streak)
}
