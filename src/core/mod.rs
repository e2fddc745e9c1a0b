//! Core types and logic for microskill.
//!
//! Progress state, level derivation, streak transitions, daily lesson
//! selection, quiz grading and the store tying them together.

pub mod clock;
pub mod daily;
pub mod progress;
pub mod quiz;
pub mod store;
pub mod streak;

pub use clock::{Clock, FixedClock, SystemClock};
pub use daily::{daily_selection, day_of_year};
pub use progress::{level_for_score, ProgressState, POINTS_PER_LEVEL};
pub use quiz::{grade, parse_answers, QuestionOutcome, QuizResult, DEFAULT_POINTS_PER_CORRECT};
pub use store::{Completion, ProgressStore};
pub use streak::{next_streak, StreakTransition};
