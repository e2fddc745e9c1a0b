//! microskill - progress tracking for micro-learning
//!
//! Tracks a learner's score, level and daily streak, assigns a lesson of
//! the day, grades quizzes and gates premium lessons. Progress is
//! persisted field by field to a key-value store and never blocks the
//! learner when storage misbehaves.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod profile;
pub mod storage;
pub mod util;

pub use catalog::{Catalog, LessonRecord, QuizQuestion};
pub use config::Config;
pub use crate::core::{
    daily_selection, level_for_score, Clock, FixedClock, ProgressState, ProgressStore,
    QuizResult, StreakTransition, SystemClock,
};
pub use error::{MicroskillError, Result};
pub use profile::{ProfileStore, Theme, UserProfile};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

pub use cli::{
    AccessCommand, AwardCommand, LessonsCommand, ProfileCommand, QuizCommand, StatusCommand,
    UpgradeCommand,
};
