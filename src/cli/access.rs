//! Access command for microskill.
//!
//! Reports whether a lesson can be opened with the current entitlement.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::core::{Clock, ProgressStore};
use crate::storage::KeyValueStore;

/// Output format for the access command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessOutput {
    pub lesson_id: String,
    /// Whether the id exists in the catalog.
    pub known: bool,
    pub premium_lesson: bool,
    pub allowed: bool,
}

/// The access command implementation.
pub struct AccessCommand<'a, S: KeyValueStore, C: Clock> {
    progress: &'a ProgressStore<S, C>,
}

impl<'a, S: KeyValueStore, C: Clock> AccessCommand<'a, S, C> {
    pub fn new(progress: &'a ProgressStore<S, C>) -> Self {
        Self { progress }
    }

    pub fn run(&self, skill_id: &str) -> AccessOutput {
        let lesson = self.progress.catalog().get(skill_id);
        AccessOutput {
            lesson_id: skill_id.to_string(),
            known: lesson.is_some(),
            premium_lesson: lesson.map(|l| l.is_premium).unwrap_or(false),
            allowed: self.progress.can_access_premium(skill_id),
        }
    }

    pub fn format_output(&self, output: &AccessOutput, options: &OutputOptions) -> String {
        render(output, options, |o| {
            let verdict = match (o.known, o.allowed) {
                (false, _) => "unknown lesson",
                (true, true) => "allowed",
                (true, false) => "locked (premium)",
            };
            format!("{}: {}\n", o.lesson_id, verdict)
        })
    }
}
