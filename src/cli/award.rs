//! Award command for microskill.
//!
//! Adds points directly, optionally marking a lesson completed.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::core::{Clock, ProgressStore};
use crate::storage::KeyValueStore;

/// Output format for the award command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardOutput {
    pub success: bool,
    pub points: u32,
    pub score: u64,
    pub level: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<String>,
    /// Whether `skill_id` is a lesson in the current catalog.
    pub known_skill: bool,
}

/// The award command implementation.
pub struct AwardCommand<'a, S: KeyValueStore, C: Clock> {
    progress: &'a ProgressStore<S, C>,
}

impl<'a, S: KeyValueStore, C: Clock> AwardCommand<'a, S, C> {
    pub fn new(progress: &'a ProgressStore<S, C>) -> Self {
        Self { progress }
    }

    pub fn run(&self, points: u32, skill_id: Option<&str>) -> AwardOutput {
        let known_skill = skill_id
            .map(|id| self.progress.catalog().get(id).is_some())
            .unwrap_or(false);

        let state = self.progress.add_score(points, skill_id);

        AwardOutput {
            success: true,
            points,
            score: state.score,
            level: state.level(),
            skill_id: skill_id.map(str::to_string),
            known_skill,
        }
    }

    pub fn format_output(&self, output: &AwardOutput, options: &OutputOptions) -> String {
        render(output, options, format_human_readable)
    }
}

fn format_human_readable(output: &AwardOutput) -> String {
    let mut out = format!(
        "+{} points. Score: {}  Level: {}\n",
        output.points, output.score, output.level
    );
    if let Some(id) = &output.skill_id {
        out.push_str(&format!("Marked '{}' completed.\n", id));
        if !output.known_skill {
            out.push_str("Note: this id is not in the current lesson catalog.\n");
        }
    }
    out
}
