//! Quiz command for microskill.
//!
//! Grades submitted answers for a lesson and awards the points.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::core::{parse_answers, Clock, ProgressStore, QuizResult};
use crate::error::MicroskillError;
use crate::storage::KeyValueStore;

/// Output format for the quiz command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutput {
    pub success: bool,
    /// True when the lesson exists but needs premium.
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QuizResult>,
    pub score: u64,
    pub level: u64,
    pub leveled_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The quiz command implementation.
pub struct QuizCommand<'a, S: KeyValueStore, C: Clock> {
    progress: &'a ProgressStore<S, C>,
    points_per_correct: u32,
}

impl<'a, S: KeyValueStore, C: Clock> QuizCommand<'a, S, C> {
    pub fn new(progress: &'a ProgressStore<S, C>, points_per_correct: u32) -> Self {
        Self {
            progress,
            points_per_correct,
        }
    }

    /// Grade `answers` (comma-separated option numbers) for `skill_id`.
    pub fn run(&self, skill_id: &str, answers: &str) -> QuizOutput {
        let answers = match parse_answers(answers) {
            Ok(answers) => answers,
            Err(message) => return self.failure(false, message),
        };

        let level_before = self.progress.level();
        match self
            .progress
            .submit_quiz(skill_id, &answers, self.points_per_correct)
        {
            Ok(result) => {
                let level = self.progress.level();
                QuizOutput {
                    success: true,
                    locked: false,
                    result: Some(result),
                    score: self.progress.score(),
                    level,
                    leveled_up: level > level_before,
                    error: None,
                }
            }
            Err(e) => {
                let locked = matches!(e, MicroskillError::Locked { .. });
                self.failure(locked, e.to_string())
            }
        }
    }

    fn failure(&self, locked: bool, error: String) -> QuizOutput {
        QuizOutput {
            success: false,
            locked,
            result: None,
            score: self.progress.score(),
            level: self.progress.level(),
            leveled_up: false,
            error: Some(error),
        }
    }

    pub fn format_output(&self, output: &QuizOutput, options: &OutputOptions) -> String {
        render(output, options, format_human_readable)
    }
}

fn format_human_readable(output: &QuizOutput) -> String {
    let Some(result) = &output.result else {
        return format!(
            "Quiz failed: {}\n",
            output.error.as_deref().unwrap_or("unknown error")
        );
    };

    let mut out = String::new();
    for (i, outcome) in result.outcomes.iter().enumerate() {
        let mark = if outcome.correct { "✓" } else { "✗" };
        out.push_str(&format!("{} {}. {}\n", mark, i + 1, outcome.question));
        if !outcome.correct {
            out.push_str(&format!("    correct answer: {}\n", outcome.correct_index));
        }
    }

    out.push_str(&format!(
        "\n{}/{} correct, +{} points\n",
        result.correct, result.total, result.points
    ));
    if result.passed() && result.total > 0 {
        out.push_str("Perfect score!\n");
    }
    out.push_str(&format!("Score: {}  Level: {}\n", output.score, output.level));
    if output.leveled_up {
        out.push_str(&format!("Level up! You reached level {}.\n", output.level));
    }

    out
}
