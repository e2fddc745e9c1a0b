//! Quiz grading.
//!
//! A graded quiz turns into points for `ProgressStore::add_score`.

use serde::{Deserialize, Serialize};

use crate::catalog::LessonRecord;

/// Default points awarded per correct answer.
pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;

/// Outcome of a single question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question: String,
    /// The submitted option index, if any.
    pub answer: Option<usize>,
    pub correct_index: usize,
    pub correct: bool,
}

/// Result of grading a quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizResult {
    pub lesson_id: String,
    pub correct: u32,
    pub total: u32,
    pub points: u32,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizResult {
    /// Every question answered correctly.
    pub fn passed(&self) -> bool {
        self.correct == self.total
    }
}

/// Grade `answers` (option indices, in question order) against a lesson's quiz.
///
/// Missing answers count as wrong; answers beyond the last question are ignored.
pub fn grade(lesson: &LessonRecord, answers: &[usize], points_per_correct: u32) -> QuizResult {
    let outcomes: Vec<QuestionOutcome> = lesson
        .quiz
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = answers.get(i).copied();
            QuestionOutcome {
                question: q.question.clone(),
                answer,
                correct_index: q.correct_index,
                correct: answer == Some(q.correct_index),
            }
        })
        .collect();

    let correct = outcomes.iter().filter(|o| o.correct).count() as u32;

    QuizResult {
        lesson_id: lesson.id.clone(),
        correct,
        total: outcomes.len() as u32,
        points: correct.saturating_mul(points_per_correct),
        outcomes,
    }
}

/// Parse a comma-separated answer list such as `"0,2,1"`.
pub fn parse_answers(input: &str) -> std::result::Result<Vec<usize>, String> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<usize>()
                .map_err(|_| format!("invalid answer '{}': expected an option number", part))
        })
        .collect()
}
