//! Lesson catalog for microskill.
//!
//! The catalog is an ordered, immutable list of lessons. Iteration order is
//! significant: daily lesson selection indexes into it.

pub mod builtin;
pub mod lesson;

use std::collections::HashSet;
use std::path::Path;

pub use lesson::{LessonRecord, QuizQuestion};

use crate::error::{MicroskillError, Result};
use crate::util::read_to_string_limited;

/// Ordered, validated lesson catalog.
///
/// Always non-empty, ids are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    lessons: Vec<LessonRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, duplicate ids and quiz
    /// questions whose answer is not one of their options.
    pub fn new(lessons: Vec<LessonRecord>) -> Result<Self> {
        if lessons.is_empty() {
            return Err(MicroskillError::catalog("catalog contains no lessons"));
        }

        let mut seen = HashSet::new();
        for lesson in &lessons {
            if lesson.id.trim().is_empty() {
                return Err(MicroskillError::catalog("lesson with empty id"));
            }
            if !seen.insert(lesson.id.as_str()) {
                return Err(MicroskillError::catalog(format!(
                    "duplicate lesson id '{}'",
                    lesson.id
                )));
            }
            for (i, question) in lesson.quiz.iter().enumerate() {
                if question.correct_option().is_none() {
                    return Err(MicroskillError::catalog(format!(
                        "lesson '{}' question {}: correct index {} out of range for {} options",
                        lesson.id,
                        i + 1,
                        question.correct_index,
                        question.options.len()
                    )));
                }
            }
        }

        Ok(Self { lessons })
    }

    /// The catalog shipped with the app.
    pub fn builtin() -> Self {
        Self {
            lessons: builtin::lessons(),
        }
    }

    /// Load a catalog from a JSON file containing an array of lessons.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = read_to_string_limited(path)?;
        Self::from_json(&content)
            .map_err(|e| MicroskillError::catalog(format!("{}: {}", path.display(), e)))
    }

    /// Parse a catalog from a JSON array of lessons.
    pub fn from_json(json: &str) -> Result<Self> {
        let lessons: Vec<LessonRecord> = serde_json::from_str(json)?;
        Self::new(lessons)
    }

    /// Load from `path` if given, otherwise (or on failure) use the builtin catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from_file(path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to load catalog, using builtin lessons");
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    /// All lessons in catalog order.
    pub fn lessons(&self) -> &[LessonRecord] {
        &self.lessons
    }

    /// Look up a lesson by id.
    pub fn get(&self, id: &str) -> Option<&LessonRecord> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// The first lesson in catalog order.
    pub fn first(&self) -> &LessonRecord {
        &self.lessons[0]
    }

    /// Lessons that do not require premium, in catalog order.
    pub fn free_lessons(&self) -> impl Iterator<Item = &LessonRecord> {
        self.lessons.iter().filter(|l| !l.is_premium)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
