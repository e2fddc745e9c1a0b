//! Lesson record types.

use serde::{Deserialize, Serialize};

/// A single micro lesson ("micro skill") with its quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// Unique lesson identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Topic grouping (e.g. "productivity").
    #[serde(default)]
    pub category: String,
    /// One-line teaser.
    #[serde(default)]
    pub summary: String,
    /// Lesson body.
    #[serde(default)]
    pub content: String,
    /// Estimated reading time.
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    /// Whether access requires the premium entitlement.
    #[serde(default)]
    pub is_premium: bool,
    /// Quiz questions asked after the lesson.
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

fn default_duration() -> u32 {
    5
}

impl LessonRecord {
    /// Create a free lesson with no quiz.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            summary: String::new(),
            content: String::new(),
            duration_minutes: default_duration(),
            is_premium: false,
            quiz: Vec::new(),
        }
    }

    /// Mark the lesson as premium.
    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    /// Attach a quiz question.
    pub fn with_question(mut self, question: QuizQuestion) -> Self {
        self.quiz.push(question);
        self
    }
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn new<I, S>(question: impl Into<String>, options: I, correct_index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_index,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// The text of the correct option, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}
