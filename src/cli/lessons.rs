//! Lesson browsing commands for microskill.
//!
//! `lessons` lists the catalog with completed and locked markers, `show`
//! opens a single lesson, `today` opens the daily lesson.

use serde::{Deserialize, Serialize};

use crate::catalog::{LessonRecord, QuizQuestion};
use crate::cli::{render, OutputOptions};
use crate::core::{Clock, ProgressStore};
use crate::error::MicroskillError;
use crate::storage::KeyValueStore;
use crate::util::truncate;

/// One row of the lesson list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonEntry {
    pub id: String,
    pub title: String,
    pub category: String,
    pub duration_minutes: u32,
    pub premium: bool,
    pub locked: bool,
    pub completed: bool,
    pub today: bool,
}

/// Output format for the lessons command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonListOutput {
    pub success: bool,
    pub lessons: Vec<LessonEntry>,
}

/// Output format for the show and today commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonOutput {
    pub success: bool,
    /// True when the lesson exists but needs premium.
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson: Option<LessonRecord>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LessonOutput {
    fn found(lesson: &LessonRecord, completed: bool) -> Self {
        Self {
            success: true,
            locked: false,
            lesson: Some(lesson.clone()),
            completed,
            error: None,
        }
    }

    fn failure(err: &MicroskillError) -> Self {
        Self {
            success: false,
            locked: matches!(err, MicroskillError::Locked { .. }),
            lesson: None,
            completed: false,
            error: Some(err.to_string()),
        }
    }
}

/// The lesson browsing commands.
pub struct LessonsCommand<'a, S: KeyValueStore, C: Clock> {
    progress: &'a ProgressStore<S, C>,
}

impl<'a, S: KeyValueStore, C: Clock> LessonsCommand<'a, S, C> {
    pub fn new(progress: &'a ProgressStore<S, C>) -> Self {
        Self { progress }
    }

    /// List the catalog, optionally only unlocked lessons.
    pub fn list(&self, unlocked_only: bool) -> LessonListOutput {
        let daily = self.progress.daily_skill_id();

        let lessons = self
            .progress
            .catalog()
            .lessons()
            .iter()
            .map(|l| LessonEntry {
                id: l.id.clone(),
                title: l.title.clone(),
                category: l.category.clone(),
                duration_minutes: l.duration_minutes,
                premium: l.is_premium,
                locked: !self.progress.can_access_premium(&l.id),
                completed: self.progress.is_completed(&l.id),
                today: l.id == daily,
            })
            .filter(|entry| !unlocked_only || !entry.locked)
            .collect();

        LessonListOutput {
            success: true,
            lessons,
        }
    }

    /// Open one lesson. Locked and unknown lessons fail.
    pub fn show(&self, skill_id: &str) -> LessonOutput {
        match self.progress.open_lesson(skill_id) {
            Ok(lesson) => LessonOutput::found(lesson, self.progress.is_completed(&lesson.id)),
            Err(e) => LessonOutput::failure(&e),
        }
    }

    /// Open today's lesson.
    ///
    /// Locked when every lesson is premium and the learner has not upgraded.
    pub fn today(&self) -> LessonOutput {
        let lesson = self.progress.todays_skill();
        if !self.progress.can_access_premium(&lesson.id) {
            return LessonOutput::failure(&MicroskillError::locked(&lesson.id));
        }
        LessonOutput::found(lesson, self.progress.is_completed(&lesson.id))
    }

    pub fn format_list(&self, output: &LessonListOutput, options: &OutputOptions) -> String {
        render(output, options, format_list_human)
    }

    pub fn format_lesson(&self, output: &LessonOutput, options: &OutputOptions) -> String {
        render(output, options, format_lesson_human)
    }
}

fn format_list_human(output: &LessonListOutput) -> String {
    if output.lessons.is_empty() {
        return "No lessons available.\n".to_string();
    }

    let mut out = String::new();
    for entry in &output.lessons {
        let marker = if entry.completed {
            "[x]"
        } else if entry.locked {
            "[$]"
        } else {
            "[ ]"
        };
        let today = if entry.today { "  <- today" } else { "" };
        out.push_str(&format!(
            "{} {:<24} {:<40} {:>2} min{}\n",
            marker,
            entry.id,
            truncate(&entry.title, 40),
            entry.duration_minutes,
            today
        ));
    }
    out.push_str("\n[x] completed  [$] premium\n");
    out
}

fn format_lesson_human(output: &LessonOutput) -> String {
    let Some(lesson) = &output.lesson else {
        let hint = if output.locked {
            "\nUnlock premium lessons with: microskill upgrade"
        } else {
            ""
        };
        return format!(
            "{}{}\n",
            output.error.as_deref().unwrap_or("unknown error"),
            hint
        );
    };

    let mut out = format!("{}\n", lesson.title);
    out.push_str(&"=".repeat(lesson.title.chars().count()));
    out.push('\n');
    if !lesson.category.is_empty() {
        out.push_str(&format!(
            "{} · {} min{}\n",
            lesson.category,
            lesson.duration_minutes,
            if output.completed { " · completed" } else { "" }
        ));
    }
    if !lesson.summary.is_empty() {
        out.push_str(&format!("\n{}\n", lesson.summary));
    }
    if !lesson.content.is_empty() {
        out.push_str(&format!("\n{}\n", lesson.content));
    }

    if !lesson.quiz.is_empty() {
        out.push_str("\nQuiz\n----\n");
        for (i, q) in lesson.quiz.iter().enumerate() {
            out.push_str(&format_question(i, q));
        }
        out.push_str(&format!(
            "\nAnswer with: microskill quiz {} --answers <n,n,...>\n",
            lesson.id
        ));
    }

    out
}

fn format_question(index: usize, question: &QuizQuestion) -> String {
    let mut out = format!("{}. {}\n", index + 1, question.question);
    for (i, option) in question.options.iter().enumerate() {
        out.push_str(&format!("   {}) {}\n", i, option));
    }
    out
}
