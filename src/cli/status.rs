//! Status command for microskill.
//!
//! Shows score, level, streak, premium state and today's lesson.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::core::{Clock, ProgressStore, StreakTransition};
use crate::profile::UserProfile;
use crate::storage::KeyValueStore;

/// Output format for the status command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub success: bool,
    pub name: String,
    pub score: u64,
    pub level: u64,
    pub points_to_next_level: u64,
    pub streak: u32,
    pub streak_transition: StreakTransition,
    pub is_premium: bool,
    pub completed: usize,
    pub accessible: usize,
    pub total: usize,
    pub today: TodaySummary,
}

/// Today's lesson, briefly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodaySummary {
    pub id: String,
    pub title: String,
    pub duration_minutes: u32,
    pub completed: bool,
}

/// The status command implementation.
pub struct StatusCommand<'a, S: KeyValueStore, C: Clock> {
    progress: &'a ProgressStore<S, C>,
    profile: UserProfile,
}

impl<'a, S: KeyValueStore, C: Clock> StatusCommand<'a, S, C> {
    pub fn new(progress: &'a ProgressStore<S, C>, profile: UserProfile) -> Self {
        Self { progress, profile }
    }

    pub fn run(&self) -> StatusOutput {
        let state = self.progress.snapshot();
        let completion = self.progress.completion();
        let today = self.progress.todays_skill();

        StatusOutput {
            success: true,
            name: self.profile.display_name().to_string(),
            score: state.score,
            level: state.level(),
            points_to_next_level: state.points_to_next_level(),
            streak: state.streak,
            streak_transition: self.progress.streak_transition(),
            is_premium: state.is_premium,
            completed: completion.completed,
            accessible: completion.accessible,
            total: completion.total,
            today: TodaySummary {
                id: today.id.clone(),
                title: today.title.clone(),
                duration_minutes: today.duration_minutes,
                completed: state.is_completed(&today.id),
            },
        }
    }

    pub fn format_output(&self, output: &StatusOutput, options: &OutputOptions) -> String {
        render(output, options, format_human_readable)
    }
}

fn format_human_readable(output: &StatusOutput) -> String {
    let mut out = format!("Hi, {}!\n\n", output.name);

    out.push_str(&format!(
        "Level {} - {} points ({} to next level)\n",
        output.level, output.score, output.points_to_next_level
    ));

    let streak_note = match output.streak_transition {
        StreakTransition::Continued => " (+1 today)",
        StreakTransition::Reset if output.streak == 1 => " (new streak)",
        _ => "",
    };
    let days = if output.streak == 1 { "day" } else { "days" };
    out.push_str(&format!(
        "Streak: {} {}{}\n",
        output.streak, days, streak_note
    ));

    out.push_str(&format!(
        "Plan: {}\n",
        if output.is_premium { "Premium" } else { "Free" }
    ));
    out.push_str(&format!(
        "Completed: {}/{} lessons ({} unlocked)\n\n",
        output.completed, output.total, output.accessible
    ));

    let check = if output.today.completed { " [done]" } else { "" };
    out.push_str(&format!(
        "Today's lesson: {} ({} min){}\n",
        output.today.title, output.today.duration_minutes, check
    ));
    out.push_str(&format!("  microskill show {}\n", output.today.id));

    out
}
