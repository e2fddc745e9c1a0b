//! CLI commands for microskill.
//!
//! - **Progress**: status, award, upgrade
//! - **Lessons**: lessons, show, today, quiz, access
//! - **Preferences**: profile

pub mod access;
pub mod award;
pub mod lessons;
pub mod profile;
pub mod quiz;
pub mod status;
pub mod upgrade;

pub use access::AccessCommand;
pub use award::AwardCommand;
pub use lessons::LessonsCommand;
pub use profile::ProfileCommand;
pub use quiz::QuizCommand;
pub use status::StatusCommand;
pub use upgrade::UpgradeCommand;

use serde::Serialize;

/// Output options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Render `output` as JSON, human-readable text, or nothing.
pub fn render<T: Serialize>(
    output: &T,
    options: &OutputOptions,
    human: impl FnOnce(&T) -> String,
) -> String {
    if options.quiet {
        return String::new();
    }

    if options.json {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    } else {
        human(output)
    }
}
