//! Upgrade command for microskill.
//!
//! Flips the local premium flag. There is no billing behind it.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::core::{Clock, ProgressStore};
use crate::storage::KeyValueStore;

/// Output format for the upgrade command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeOutput {
    pub success: bool,
    /// False when the learner already had premium.
    pub newly_upgraded: bool,
    pub is_premium: bool,
    /// Premium lesson ids now available.
    pub unlocked: Vec<String>,
}

/// The upgrade command implementation.
pub struct UpgradeCommand<'a, S: KeyValueStore, C: Clock> {
    progress: &'a ProgressStore<S, C>,
}

impl<'a, S: KeyValueStore, C: Clock> UpgradeCommand<'a, S, C> {
    pub fn new(progress: &'a ProgressStore<S, C>) -> Self {
        Self { progress }
    }

    pub fn run(&self) -> UpgradeOutput {
        let newly_upgraded = self.progress.upgrade_to_premium();
        let unlocked = self
            .progress
            .catalog()
            .lessons()
            .iter()
            .filter(|l| l.is_premium)
            .map(|l| l.id.clone())
            .collect();

        UpgradeOutput {
            success: true,
            newly_upgraded,
            is_premium: self.progress.is_premium(),
            unlocked,
        }
    }

    pub fn format_output(&self, output: &UpgradeOutput, options: &OutputOptions) -> String {
        render(output, options, format_human_readable)
    }
}

fn format_human_readable(output: &UpgradeOutput) -> String {
    if !output.newly_upgraded {
        return "You already have premium.\n".to_string();
    }

    let mut out = String::from("Premium unlocked!\n");
    if !output.unlocked.is_empty() {
        out.push_str("\nNow available:\n");
        for id in &output.unlocked {
            out.push_str(&format!("  - {}\n", id));
        }
    }
    out
}
