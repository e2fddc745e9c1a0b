//! Profile command for microskill.
//!
//! Shows or updates the learner's name and theme preference.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::profile::{ProfileStore, Theme};
use crate::storage::KeyValueStore;

/// Requested theme change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Set(Theme),
    Toggle,
}

/// Options for the profile command.
#[derive(Debug, Clone, Default)]
pub struct ProfileOptions {
    /// New name; an empty string clears it.
    pub name: Option<String>,
    pub theme: Option<ThemeChange>,
}

/// Output format for the profile command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub display_name: String,
    pub theme: Theme,
    pub changed: bool,
}

/// The profile command implementation.
pub struct ProfileCommand<'a, S: KeyValueStore> {
    store: &'a ProfileStore<S>,
}

impl<'a, S: KeyValueStore> ProfileCommand<'a, S> {
    pub fn new(store: &'a ProfileStore<S>) -> Self {
        Self { store }
    }

    pub fn run(&self, options: &ProfileOptions) -> ProfileOutput {
        let mut changed = false;

        if let Some(name) = &options.name {
            self.store.set_name(Some(name.as_str()));
            changed = true;
        }

        match options.theme {
            Some(ThemeChange::Set(theme)) => {
                self.store.set_theme(theme);
                changed = true;
            }
            Some(ThemeChange::Toggle) => {
                self.store.toggle_theme();
                changed = true;
            }
            None => {}
        }

        let profile = self.store.profile();
        ProfileOutput {
            success: true,
            display_name: profile.display_name().to_string(),
            name: profile.name,
            theme: self.store.theme(),
            changed,
        }
    }

    pub fn format_output(&self, output: &ProfileOutput, options: &OutputOptions) -> String {
        render(output, options, |o| {
            let prefix = if o.changed { "Profile updated.\n" } else { "" };
            format!("{}Name:  {}\nTheme: {}\n", prefix, o.display_name, o.theme)
        })
    }
}
