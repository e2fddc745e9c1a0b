//! Learner profile and theme preference.
//!
//! Persisted next to progress in the same key-value store, with the same
//! fail-open load and best-effort write behavior.

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{FailOpen, MicroskillError, Result};
use crate::storage::KeyValueStore;

/// Storage keys for profile fields.
pub mod keys {
    pub const USER_PROFILE: &str = "user_profile";
    pub const THEME: &str = "theme";
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = MicroskillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(MicroskillError::corrupt(
                keys::THEME,
                format!("unknown theme '{}'", other),
            )),
        }
    }
}

/// Learner profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
}

impl UserProfile {
    /// Name to greet the learner with.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Learner")
    }
}

/// Profile and theme store.
pub struct ProfileStore<S: KeyValueStore> {
    kv: S,
    profile: RwLock<UserProfile>,
    theme: RwLock<Theme>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Load the profile and theme. Malformed values fall back to defaults.
    pub fn initialize(kv: S) -> Self {
        let profile = load_profile(&kv).fail_open_default("loading user profile");
        let theme = load_theme(&kv).fail_open_default("loading theme");

        Self {
            kv,
            profile: RwLock::new(profile),
            theme: RwLock::new(theme),
        }
    }

    pub fn profile(&self) -> UserProfile {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn theme(&self) -> Theme {
        *self.theme.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set or clear the learner's name. Blank names clear it.
    pub fn set_name(&self, name: Option<&str>) -> UserProfile {
        let mut profile = self.profile.write().unwrap_or_else(PoisonError::into_inner);
        profile.name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match serde_json::to_string(&*profile) {
            Ok(json) => self
                .kv
                .set(keys::USER_PROFILE, &json)
                .fail_open_default("persisting user profile"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize user profile"),
        }

        profile.clone()
    }

    pub fn set_theme(&self, theme: Theme) -> Theme {
        let mut current = self.theme.write().unwrap_or_else(PoisonError::into_inner);
        *current = theme;
        self.kv
            .set(keys::THEME, theme.as_str())
            .fail_open_default("persisting theme");
        theme
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut current = self.theme.write().unwrap_or_else(PoisonError::into_inner);
        *current = current.toggled();
        self.kv
            .set(keys::THEME, current.as_str())
            .fail_open_default("persisting theme");
        *current
    }
}

fn load_profile<S: KeyValueStore>(kv: &S) -> Result<UserProfile> {
    match kv.get(keys::USER_PROFILE)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| MicroskillError::corrupt(keys::USER_PROFILE, e.to_string())),
        None => Ok(UserProfile::default()),
    }
}

fn load_theme<S: KeyValueStore>(kv: &S) -> Result<Theme> {
    match kv.get(keys::THEME)? {
        Some(raw) => raw.parse(),
        None => Ok(Theme::default()),
    }
}
