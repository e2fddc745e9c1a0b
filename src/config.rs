//! Configuration loading for microskill.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.microskill/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::DEFAULT_POINTS_PER_CORRECT;
use crate::error::{MicroskillError, Result};

/// Main configuration struct for microskill.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where progress is persisted.
    pub storage: StorageConfig,
    /// Which lesson catalog to use.
    pub catalog: CatalogConfig,
    /// Quiz scoring.
    pub quiz: QuizConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for value files. Defaults to `<home>/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Lesson catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON lesson file. The builtin lessons are used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Quiz scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizConfig {
    /// Points awarded per correct answer.
    pub points_per_correct: u32,
}

/// Minimum valid points_per_correct value.
pub const MIN_POINTS_PER_CORRECT: u32 = 1;

impl QuizConfig {
    /// Whether `value` is an acceptable points_per_correct.
    pub fn is_valid_points(value: u32) -> bool {
        value >= MIN_POINTS_PER_CORRECT
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match microskill_home() {
            Some(home) => Self::load_from_home(&home),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration from a specific home directory.
    pub fn load_from_home(home: &Path) -> Self {
        let mut config = Config::default();

        let config_path = home.join("config.toml");
        if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(user_config) => config = config.merge(user_config),
                Err(e) => tracing::warn!(error = %e, "ignoring invalid user config"),
            }
        }

        config.apply_env_overrides();
        config
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| MicroskillError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| MicroskillError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // MICROSKILL_DATA_DIR
        if let Ok(val) = env::var("MICROSKILL_DATA_DIR") {
            if val.is_empty() {
                tracing::warn!("MICROSKILL_DATA_DIR is empty, ignoring");
            } else {
                self.storage.data_dir = Some(PathBuf::from(val));
            }
        }

        // MICROSKILL_CATALOG
        if let Ok(val) = env::var("MICROSKILL_CATALOG") {
            if val.is_empty() {
                tracing::warn!("MICROSKILL_CATALOG is empty, ignoring");
            } else {
                self.catalog.path = Some(PathBuf::from(val));
            }
        }

        // MICROSKILL_POINTS_PER_CORRECT
        if let Ok(val) = env::var("MICROSKILL_POINTS_PER_CORRECT") {
            match val.parse::<u32>() {
                Ok(n) if QuizConfig::is_valid_points(n) => self.quiz.points_per_correct = n,
                Ok(n) => tracing::warn!(
                    "Invalid MICROSKILL_POINTS_PER_CORRECT value '{}'. Must be >= {}. Using '{}'.",
                    n,
                    MIN_POINTS_PER_CORRECT,
                    self.quiz.points_per_correct
                ),
                Err(_) => tracing::warn!(
                    "Invalid MICROSKILL_POINTS_PER_CORRECT value '{}'. \
                    Expected a positive integer. Using '{}'.",
                    val,
                    self.quiz.points_per_correct
                ),
            }
        }
    }

    /// Merge another config into this one; `other` wins field by field.
    ///
    /// Values equal to the default in `other` do not override `self`.
    fn merge(mut self, other: Config) -> Self {
        if other.storage.data_dir.is_some() {
            self.storage.data_dir = other.storage.data_dir;
        }
        if other.catalog.path.is_some() {
            self.catalog.path = other.catalog.path;
        }

        if other.quiz.points_per_correct != QuizConfig::default().points_per_correct {
            if QuizConfig::is_valid_points(other.quiz.points_per_correct) {
                self.quiz.points_per_correct = other.quiz.points_per_correct;
            } else {
                tracing::warn!(
                    value = other.quiz.points_per_correct,
                    "quiz.points_per_correct must be >= {}, keeping '{}'",
                    MIN_POINTS_PER_CORRECT,
                    self.quiz.points_per_correct
                );
            }
        }

        self
    }

    /// The directory for value files: configured, or `<home>/data`.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.clone().or_else(data_dir)
    }

    /// Save configuration to `<home>/config.toml` atomically.
    pub fn save(&self, home: &Path) -> Result<()> {
        if !home.exists() {
            fs::create_dir_all(home).map_err(|e| MicroskillError::storage(home, e))?;
        }

        let config_path = home.join("config.toml");
        let content =
            toml::to_string_pretty(self).map_err(|e| MicroskillError::config(e.to_string()))?;

        let temp_path = home.join(".config.toml.tmp");
        fs::write(&temp_path, &content).map_err(|e| MicroskillError::storage(&temp_path, e))?;
        fs::rename(&temp_path, &config_path)
            .map_err(|e| MicroskillError::storage(&config_path, e))?;

        Ok(())
    }
}

/// Get the microskill home directory.
///
/// Checks `MICROSKILL_HOME` first, then falls back to `~/.microskill`.
/// An empty `MICROSKILL_HOME` is ignored.
pub fn microskill_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("MICROSKILL_HOME") {
        if home.is_empty() {
            tracing::warn!("MICROSKILL_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("MICROSKILL_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    dirs::home_dir().map(|h| h.join(".microskill"))
}

/// Get the default data directory, `<home>/data`.
pub fn data_dir() -> Option<PathBuf> {
    microskill_home().map(|h| h.join("data"))
}
