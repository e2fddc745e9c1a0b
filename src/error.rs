//! Unified error types for microskill with fail-open philosophy.
//!
//! Persistence and catalog problems must never block a learner. When errors
//! occur, we log warnings and return safe defaults rather than propagating
//! failures to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for microskill operations.
#[derive(Error, Debug)]
pub enum MicroskillError {
    /// I/O errors from key-value file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// A persisted value could not be interpreted.
    #[error("corrupt value for key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Invalid key for the key-value store.
    #[error("invalid key '{key}'")]
    InvalidKey { key: String },

    /// Lesson catalog loading or validation errors.
    #[error("catalog error: {message}")]
    Catalog { message: String },

    /// Lesson not present in the catalog.
    #[error("lesson not found: {lesson_id}")]
    LessonNotFound { lesson_id: String },

    /// Lesson exists but requires premium access.
    #[error("lesson '{lesson_id}' requires premium")]
    Locked { lesson_id: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for microskill operations.
pub type Result<T> = std::result::Result<T, MicroskillError>;

impl MicroskillError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a corrupt value error.
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Create a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a lesson not found error.
    pub fn lesson_not_found(lesson_id: impl Into<String>) -> Self {
        Self::LessonNotFound {
            lesson_id: lesson_id.into(),
        }
    }

    /// Create a locked lesson error.
    pub fn locked(lesson_id: impl Into<String>) -> Self {
        Self::Locked {
            lesson_id: lesson_id.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<io::Error> for MicroskillError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MicroskillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error and carry on with a safe value.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the microskill CLI.
pub mod exit_codes {
    /// Command succeeded.
    pub const SUCCESS: i32 = 0;

    /// Command failed.
    pub const ERROR: i32 = 1;

    /// Lesson access was denied (locked premium content).
    pub const DENIED: i32 = 2;

    /// SUCCESS or ERROR.
    pub fn for_success(success: bool) -> i32 {
        if success {
            SUCCESS
        } else {
            ERROR
        }
    }

    /// Like [`for_success`], but a `denied` failure maps to DENIED.
    pub fn for_outcome(success: bool, denied: bool) -> i32 {
        match (success, denied) {
            (true, _) => SUCCESS,
            (false, true) => DENIED,
            (false, false) => ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = MicroskillError::storage(
            "/tmp/score.val",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("/tmp/score.val"));
    }

    #[test]
    fn test_corrupt_error_display() {
        let err = MicroskillError::corrupt("completed", "expected a JSON array");
        assert_eq!(
            err.to_string(),
            "corrupt value for key 'completed': expected a JSON array"
        );
    }

    #[test]
    fn test_lesson_errors_display() {
        assert_eq!(
            MicroskillError::lesson_not_found("nope").to_string(),
            "lesson not found: nope"
        );
        assert_eq!(
            MicroskillError::locked("negotiation").to_string(),
            "lesson 'negotiation' requires premium"
        );
    }

    #[test]
    fn test_catalog_and_config_display() {
        assert_eq!(
            MicroskillError::catalog("empty").to_string(),
            "catalog error: empty"
        );
        assert_eq!(
            MicroskillError::config("invalid TOML").to_string(),
            "config error: invalid TOML"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: MicroskillError = io_err.into();
        assert!(matches!(err, MicroskillError::Storage { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: MicroskillError = json_err.into();
        assert!(matches!(err, MicroskillError::Serde { .. }));
    }

    #[test]
    fn test_fail_open_default() {
        let result: Result<Vec<String>> = Err(MicroskillError::corrupt("completed", "bad"));
        let value = result.fail_open_default("loading completed skills");
        assert!(value.is_empty());
    }

    #[test]
    fn test_fail_open_with() {
        let result: Result<u64> = Err(MicroskillError::serde("bad"));
        assert_eq!(result.fail_open_with("test context", 42), 42);
    }

    #[test]
    fn test_fail_open_success() {
        let result: Result<u64> = Ok(100);
        assert_eq!(result.fail_open_default("test context"), 100);
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_codes::for_success(true), exit_codes::SUCCESS);
        assert_eq!(exit_codes::for_success(false), exit_codes::ERROR);

        // allowed / locked / unknown lesson
        assert_eq!(exit_codes::for_outcome(true, false), 0);
        assert_eq!(exit_codes::for_outcome(false, true), 2);
        assert_eq!(exit_codes::for_outcome(false, false), 1);
    }
}
