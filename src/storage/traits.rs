//! Key-value storage traits for microskill.
//!
//! This module defines the `KeyValueStore` trait used to persist progress,
//! profile and theme fields as plain strings.

use std::sync::Arc;

use crate::error::{MicroskillError, Result};

/// Trait for key-value storage backends.
///
/// Values are opaque strings. Writes to different keys are independent;
/// nothing is transactional across keys.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key.
    ///
    /// Returns `Ok(())` even if the key doesn't exist.
    fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key exists.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Blanket implementation of KeyValueStore for Arc-wrapped stores.
///
/// Lets the progress and profile stores share one backend.
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Validate a storage key.
///
/// Keys must be non-empty and made of ASCII alphanumerics, `_` or `-` so
/// that every backend can map them to file names safely.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(MicroskillError::invalid_key(key))
    }
}
