//! Key-value storage for microskill.
//!
//! Progress, profile and theme fields are persisted as strings under fixed
//! keys, with file-based and in-memory backends.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
