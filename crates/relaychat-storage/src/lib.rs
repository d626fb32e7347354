//! Storage layer for relaychat.
//!
//! This crate provides a small synchronous key/value abstraction with two
//! backends:
//! - JSON file storage (default, one file per key)
//! - In-memory storage (for testing)
//!
//! Values are opaque strings. Callers that persist structured data encode it
//! as JSON themselves.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A trait for key/value storage backends.
///
/// Reads and writes are synchronous: a `set` is durable by the time it
/// returns, so a following `get_string` observes it.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `None` if the key doesn't exist.
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if a key exists.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get_string(key)?.is_some())
    }
}

/// Build a per-session key of the form `<namespace>-<id>`.
pub fn namespaced_key(namespace: &str, id: &str) -> String {
    format!("{namespace}-{id}")
}
