//! Pluggable key-value storage for session state.
//!
//! The session layer owns serialization; backends only move strings. A
//! missing key reads as `Ok(None)` and removing a missing key succeeds, so
//! callers never have to distinguish "absent" from "already gone".

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// A string-keyed, string-valued store with atomic single-key operations.
///
/// No cross-key transactionality is assumed; multi-key session operations
/// are not atomic as a unit.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
