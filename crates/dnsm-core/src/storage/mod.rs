//! Durable storage for session data.
//!
//! This module provides:
//! - `KeyValueStore`: the string key-value contract the session is persisted through
//! - `FileStore`: a JSON-file backed store that survives restarts
//! - `MemoryStore`: a process-local store for tests and throwaway sessions
//! - `SessionStore`: typed accessors for the token, user info and remembered login

pub mod file;
pub mod memory;
pub mod session_store;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session_store::SessionStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A flat string key-value store with `localStorage` semantics: no expiry,
/// last write wins, removing a missing key is not an error.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}
