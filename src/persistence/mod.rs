//! Key-value persistence for config and high scores
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one JSON file per key in a directory (native)
//! - `LocalStore`: browser LocalStorage (wasm32)
//!
//! Callers own the value format; stores only move strings.

mod store;

pub use store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;

use thiserror::Error;

/// Errors surfaced by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal string key-value storage
pub trait KeyValueStore {
    /// Fetch a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write (or overwrite) a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
