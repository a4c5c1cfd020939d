//! Key/value persistence
//!
//! The game stores exactly two things: the best score and the player's
//! settings. Both go through [`Storage`], a string slot store that maps
//! onto LocalStorage in the browser and onto a map in tests or native runs.
//!
//! Callers never let a storage failure escape into gameplay; they log it
//! and fall back to defaults.

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No backing store (private browsing, no window, ...)
    #[error("storage unavailable")]
    Unavailable,
    /// Backend rejected the operation (quota, security error, ...)
    #[error("storage backend error: {0}")]
    Backend(String),
    /// Value could not be encoded for storage
    #[error("could not encode value: {0}")]
    Serialize(String),
}

/// A named-slot string store
pub trait Storage: fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    /// Make every write fail (exercises the error paths)
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend("write rejected".to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse a stored best score. Absent or non-numeric values read as 0.
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}
