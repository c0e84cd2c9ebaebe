//! Integer key-value persistence
//!
//! The only persisted value is the best score, but stores are plain
//! integer maps so the record can be injected and faked in tests:
//! - `MemoryStore`: in-process map, optionally failing
//! - `JsonFileStore`: versioned JSON envelope on disk (tmp → rename)

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::consts::BEST_SCORE_KEY;

/// Errors raised by a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported store version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("value {value} for key {key:?} is out of range")]
    OutOfRange { key: String, value: i64 },
}

/// Integer key-value store
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Write a value and flush it durably before returning
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;

    /// Persisted best score (0 if absent)
    fn read_best_score(&self) -> Result<u32, StoreError> {
        match self.get_int(BEST_SCORE_KEY)? {
            None => Ok(0),
            Some(value) => u32::try_from(value).map_err(|_| StoreError::OutOfRange {
                key: BEST_SCORE_KEY.to_string(),
                value,
            }),
        }
    }

    fn write_best_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.set_int(BEST_SCORE_KEY, i64::from(score))
    }
}
