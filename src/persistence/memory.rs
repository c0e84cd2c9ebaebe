//! In-memory store

use std::collections::BTreeMap;

use super::{KeyValueStore, StoreError};

/// Map-backed store. `unavailable()` builds one that fails every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    failing: bool,
    /// Number of successful writes (lets tests check flush timing)
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best_score(score: u32) -> Self {
        let mut store = Self::new();
        store
            .values
            .insert(crate::consts::BEST_SCORE_KEY.to_string(), i64::from(score));
        store
    }

    /// Store whose every read and write fails
    pub fn unavailable() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable(format!("read of {key:?}")));
        }
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable(format!("write of {key:?}")));
        }
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_best_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.read_best_score().unwrap(), 0);
    }

    #[test]
    fn test_negative_best_is_out_of_range() {
        let mut store = MemoryStore::new();
        store.set_int("BEST", -3).unwrap();
        assert!(matches!(
            store.read_best_score(),
            Err(StoreError::OutOfRange { value: -3, .. })
        ));
    }

    #[test]
    fn test_unavailable_fails_both_ways() {
        let mut store = MemoryStore::unavailable();
        assert!(store.read_best_score().is_err());
        assert!(store.write_best_score(4).is_err());
        assert_eq!(store.writes, 0);
    }
}
