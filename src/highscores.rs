//! Best score record
//!
//! Read once from the injected store at startup, raised and flushed
//! immediately whenever a run beats it. Store failures never end a session:
//! a failed read starts from 0, a failed write keeps the in-memory value.

use crate::persistence::KeyValueStore;

/// Best score backed by a key-value store
#[derive(Debug)]
pub struct BestScore<S: KeyValueStore> {
    value: u32,
    store: S,
}

impl<S: KeyValueStore> BestScore<S> {
    /// Load the best score from `store` (0 if absent or unreadable)
    pub fn load(store: S) -> Self {
        let value = match store.read_best_score() {
            Ok(value) => {
                log::info!("Loaded best score {value}");
                value
            }
            Err(e) => {
                log::warn!("Best score unavailable, starting from 0: {e}");
                0
            }
        };
        Self { value, store }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Record a run score. Returns true if it set a new best (which is
    /// persisted before returning).
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = self.store.write_best_score(score) {
            log::warn!("Failed to persist best score {score}: {e}");
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
