//! JSON file store
//!
//! Layout: `{"version": 1, "values": {"BEST": 12}}`. Writes go to a sibling
//! `.tmp` file which is then renamed over the save, so a crash mid-write
//! leaves the previous save intact. A write over an unreadable save moves it
//! aside to `.bak` and starts a fresh envelope.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreError};

/// Current envelope version
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, i64>,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            values: BTreeMap::new(),
        }
    }
}

/// Store persisted as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn tmp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn backup_path(&self) -> PathBuf {
        self.sibling_path(".bak")
    }

    fn load(&self) -> Result<Envelope, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Envelope::default()),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&json)?;
        if envelope.version != STORE_VERSION {
            return Err(StoreError::Version {
                found: envelope.version,
                expected: STORE_VERSION,
            });
        }
        Ok(envelope)
    }

    fn save(&self, envelope: &Envelope) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(envelope)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Envelope to write into. Corrupt saves are replaced; saves from another
    /// version are never overwritten.
    fn load_for_write(&self) -> Result<Envelope, StoreError> {
        match self.load() {
            Err(StoreError::Json(e)) => {
                let backup = self.backup_path();
                log::warn!(
                    "Store {} is corrupt ({e}), moving it to {} and starting fresh",
                    self.path.display(),
                    backup.display()
                );
                fs::rename(&self.path, &backup)?;
                Ok(Envelope::default())
            }
            other => other,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.load()?.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let mut envelope = self.load_for_write()?;
        envelope.values.insert(key.to_string(), value);
        self.save(&envelope)?;
        log::debug!("Stored {key}={value} in {}", self.path.display());
        Ok(())
    }
}
