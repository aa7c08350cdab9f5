//! Sled-backed persistence for fold state

use crate::error::StorageError;
use crate::store::KeyValueStore;
use sled;
use std::path::Path;

/// Sled-based implementation of KeyValueStore
pub struct SledKeyValueStore {
    db: sled::Db,
}

impl SledKeyValueStore {
    /// Open (or create) a sled database at the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

impl KeyValueStore for SledKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(raw) = self.db.get(key.as_bytes())? else {
            return Ok(None);
        };
        let value = String::from_utf8(raw.to_vec()).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Stored value for '{}' is not UTF-8: {}", key, e),
            ))
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.flush()
    }
}
