//! In-memory store with JSON file persistence
//!
//! Hosts load the whole profile from disk at startup, work against memory,
//! and write it back with [`InMemory::save_to_file`].

use std::{
    any::Any,
    collections::HashMap,
    fs,
    path::Path,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde::{Deserialize, Deserializer, Serialize};

use super::{Store, StoreError};
use crate::Result;

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(StoreError::UnsupportedVersion {
            found: version,
            supported: PERSISTENCE_VERSION,
        }));
    }
    Ok(version)
}

/// On-disk shape of an [`InMemory`] store.
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    entries: HashMap<String, String>,
}

/// A simple in-memory store backed by a `HashMap`.
///
/// Suitable for tests and for hosts that own the whole profile for their
/// lifetime. Values are kept as the JSON text the record helpers produce.
#[derive(Debug, Default)]
pub struct InMemory {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemory {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_entries()?.len())
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_entries()?.is_empty())
    }

    /// Writes the full store to `path` as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let serializable = SerializableStore {
            version: PERSISTENCE_VERSION,
            entries: self.read_entries()?.clone(),
        };
        let json = serde_json::to_string_pretty(&serializable)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a store previously written by [`InMemory::save_to_file`].
    ///
    /// A missing file yields an empty store, the same as a fresh profile.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)?;
        let serializable: SerializableStore = serde_json::from_str(&json)?;
        Ok(Self {
            entries: RwLock::new(serializable.entries),
        })
    }

    fn read_entries(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.entries.read().map_err(|_| StoreError::Poisoned.into())
    }

    fn write_entries(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.entries.write().map_err(|_| StoreError::Poisoned.into())
    }
}

impl Store for InMemory {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.write_entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write_entries()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_entries()?.keys().cloned().collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
