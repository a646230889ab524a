//! Key-value persistence for sitebuilder records
//!
//! The [`Store`] trait is the whole persistence surface the rest of the
//! crate sees: string keys mapping to records serialized as JSON text, with
//! get/set/remove and no transactions. It plays the role a single browser
//! profile's local storage plays for a client-side app.
//!
//! Records are read and written through [`read`] and [`write`], which handle
//! the JSON encoding. Every read-modify-write sequence built on these (account
//! signup, domain registration, publishing) assumes a single writer; two
//! hosts sharing one store can lose updates.

use std::{any::Any, fmt::Debug};

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

pub mod errors;
pub mod in_memory;

pub use errors::StoreError;
pub use in_memory::InMemory;

/// Storage trait abstracting where sitebuilder keeps its records.
///
/// All implementations must be `Send` and `Sync` so a web host can share one
/// store between request handlers, and implement `Any` so hosts can downcast
/// to a concrete store for persistence.
pub trait Store: Send + Sync + Any + Debug {
    /// Retrieves the raw text stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key currently present, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Reads and decodes the record stored under `key`.
///
/// Returns `Ok(None)` when the key is absent, and
/// [`StoreError::Corrupt`] when the stored text is not a valid `T`.
pub fn read<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| {
            StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

/// Reads a list record, treating an absent key as an empty list.
pub fn read_list<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Vec<T>> {
    Ok(read(store, key)?.unwrap_or_default())
}

/// Encodes `value` and stores it under `key`.
pub fn write<T: Serialize + ?Sized>(store: &dyn Store, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}
