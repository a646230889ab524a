//! Error types for the key-value store.

use thiserror::Error;

/// Errors raised by [`Store`](super::Store) implementations and the typed
/// record helpers built on top of them.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The lock guarding the in-memory map was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,

    /// A stored value could not be decoded as the expected record.
    #[error("Corrupt value under key '{key}': {reason}")]
    Corrupt {
        /// The key whose value failed to decode
        key: String,
        /// The decoder's message
        reason: String,
    },

    /// A persistence file was written by an incompatible version.
    #[error("Unsupported store file version {found}; only version {supported} is supported")]
    UnsupportedVersion {
        /// Version recorded in the file
        found: u8,
        /// Version this build reads
        supported: u8,
    },
}

impl StoreError {
    /// Check if this error indicates damaged stored data.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            StoreError::Corrupt { .. } | StoreError::UnsupportedVersion { .. }
        )
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
