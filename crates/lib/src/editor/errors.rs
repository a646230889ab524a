//! Error types for editing sessions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// The requester does not own the domain.
    #[error("You do not have permission to edit this domain")]
    PermissionDenied { domain: String, requester: String },
}

impl EditorError {
    /// Check if this error indicates permission was denied.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, EditorError::PermissionDenied { .. })
    }
}

impl From<EditorError> for crate::Error {
    fn from(err: EditorError) -> Self {
        crate::Error::Editor(err)
    }
}
