//! Error types for the domain registry.

use thiserror::Error;

/// Errors raised by [`Registry`](super::Registry) operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Registration of a name that already exists.
    #[error("This domain is already taken")]
    DomainTaken {
        /// The requested name
        domain: String,
    },

    /// Registration of a name that no search could have offered.
    #[error("Invalid domain name")]
    InvalidName {
        /// The requested name
        domain: String,
    },

    /// Lookup of a name that was never registered.
    #[error("Domain not found")]
    NotFound {
        /// The requested name
        domain: String,
    },
}

impl DomainError {
    /// Check if this error indicates the domain was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// Check if this error is a rejected domain name.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, DomainError::InvalidName { .. })
    }

    /// Check if this error indicates the domain already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, DomainError::DomainTaken { .. })
    }

    /// The domain name the error is about.
    pub fn domain(&self) -> &str {
        match self {
            DomainError::DomainTaken { domain }
            | DomainError::InvalidName { domain }
            | DomainError::NotFound { domain } => domain,
        }
    }
}

impl From<DomainError> for crate::Error {
    fn from(err: DomainError) -> Self {
        crate::Error::Domain(err)
    }
}
