//!
//! Sitebuilder: claim a faux domain, write its HTML, CSS and JavaScript, and
//! publish it for anyone to visit.
//!
//! ## Core Concepts
//!
//! * **Store (`store::Store`)**: A string-keyed record store holding every account,
//!   domain and draft. `store::InMemory` can be persisted to a JSON file.
//! * **Directory (`user::Directory`)**: Account signup and password authentication.
//!   Only `@singla.com` addresses may sign up; passwords are stored as Argon2 hashes.
//! * **Session (`session::Session`)**: Who is logged in. Passed explicitly to every
//!   operation that acts on someone's behalf.
//! * **Registry (`domain::Registry`)**: The globally unique domain names, their owners
//!   and their published content, plus role-dependent name suggestions.
//! * **Editor (`editor::EditorSession`)**: Owner-only editing of one domain with a
//!   single autosaved draft slot and explicit publishing.
//! * **Render (`render`)**: Composition of a domain's three sources into one HTML
//!   document and the display surface it is shown on.
//! * **Instance (`instance::Instance`)**: The facade tying all of the above to one store.

pub mod clock;
pub mod constants;
pub mod domain;
pub mod editor;
pub mod instance;
pub mod notify;
pub mod render;
pub mod route;
pub mod session;
pub mod store;
pub mod user;
pub mod visit;

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
/// Re-export the `Instance` struct for easier access.
pub use instance::Instance;
pub use route::Route;
pub use session::Session;

/// Result type used throughout the sitebuilder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the sitebuilder library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured storage errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured account errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured registry errors from the domain module
    #[error(transparent)]
    Domain(domain::DomainError),

    /// Structured editing errors from the editor module
    #[error(transparent)]
    Editor(editor::EditorError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Store(_) => "store",
            Error::User(_) => "user",
            Error::Domain(_) => "domain",
            Error::Editor(_) => "editor",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Domain(domain_err) => domain_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates permission was denied.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Editor(editor_err) => editor_err.is_permission_denied(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_already_exists(),
            Error::Domain(domain_err) => domain_err.is_already_exists(),
            _ => false,
        }
    }

    /// Check if this error is a rejected form submission.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_validation_error(),
            Error::Domain(domain_err) => domain_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
