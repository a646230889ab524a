//! User system for sitebuilder
//!
//! Account records, password hashing and the directory that creates and
//! authenticates accounts.

pub mod crypto;
pub mod directory;
pub mod errors;
pub mod types;

pub use directory::Directory;
pub use errors::UserError;
pub use types::*;
