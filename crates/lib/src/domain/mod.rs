//! Domain registry and suggestion engine
//!
//! Domains are the globally unique site names users claim, together with the
//! HTML, CSS and JavaScript last published for them.

pub mod errors;
pub mod registry;
pub mod suggest;
pub mod template;
pub mod types;

pub use errors::DomainError;
pub use registry::Registry;
pub use suggest::{check_name, extensions};
pub use types::{Domain, Suggestion};
