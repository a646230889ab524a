//! Domain name suggestions
//!
//! A search turns one query into a fixed list of candidate names, one per
//! extension offered to the searcher's role, each marked available or taken.

use std::collections::HashSet;

use super::{DomainError, Registry, types::Suggestion};
use crate::{Result, user::Role};

/// Extensions offered to the administrator.
pub const ADMIN_EXTENSIONS: [&str; 3] = ["com", "net", "org"];

/// Extensions offered to everyone else.
pub const STANDARD_EXTENSIONS: [&str; 5] = ["scom", "ssin", "ssai", "ssorg", "snet"];

/// The extension list for `role`, in display order.
pub fn extensions(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => &ADMIN_EXTENSIONS,
        Role::Standard => &STANDARD_EXTENSIONS,
    }
}

/// Check that `domain_name` is a name a search by `role` could offer.
///
/// The label must already be trimmed and lowercased, and the extension must
/// be one of [`extensions`] for `role`.
pub fn check_name(domain_name: &str, role: Role) -> Result<()> {
    let valid = domain_name
        .rsplit_once('.')
        .is_some_and(|(label, ext)| {
            !label.is_empty()
                && label == label.trim().to_lowercase()
                && extensions(role).contains(&ext)
        });
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidName {
            domain: domain_name.to_string(),
        }
        .into())
    }
}

impl Registry {
    /// Candidate names for `query` with their availability.
    ///
    /// The query is trimmed and lowercased; a blank query yields nothing.
    /// Otherwise there is exactly one entry per extension of `role`, in
    /// extension order. Nothing is written.
    pub fn suggest(&self, query: &str, role: Role) -> Result<Vec<Suggestion>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let domains = self.list()?;
        let taken: HashSet<&str> = domains.iter().map(|d| d.domain_name.as_str()).collect();

        Ok(extensions(role)
            .iter()
            .map(|ext| {
                let domain_name = format!("{query}.{ext}");
                let available = !taken.contains(domain_name.as_str());
                Suggestion {
                    domain_name,
                    available,
                }
            })
            .collect())
    }
}
