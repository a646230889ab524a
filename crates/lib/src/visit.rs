//! Visit resolution
//!
//! Turns whatever was typed into the visit box into a domain name to look up.

use crate::constants::DEFAULT_EXTENSION;

/// Trim and lowercase `raw`, appending `.scom` when it has no dot.
///
/// This only normalizes; the result is looked up as-is.
pub fn resolve(raw: &str) -> String {
    let name = raw.trim().to_lowercase();
    if name.contains('.') {
        name
    } else {
        format!("{name}.{DEFAULT_EXTENSION}")
    }
}
