//! Domain records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered site, stored in the `domains` list
///
/// `domain_name` is the globally unique key. The three content fields hold
/// the last published HTML, CSS and JavaScript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// `<name>.<ext>`
    pub domain_name: String,

    /// Email of the owning account
    pub owner_email: String,

    #[serde(default)]
    pub html: String,

    #[serde(default)]
    pub css: String,

    #[serde(default)]
    pub js: String,

    pub created_at: DateTime<Utc>,

    /// Set by every publish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Domain {
    /// Whether `email` owns this domain.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email == email
    }
}

/// One candidate name produced by a domain search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub domain_name: String,
    pub available: bool,
}
