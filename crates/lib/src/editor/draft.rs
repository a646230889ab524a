//! Autosaved drafts
//!
//! One draft slot per domain, keyed `draft_<domainName>` whoever is editing.
//! Two editors open on the same domain overwrite each other's drafts; the
//! last autosave wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    constants::DRAFT_PREFIX,
    store::{self, Store},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub domain: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    pub saved_at: DateTime<Utc>,
}

/// Store key of the draft slot for `domain`.
pub fn draft_key(domain: &str) -> String {
    format!("{DRAFT_PREFIX}{domain}")
}

pub fn load_draft(store: &dyn Store, domain: &str) -> Result<Option<Draft>> {
    store::read(store, &draft_key(domain))
}

/// Write `draft` into its domain's slot, replacing the previous one.
pub fn save_draft(store: &dyn Store, draft: &Draft) -> Result<()> {
    store::write(store, &draft_key(&draft.domain), draft)
}
