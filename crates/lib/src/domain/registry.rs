//! Domain registry
//!
//! Owns the `domains` list: registration with a uniqueness check, lookup,
//! publishing and per-owner listing. Every write reads the full list,
//! changes it and writes it back while holding a lock shared by every clone
//! of the registry. Separate registries over one store do not share it.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use super::{DomainError, template::default_document, types::Domain};
use crate::{
    Clock, Result,
    constants::DOMAINS,
    store::{self, Store, StoreError},
};

/// Handle onto the domain records of one store
#[derive(Clone, Debug)]
pub struct Registry {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    writes: Arc<Mutex<()>>,
}

impl Registry {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            writes: Arc::new(Mutex::new(())),
        }
    }

    fn write_lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.writes
            .lock()
            .map_err(|_| StoreError::Poisoned.into())
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// All domains, in registration order.
    pub fn list(&self) -> Result<Vec<Domain>> {
        store::read_list(self.store.as_ref(), DOMAINS)
    }

    fn save(&self, domains: &[Domain]) -> Result<()> {
        store::write(self.store.as_ref(), DOMAINS, domains)
    }

    /// Exact-match lookup.
    pub fn find(&self, domain_name: &str) -> Result<Option<Domain>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|d| d.domain_name == domain_name))
    }

    pub fn exists(&self, domain_name: &str) -> Result<bool> {
        Ok(self.find(domain_name)?.is_some())
    }

    /// Claim `domain_name` for `owner_email`.
    ///
    /// Availability is checked again here; a suggestion shown earlier may be
    /// stale. The new domain starts with the default document and empty
    /// style and script.
    pub fn register(&self, domain_name: &str, owner_email: &str) -> Result<Domain> {
        let _guard = self.write_lock()?;
        let mut domains = self.list()?;
        if domains.iter().any(|d| d.domain_name == domain_name) {
            return Err(DomainError::DomainTaken {
                domain: domain_name.to_string(),
            }
            .into());
        }

        let domain = Domain {
            domain_name: domain_name.to_string(),
            owner_email: owner_email.to_string(),
            html: default_document(domain_name),
            css: String::new(),
            js: String::new(),
            created_at: self.clock.now(),
            updated_at: None,
        };
        domains.push(domain.clone());
        self.save(&domains)?;

        info!(domain = %domain.domain_name, owner = %domain.owner_email, "Registered domain");
        Ok(domain)
    }

    /// Replace the published content of `domain_name`.
    pub fn publish(&self, domain_name: &str, html: &str, css: &str, js: &str) -> Result<()> {
        let _guard = self.write_lock()?;
        let mut domains = self.list()?;
        let domain = domains
            .iter_mut()
            .find(|d| d.domain_name == domain_name)
            .ok_or_else(|| DomainError::NotFound {
                domain: domain_name.to_string(),
            })?;

        domain.html = html.to_string();
        domain.css = css.to_string();
        domain.js = js.to_string();
        domain.updated_at = Some(self.clock.now());
        self.save(&domains)?;

        info!(domain = domain_name, "Published domain");
        Ok(())
    }

    /// Domains owned by `owner_email`, in registration order.
    pub fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Domain>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|d| d.is_owned_by(owner_email))
            .collect())
    }
}
