//! The sitebuilder instance
//!
//! `Instance` owns the store and the clock of one profile and exposes every
//! page-level operation: signup, login, domain search and registration,
//! editing and visiting. Operations that act for someone take the
//! [`Session`] explicitly; nothing here remembers who is logged in.

use std::sync::Arc;

use tracing::warn;

use crate::{
    Clock, Result, SystemClock,
    domain::{Domain, Registry, Suggestion, check_name},
    editor::EditorSession,
    notify::Notifier,
    render::{DisplaySurface, render},
    session::Session,
    store::Store,
    user::{AdminSeed, Directory, User},
    visit::resolve,
};

/// Cheap-to-clone handle onto one profile's store.
#[derive(Clone, Debug)]
pub struct Instance {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    directory: Directory,
    registry: Registry,
}

impl Instance {
    /// Open an instance over `store` using the system clock.
    pub fn open(store: Box<dyn Store>) -> Self {
        Self::open_with_clock(store, Arc::new(SystemClock))
    }

    /// Open an instance with an explicit time source.
    pub fn open_with_clock(store: Box<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        let store: Arc<dyn Store> = Arc::from(store);
        Self {
            directory: Directory::new(store.clone()),
            registry: Registry::new(store.clone(), clock.clone()),
            store,
            clock,
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A notification queue on this instance's clock.
    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.clock.clone())
    }

    /// Startup bootstrap of the administrator account.
    ///
    /// Without a configured seed nothing is created. Returns whether an
    /// account was created.
    pub fn ensure_admin(&self, seed: Option<&AdminSeed>) -> Result<bool> {
        match seed {
            Some(seed) => self.directory.ensure_admin(seed),
            None => {
                if self.directory.find(crate::constants::ADMIN_EMAIL)?.is_none() {
                    warn!("No administrator password configured; admin account not seeded");
                }
                Ok(false)
            }
        }
    }

    /// The session persisted by the last login on this profile.
    pub fn restore_session(&self) -> Result<Session> {
        Session::restore(self.store.as_ref())
    }

    /// Create an account. Signing up does not log in.
    pub fn signup(&self, name: &str, username: &str, password: &str) -> Result<User> {
        self.directory.register(name, username, password)
    }

    /// Check credentials without touching any session.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        self.directory.authenticate(email, password)
    }

    /// Authenticate and make the user current on this profile.
    pub fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<User> {
        let user = self.directory.authenticate(email, password)?;
        session.login(self.store.as_ref(), user.clone())?;
        Ok(user)
    }

    pub fn logout(&self, session: &mut Session) -> Result<()> {
        session.logout(self.store.as_ref())
    }

    /// Domain candidates for `query`, using the session user's role.
    pub fn suggest(&self, session: &Session, query: &str) -> Result<Vec<Suggestion>> {
        let role = session.require_user()?.role();
        self.registry.suggest(query, role)
    }

    /// Register `domain_name` for the session user.
    ///
    /// Only names a search by the user could offer are accepted: a lowercase
    /// label and one of the extensions of the user's role.
    pub fn register_domain(&self, session: &Session, domain_name: &str) -> Result<Domain> {
        let owner = session.require_user()?;
        check_name(domain_name, owner.role())?;
        self.registry.register(domain_name, &owner.email)
    }

    /// Domains owned by the session user.
    pub fn my_domains(&self, session: &Session) -> Result<Vec<Domain>> {
        let owner = session.require_user()?;
        self.registry.list_by_owner(&owner.email)
    }

    /// Open the editor on `domain_name` for the session user.
    pub fn open_editor(&self, session: &Session, domain_name: &str) -> Result<EditorSession> {
        let requester = session.require_user()?;
        EditorSession::open(&self.registry, domain_name, requester)
    }

    pub fn find_domain(&self, domain_name: &str) -> Result<Option<Domain>> {
        self.registry.find(domain_name)
    }

    /// Resolve `raw`, look it up and render the result on `surface`.
    ///
    /// Visiting needs no login.
    pub fn visit(&self, raw: &str, surface: &mut dyn DisplaySurface) -> Result<Option<Domain>> {
        let domain = self.registry.find(&resolve(raw))?;
        render(domain.as_ref(), surface);
        Ok(domain)
    }
}
