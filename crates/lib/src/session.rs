//! Authenticated session context
//!
//! A [`Session`] holds the user of the current page load, or nobody. It is
//! an explicit value handed to every operation that needs an identity. Hosts
//! that model a single profile persist it under `currentUser` with
//! [`Session::login`] and rebuild it at startup with [`Session::restore`];
//! hosts with their own session mechanism (cookies) build it with
//! [`Session::authenticated`] and never touch the key.

use tracing::debug;

use crate::{
    Result,
    constants::CURRENT_USER,
    store::{self, Store},
    user::{Role, User, UserError},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session for `user` that is not persisted anywhere.
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Rehydrate the session persisted in `store`.
    pub fn restore(store: &dyn Store) -> Result<Self> {
        let user: Option<User> = store::read(store, CURRENT_USER)?;
        debug!(authenticated = user.is_some(), "Restored session");
        Ok(Self { user })
    }

    /// Make `user` the current user and persist the choice.
    pub fn login(&mut self, store: &dyn Store, user: User) -> Result<()> {
        store::write(store, CURRENT_USER, &user)?;
        self.user = Some(user);
        Ok(())
    }

    /// Forget the current user, in memory and in `store`.
    pub fn logout(&mut self, store: &dyn Store) -> Result<()> {
        store.remove(CURRENT_USER)?;
        self.user = None;
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The current user, or [`UserError::AuthenticationRequired`].
    pub fn require_user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| UserError::AuthenticationRequired.into())
    }

    /// Role of the current user; `None` when anonymous.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }

    /// Whether the admin-only panel should be shown.
    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}
