//! Account directory
//!
//! Creates and finds user records under the `users` key. The whole list is
//! read, modified and written back on every signup, under a write lock shared
//! by every clone of the directory.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::{
    UserError,
    crypto::{hash_password, verify_password},
    types::{AdminSeed, User, email_for},
};
use crate::{
    Result,
    constants::{ADMIN_EMAIL, ADMIN_NAME, EMAIL_DOMAIN, USERS},
    store::{self, Store, StoreError},
};

/// Handle onto the account records of one store
#[derive(Clone, Debug)]
pub struct Directory {
    store: Arc<dyn Store>,
    writes: Arc<Mutex<()>>,
}

impl Directory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Serializes read-check-write sequences on the `users` list.
    fn write_lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.writes
            .lock()
            .map_err(|_| StoreError::Poisoned.into())
    }

    /// All accounts, in signup order.
    pub fn list(&self) -> Result<Vec<User>> {
        store::read_list(self.store.as_ref(), USERS)
    }

    /// Exact-match lookup by email.
    pub fn find(&self, email: &str) -> Result<Option<User>> {
        Ok(self.list()?.into_iter().find(|u| u.email == email))
    }

    /// Create an account for `username`.
    ///
    /// The email is derived as `<username>@singla.com`. Fails with
    /// [`UserError::Validation`] when any field is empty and
    /// [`UserError::DuplicateEmail`] when the derived email is taken.
    pub fn register(&self, name: &str, username: &str, password: &str) -> Result<User> {
        for (field, value) in [("name", name), ("username", username), ("password", password)] {
            if value.is_empty() {
                return Err(UserError::Validation { field }.into());
            }
        }

        let email = email_for(username);
        if self.find(&email)?.is_some() {
            return Err(UserError::DuplicateEmail { email }.into());
        }

        // Hashing is slow; keep it outside the lock
        let password_hash = hash_password(password)?;

        let _guard = self.write_lock()?;
        let mut users = self.list()?;
        if users.iter().any(|u| u.email == email) {
            return Err(UserError::DuplicateEmail { email }.into());
        }

        let user = User {
            name: name.to_string(),
            email,
            password_hash,
            is_admin: None,
        };
        users.push(user.clone());
        store::write(self.store.as_ref(), USERS, &users)?;

        info!(email = %user.email, "Created account");
        Ok(user)
    }

    /// Check a login attempt.
    ///
    /// Only `@singla.com` emails may log in, with the reserved administrator
    /// email as the single exception.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        if !email.ends_with(EMAIL_DOMAIN) && email != ADMIN_EMAIL {
            return Err(UserError::DomainRestriction {
                email: email.to_string(),
            }
            .into());
        }

        let user = self
            .find(email)?
            .ok_or(UserError::InvalidCredentials)?;
        verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    /// Create the administrator account if it does not exist yet.
    ///
    /// Runs at every startup; returns whether an account was created.
    pub fn ensure_admin(&self, seed: &AdminSeed) -> Result<bool> {
        if self.find(ADMIN_EMAIL)?.is_some() {
            return Ok(false);
        }
        if seed.password().is_empty() {
            return Err(UserError::Validation { field: "password" }.into());
        }
        let password_hash = hash_password(seed.password())?;

        let _guard = self.write_lock()?;
        let mut users = self.list()?;
        if users.iter().any(|u| u.email == ADMIN_EMAIL) {
            return Ok(false);
        }
        users.push(User {
            name: ADMIN_NAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            is_admin: Some(true),
        });
        store::write(self.store.as_ref(), USERS, &users)?;

        warn!(email = ADMIN_EMAIL, "Seeded administrator account");
        Ok(true)
    }
}
