//! Core data types for the user system

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{ADMIN_EMAIL, EMAIL_DOMAIN};

/// A user account as stored under the `users` key
///
/// The email is the unique login identifier. The password is kept only as
/// an Argon2id hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name given at signup
    pub name: String,

    /// Login identifier, `<username>@singla.com` for regular accounts
    pub email: String,

    /// Password hash (Argon2id, PHC string format)
    pub password_hash: String,

    /// Set on the seeded administrator account only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl User {
    /// The role this account acts with.
    pub fn role(&self) -> Role {
        Role::of(self)
    }

    /// Whether this is the reserved administrator account.
    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

/// Role of an authenticated user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The reserved administrator identity
    Admin,
    /// Everyone else
    Standard,
}

impl Role {
    /// Admin is decided by the reserved email alone, not the stored flag.
    pub fn of(user: &User) -> Self {
        if user.email == ADMIN_EMAIL {
            Role::Admin
        } else {
            Role::Standard
        }
    }
}

/// Derive the account email for a signup username.
pub fn email_for(username: &str) -> String {
    format!("{username}{EMAIL_DOMAIN}")
}

/// Credentials for the administrator account created on first start
///
/// Supplied by the deployment (CLI flag or environment), never compiled in.
/// The secret is wiped from memory when the seed is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AdminSeed {
    password: String,
}

impl AdminSeed {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("password", &"<redacted>")
            .finish()
    }
}
