//! Password hashing for user accounts
//!
//! Accounts never store the submitted secret. Signup stores an Argon2id hash
//! in PHC string format (salt and parameters embedded), and login verifies
//! the submitted password against it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::UserError;
use crate::Result;

/// Hash a password using Argon2id with a fresh random salt
///
/// # Returns
/// The PHC-format hash string, which carries its own salt.
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| UserError::PasswordHashing {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// # Returns
/// `Ok(())` if the password matches, [`UserError::InvalidCredentials`] if it
/// does not, and [`UserError::PasswordHashing`] if the stored hash is not a
/// valid PHC string.
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|e| UserError::PasswordHashing {
            reason: e.to_string(),
        })?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| UserError::InvalidCredentials.into())
}
