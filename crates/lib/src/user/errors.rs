//! Error types for the user system
//!
//! Display strings are the messages shown to people filling in the login and
//! signup forms.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("All fields are required")]
    Validation { field: &'static str },

    #[error("Email already exists")]
    DuplicateEmail { email: String },

    #[error("Only @singla.com emails are allowed")]
    DomainRestriction { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please log in first")]
    AuthenticationRequired,

    #[error("Password hashing failed: {reason}")]
    PasswordHashing { reason: String },
}

impl UserError {
    /// Check if this error is a rejected login.
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            UserError::DomainRestriction { .. }
                | UserError::InvalidCredentials
                | UserError::AuthenticationRequired
        )
    }

    /// Check if this error is a rejected form submission.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, UserError::Validation { .. })
    }

    /// Check if this error indicates the account already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, UserError::DuplicateEmail { .. })
    }
}

impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
