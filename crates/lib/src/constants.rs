//! Constants used throughout the sitebuilder library.
//!
//! Central definitions for the store keys, the account email rules and the
//! reserved administrator identity.

/// Store key holding the list of user accounts.
pub const USERS: &str = "users";

/// Store key holding the list of registered domains.
pub const DOMAINS: &str = "domains";

/// Store key holding the user of the last login on this profile.
pub const CURRENT_USER: &str = "currentUser";

/// Prefix of the per-domain draft keys (`draft_<domainName>`).
pub const DRAFT_PREFIX: &str = "draft_";

/// Suffix every account email must carry.
pub const EMAIL_DOMAIN: &str = "@singla.com";

/// Reserved administrator email.
///
/// It does not carry [`EMAIL_DOMAIN`] and is let through the login domain
/// check as a literal exception.
pub const ADMIN_EMAIL: &str = "sakshamsingla4.com";

/// Display name of the seeded administrator account.
pub const ADMIN_NAME: &str = "Admin";

/// Extension appended to visited names that carry none.
pub const DEFAULT_EXTENSION: &str = "scom";
