//! Signup, login and administrator bootstrap.

use std::thread;

use sitebuilder::{
    Error, Session,
    constants::{ADMIN_EMAIL, CURRENT_USER},
    user::{AdminSeed, Role, UserError},
};

use crate::helpers::*;

#[test]
fn test_distinct_signups_can_all_log_in() {
    let instance = test_instance();
    let names = ["alice", "bob", "carol", "dave"];
    for name in names {
        signup(&instance, name, &format!("{name}-pw"));
    }

    let emails: Vec<String> = instance
        .directory()
        .list()
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect();
    assert_eq!(
        emails,
        names.map(|n| format!("{n}@singla.com")).to_vec()
    );

    for name in names {
        let user = instance
            .authenticate(&format!("{name}@singla.com"), &format!("{name}-pw"))
            .unwrap();
        assert_eq!(user.role(), Role::Standard);
    }
}

#[test]
fn test_duplicate_signup_is_rejected() {
    let instance = test_instance();
    signup(&instance, "alice", "pw");

    let err = instance.signup("Other Alice", "alice", "pw2").unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "Email already exists");

    // The original account still logs in with its own password
    assert!(instance.authenticate("alice@singla.com", "pw").is_ok());
    assert!(instance.authenticate("alice@singla.com", "pw2").is_err());
}

#[test]
fn test_signup_requires_every_field() {
    let instance = test_instance();
    let err = instance.signup("Alice", "alice", "").unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(err.to_string(), "All fields are required");
    assert!(instance.directory().list().unwrap().is_empty());
}

#[test]
fn test_foreign_emails_cannot_log_in() {
    let instance = test_instance();
    signup(&instance, "alice", "pw");

    for email in ["alice@gmail.com", "alice@singla.org", "alice"] {
        let err = instance.authenticate(email, "pw").unwrap_err();
        assert!(
            matches!(err, Error::User(UserError::DomainRestriction { .. })),
            "{email} should be restricted"
        );
        assert_eq!(err.to_string(), "Only @singla.com emails are allowed");
    }
}

#[test]
fn test_admin_email_bypasses_domain_check() {
    let instance = test_instance_with_admin();
    let admin = instance.authenticate(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    assert_eq!(admin.role(), Role::Admin);
    assert_eq!(admin.is_admin, Some(true));

    let err = instance.authenticate(ADMIN_EMAIL, "guess").unwrap_err();
    assert!(matches!(err, Error::User(UserError::InvalidCredentials)));
}

#[test]
fn test_admin_bypass_without_seed_is_invalid_credentials() {
    let instance = test_instance();
    assert!(!instance.ensure_admin(None).unwrap());

    let err = instance.authenticate(ADMIN_EMAIL, "anything").unwrap_err();
    assert!(err.is_authentication_error());
    assert!(matches!(err, Error::User(UserError::InvalidCredentials)));
}

#[test]
fn test_ensure_admin_is_idempotent() {
    let instance = test_instance_with_admin();
    assert!(
        !instance
            .ensure_admin(Some(&AdminSeed::new("different")))
            .unwrap()
    );

    // The first seed stays in force
    assert!(instance.authenticate(ADMIN_EMAIL, ADMIN_PASSWORD).is_ok());
    assert!(instance.authenticate(ADMIN_EMAIL, "different").is_err());

    let admins = instance
        .directory()
        .list()
        .unwrap()
        .into_iter()
        .filter(|u| u.email == ADMIN_EMAIL)
        .count();
    assert_eq!(admins, 1);
}

#[test]
fn test_passwords_are_not_stored_in_plaintext() {
    let instance = test_instance();
    signup(&instance, "alice", "correct horse battery staple");

    let raw = instance.store().get("users").unwrap().unwrap();
    assert!(!raw.contains("correct horse battery staple"));
    assert!(raw.contains("$argon2"));
}

#[test]
fn test_login_and_logout_round_trip_current_user() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    assert!(instance.store().get(CURRENT_USER).unwrap().is_some());

    let mut restored = instance.restore_session().unwrap();
    assert_eq!(restored, session);

    instance.logout(&mut restored).unwrap();
    assert_eq!(instance.restore_session().unwrap(), Session::anonymous());
}

#[test]
fn test_concurrent_signups_are_all_kept() {
    let instance = test_instance();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let instance = instance.clone();
            thread::spawn(move || instance.signup("N", &format!("user{i}"), "pw").is_ok())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }

    let users = instance.directory().list().unwrap();
    assert_eq!(users.len(), 8);
    for i in 0..8 {
        assert!(
            instance
                .authenticate(&format!("user{i}@singla.com"), "pw")
                .is_ok()
        );
    }
}

#[test]
fn test_concurrent_duplicate_signups_keep_one_account() {
    let instance = test_instance();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let instance = instance.clone();
            thread::spawn(move || {
                instance
                    .signup("Alice", "alice", &format!("pw{i}"))
                    .is_ok()
            })
        })
        .collect();
    let created = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(created, 1);
    assert_eq!(instance.directory().list().unwrap().len(), 1);
}
