//! Domain registration, ownership and suggestions.

use std::thread;

use sitebuilder::{
    Session,
    domain::{Suggestion, extensions},
    render::Frame,
    user::Role,
};

use crate::helpers::*;

fn names(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.domain_name.as_str()).collect()
}

#[test]
fn test_standard_suggestions() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");

    let suggestions = instance.suggest(&session, "  MySite ").unwrap();
    assert_eq!(
        names(&suggestions),
        [
            "mysite.scom",
            "mysite.ssin",
            "mysite.ssai",
            "mysite.ssorg",
            "mysite.snet"
        ]
    );
    assert!(suggestions.iter().all(|s| s.available));
    assert_eq!(suggestions.len(), extensions(Role::Standard).len());
}

#[test]
fn test_admin_suggestions() {
    let instance = test_instance_with_admin();
    let session = login_admin(&instance);
    assert!(session.is_admin());

    let suggestions = instance.suggest(&session, "brand").unwrap();
    assert_eq!(names(&suggestions), ["brand.com", "brand.net", "brand.org"]);
}

#[test]
fn test_suggestions_mark_taken_names() {
    let instance = test_instance();
    let alice = login_new_user(&instance, "alice");
    let bob = login_new_user(&instance, "bob");
    instance.register_domain(&alice, "shop.ssai").unwrap();

    let suggestions = instance.suggest(&bob, "shop").unwrap();
    let taken: Vec<&str> = suggestions
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.domain_name.as_str())
        .collect();
    assert_eq!(taken, ["shop.ssai"]);
}

#[test]
fn test_suggest_does_not_register() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.suggest(&session, "alice").unwrap();
    assert!(instance.registry().list().unwrap().is_empty());
}

#[test]
fn test_blank_query_has_no_suggestions() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    assert!(instance.suggest(&session, "   ").unwrap().is_empty());
}

#[test]
fn test_second_registration_is_taken_and_keeps_first() {
    let instance = test_instance();
    let alice = login_new_user(&instance, "alice");
    let bob = login_new_user(&instance, "bob");

    let first = instance.register_domain(&alice, "alice.scom").unwrap();
    let err = instance.register_domain(&bob, "alice.scom").unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "This domain is already taken");

    let stored = instance.find_domain("alice.scom").unwrap().unwrap();
    assert_eq!(stored, first);
    assert_eq!(stored.owner_email, "alice@singla.com");
    assert_eq!(instance.registry().list().unwrap().len(), 1);
}

#[test]
fn test_new_domain_gets_default_document() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    let domain = instance.register_domain(&session, "hello.scom").unwrap();

    assert!(domain.html.contains("<title>My New Website</title>"));
    assert!(domain.html.contains("<h1>Welcome to hello.scom</h1>"));
    assert!(domain.html.contains("Welcome to hello.scom"));
    assert!(domain.css.is_empty());
    assert!(domain.js.is_empty());
    assert!(domain.updated_at.is_none());
}

#[test]
fn test_my_domains_only_lists_own_in_order() {
    let instance = test_instance();
    let alice = login_new_user(&instance, "alice");
    let bob = login_new_user(&instance, "bob");

    instance.register_domain(&alice, "a1.scom").unwrap();
    instance.register_domain(&bob, "b1.scom").unwrap();
    instance.register_domain(&alice, "a2.snet").unwrap();

    let mine: Vec<String> = instance
        .my_domains(&alice)
        .unwrap()
        .into_iter()
        .map(|d| d.domain_name)
        .collect();
    assert_eq!(mine, ["a1.scom", "a2.snet"]);
}

#[test]
fn test_anonymous_is_asked_to_log_in() {
    let instance = test_instance();
    let err = instance
        .register_domain(&Session::anonymous(), "x.scom")
        .unwrap_err();
    assert!(err.is_authentication_error());
    assert_eq!(err.to_string(), "Please log in first");
}

#[test]
fn test_registration_only_accepts_offered_names() {
    let instance = test_instance_with_admin();
    let alice = login_new_user(&instance, "alice");

    for name in ["brand.com", "", "Shop", "Shop.scom", "shop", " shop.scom"] {
        let err = instance.register_domain(&alice, name).unwrap_err();
        assert!(err.is_validation_error(), "{name:?} was accepted");
        assert_eq!(err.to_string(), "Invalid domain name");
    }
    assert!(instance.registry().list().unwrap().is_empty());

    // Admin extensions are for the administrator only, and the reverse
    let admin = login_admin(&instance);
    instance.register_domain(&admin, "brand.com").unwrap();
    assert!(
        instance
            .register_domain(&admin, "brand.scom")
            .unwrap_err()
            .is_validation_error()
    );

    // Every registered name is reachable by visiting it
    instance.register_domain(&alice, "shop.scom").unwrap();
    let mut frame = Frame::default();
    assert!(instance.visit("Shop", &mut frame).unwrap().is_some());
}

#[test]
fn test_concurrent_registrations_claim_a_name_once() {
    let instance = test_instance();
    let sessions: Vec<Session> = (0..8)
        .map(|i| login_new_user(&instance, &format!("user{i}")))
        .collect();

    let handles: Vec<_> = sessions
        .into_iter()
        .map(|session| {
            let instance = instance.clone();
            thread::spawn(move || instance.register_domain(&session, "hot.scom").is_ok())
        })
        .collect();
    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(instance.registry().list().unwrap().len(), 1);
}
