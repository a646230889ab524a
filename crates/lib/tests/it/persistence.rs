//! The JSON store file across restarts.

use sitebuilder::{
    Instance,
    store::{InMemory, Store},
};

use crate::helpers::*;

#[test]
fn test_profile_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sitebuilder.json");

    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.register_domain(&session, "alice.scom").unwrap();
    instance
        .store()
        .as_any()
        .downcast_ref::<InMemory>()
        .unwrap()
        .save_to_file(&path)
        .unwrap();

    let reopened = Instance::open(Box::new(InMemory::load_from_file(&path).unwrap()));
    let restored = reopened.restore_session().unwrap();
    assert_eq!(restored, session);
    assert_eq!(reopened.my_domains(&restored).unwrap().len(), 1);
    assert!(
        reopened
            .authenticate("alice@singla.com", "alice-password")
            .is_ok()
    );
}

#[test]
fn test_missing_file_is_empty_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = InMemory::load_from_file(dir.path().join("absent.json")).unwrap();
    assert!(store.is_empty().unwrap());

    let instance = Instance::open(Box::new(store));
    assert!(!instance.restore_session().unwrap().is_authenticated());
}

#[test]
fn test_corrupt_record_is_reported() {
    let store = InMemory::new();
    store.set("domains", "{not json".to_string()).unwrap();
    let instance = Instance::open(Box::new(store));

    let err = instance.find_domain("alice.scom").unwrap_err();
    assert!(err.is_integrity_error());
    assert_eq!(err.module(), "store");
}

#[test]
fn test_unknown_file_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.json");
    std::fs::write(&path, r#"{"_v": 9, "entries": {}}"#).unwrap();

    assert!(InMemory::load_from_file(&path).is_err());
}
