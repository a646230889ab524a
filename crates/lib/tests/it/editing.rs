//! Editor sessions, drafts and publishing.

use sitebuilder::{
    editor::{BufferKind, load_draft},
    notify::{EDITOR_MESSAGE, Severity},
};

use crate::helpers::*;

#[test]
fn test_publish_then_reopen_without_draft() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.register_domain(&session, "alice.scom").unwrap();

    instance
        .registry()
        .publish("alice.scom", "<p>one</p>", "p { color: red; }", "go()")
        .unwrap();

    let editor = instance.open_editor(&session, "alice.scom").unwrap();
    let buffers = editor.buffers().unwrap();
    assert_eq!(buffers.html(), "<p>one</p>");
    assert_eq!(buffers.css(), "p { color: red; }");
    assert_eq!(buffers.js(), "go()");
}

#[test]
fn test_only_owner_may_edit() {
    let instance = test_instance();
    let alice = login_new_user(&instance, "alice");
    let bob = login_new_user(&instance, "bob");
    instance.register_domain(&alice, "alice.scom").unwrap();

    let err = instance.open_editor(&bob, "alice.scom").unwrap_err();
    assert!(err.is_permission_denied());
    assert_eq!(
        err.to_string(),
        "You do not have permission to edit this domain"
    );

    let err = instance.open_editor(&alice, "ghost.scom").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Domain not found");
}

#[test]
fn test_autosaved_draft_survives_reopen() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.register_domain(&session, "alice.scom").unwrap();
    let published = instance.find_domain("alice.scom").unwrap().unwrap();

    let mut editor = instance.open_editor(&session, "alice.scom").unwrap();
    editor.set_buffer(BufferKind::Css, "body { margin: 0; }");
    editor.autosave().unwrap();
    editor.close();

    // Reopening picks the draft up
    let reopened = instance.open_editor(&session, "alice.scom").unwrap();
    let buffers = reopened.buffers().unwrap();
    assert_eq!(buffers.css(), "body { margin: 0; }");
    assert_eq!(buffers.html(), published.html);

    // Nothing was published
    let stored = instance.find_domain("alice.scom").unwrap().unwrap();
    assert_eq!(stored, published);
}

#[test]
fn test_drafts_are_one_slot_per_domain() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.register_domain(&session, "alice.scom").unwrap();

    let mut first = instance.open_editor(&session, "alice.scom").unwrap();
    let mut second = instance.open_editor(&session, "alice.scom").unwrap();

    first.set_buffer(BufferKind::Js, "first()");
    first.autosave().unwrap();
    second.set_buffer(BufferKind::Js, "second()");
    second.autosave().unwrap();

    let draft = load_draft(instance.store().as_ref(), "alice.scom")
        .unwrap()
        .unwrap();
    assert_eq!(draft.js, "second()");
    let draft_keys = instance
        .store()
        .keys()
        .unwrap()
        .into_iter()
        .filter(|k| k.starts_with("draft_"))
        .count();
    assert_eq!(draft_keys, 1);
}

#[test]
fn test_publish_confirms_and_updates() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.register_domain(&session, "alice.scom").unwrap();

    let mut editor = instance.open_editor(&session, "alice.scom").unwrap();
    editor.set_buffer(BufferKind::Html, "<main>v2</main>");
    let notice = editor.publish().unwrap().unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(notice.target, EDITOR_MESSAGE);
    assert_eq!(notice.message, "Website published successfully!");

    let stored = instance.find_domain("alice.scom").unwrap().unwrap();
    assert_eq!(stored.html, "<main>v2</main>");
    assert!(stored.updated_at.is_some());
}

#[test]
fn test_preview_tracks_buffers() {
    let instance = test_instance();
    let session = login_new_user(&instance, "alice");
    instance.register_domain(&session, "alice.scom").unwrap();

    let mut editor = instance.open_editor(&session, "alice.scom").unwrap();
    let before = editor.buffers().unwrap().revision();
    assert!(editor.set_buffer(BufferKind::Html, "<b>live</b>"));
    assert!(!editor.set_buffer(BufferKind::Html, "<b>live</b>"));
    assert_eq!(editor.buffers().unwrap().revision(), before + 1);
    assert!(editor.preview().unwrap().contains("<b>live</b>"));
}
