//! Whole journeys, from signup to a visitor seeing the published site.

use sitebuilder::{
    Route, Session,
    editor::BufferKind,
    render::{Frame, compose},
};

use crate::helpers::*;

#[test]
fn test_alice_builds_and_publishes_a_site() {
    let instance = test_instance();

    // Signup does not log in
    instance.signup("Alice", "alice", "pw").unwrap();
    let mut session = instance.restore_session().unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(Route::Dashboard.guard(&session), Route::Index);

    instance
        .login(&mut session, "alice@singla.com", "pw")
        .unwrap();
    assert_eq!(Route::Index.guard(&session), Route::Dashboard);

    let suggestions = instance.suggest(&session, "alice").unwrap();
    assert_eq!(suggestions[0].domain_name, "alice.scom");
    assert!(suggestions[0].available);
    instance
        .register_domain(&session, &suggestions[0].domain_name)
        .unwrap();

    let mut editor = instance.open_editor(&session, "alice.scom").unwrap();
    editor.set_buffer(BufferKind::Html, "<h1>hi</h1>");
    editor.set_buffer(BufferKind::Css, "");
    editor.set_buffer(BufferKind::Js, "");
    editor.autosave().unwrap();
    editor.publish().unwrap();
    editor.close();

    // Reopening shows exactly what was published
    let reopened = instance.open_editor(&session, "alice.scom").unwrap();
    let buffers = reopened.buffers().unwrap();
    assert_eq!(buffers.html(), "<h1>hi</h1>");
    assert_eq!(buffers.css(), "");
    assert_eq!(buffers.js(), "");
    let published = instance.find_domain("alice.scom").unwrap().unwrap();
    assert_eq!(published.html, "<h1>hi</h1>");
    assert!(published.updated_at.is_some());

    // A visitor needs no account
    let visitor = Session::anonymous();
    assert_eq!(
        Route::View { domain: None }.guard(&visitor),
        Route::View { domain: None }
    );
    let mut frame = Frame::default();
    let visited = instance.visit("alice", &mut frame).unwrap().unwrap();
    let document = frame.document.unwrap();

    let body = document.split("<body>").nth(1).unwrap();
    assert!(body.contains("<h1>hi</h1>"));
    assert!(document.contains("<style></style>"));
    assert!(document.contains("<title>alice.scom</title>"));
    assert!(!frame.not_found);
    assert_eq!(
        frame.location.map(|r| r.to_url()),
        Some("/view?domain=alice.scom".to_string())
    );

    // The editor preview is the same page without the title
    assert_eq!(
        compose(&visited.html, &visited.css, &visited.js),
        compose("<h1>hi</h1>", "", "")
    );
}

#[test]
fn test_visit_resolves_before_lookup() {
    let instance = test_instance();
    let session = login_new_user(&instance, "bob");
    instance.register_domain(&session, "bob.snet").unwrap();

    let mut frame = Frame::default();
    assert!(instance.visit("  BOB.SNET ", &mut frame).unwrap().is_some());
    assert!(frame.visible);

    // No dot means .scom, which bob never registered
    let mut frame = Frame::default();
    assert!(instance.visit("bob", &mut frame).unwrap().is_none());
    assert!(frame.not_found);
    assert!(frame.document.is_none());
}
