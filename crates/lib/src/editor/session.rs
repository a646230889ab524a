//! Editing session for one domain
//!
//! Opening a session checks ownership and seeds the buffers, preferring an
//! autosaved draft over the published content. While the session is open
//! the host calls [`EditorSession::autosave`] every [`AUTOSAVE_INTERVAL`];
//! [`EditorSession::publish`] pushes the buffers to the registry.

use std::time::Duration;

use tracing::debug;

use super::{
    EditorError,
    buffers::{BufferKind, Buffers},
    draft::{Draft, load_draft, save_draft},
};
use crate::{
    Result,
    domain::{Domain, DomainError, Registry},
    notify::{EDITOR_MESSAGE, Notification, PUBLISH_MESSAGE_TTL, Severity},
    user::User,
};

/// How often hosts should autosave an open session.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Confirmation shown after a successful publish.
pub const PUBLISHED_MESSAGE: &str = "Website published successfully!";

#[derive(Debug)]
pub struct EditorSession {
    registry: Registry,
    domain: String,
    buffers: Option<Buffers>,
}

impl EditorSession {
    /// Open `domain_name` for editing by `requester`.
    ///
    /// Fails with [`DomainError::NotFound`] for unknown domains and
    /// [`EditorError::PermissionDenied`] unless the requester owns it.
    pub fn open(registry: &Registry, domain_name: &str, requester: &User) -> Result<Self> {
        let domain = registry
            .find(domain_name)?
            .ok_or_else(|| DomainError::NotFound {
                domain: domain_name.to_string(),
            })?;

        if !domain.is_owned_by(&requester.email) {
            return Err(EditorError::PermissionDenied {
                domain: domain_name.to_string(),
                requester: requester.email.clone(),
            }
            .into());
        }

        let draft = load_draft(registry.store().as_ref(), domain_name)?;
        debug!(
            domain = domain_name,
            from_draft = draft.is_some(),
            "Opened editor"
        );
        let buffers = seed_buffers(&domain, draft.as_ref());

        Ok(Self {
            registry: registry.clone(),
            domain: domain.domain_name,
            buffers: Some(buffers),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The bound buffers; `None` once the session is closed.
    pub fn buffers(&self) -> Option<&Buffers> {
        self.buffers.as_ref()
    }

    pub fn buffers_mut(&mut self) -> Option<&mut Buffers> {
        self.buffers.as_mut()
    }

    /// Replace one buffer. Returns whether anything changed.
    pub fn set_buffer(&mut self, kind: BufferKind, text: impl Into<String>) -> bool {
        self.buffers
            .as_mut()
            .is_some_and(|buffers| buffers.set(kind, text))
    }

    /// Preview document of the current buffers.
    pub fn preview(&self) -> Option<String> {
        self.buffers.as_ref().map(Buffers::compose)
    }

    /// Snapshot the buffers into the domain's draft slot.
    ///
    /// Returns the saved draft, or `None` when no buffers are bound.
    pub fn autosave(&self) -> Result<Option<Draft>> {
        let Some(buffers) = &self.buffers else {
            return Ok(None);
        };

        let draft = Draft {
            domain: self.domain.clone(),
            html: buffers.html().to_string(),
            css: buffers.css().to_string(),
            js: buffers.js().to_string(),
            saved_at: self.registry.clock().now(),
        };
        save_draft(self.registry.store().as_ref(), &draft)?;
        debug!(domain = %self.domain, revision = buffers.revision(), "Autosaved draft");
        Ok(Some(draft))
    }

    /// Publish the buffers as the domain's content.
    ///
    /// Returns the confirmation to show, or `None` when no buffers are bound.
    pub fn publish(&self) -> Result<Option<Notification>> {
        let Some(buffers) = &self.buffers else {
            return Ok(None);
        };

        self.registry
            .publish(&self.domain, buffers.html(), buffers.css(), buffers.js())?;

        Ok(Some(Notification::new(
            Severity::Success,
            EDITOR_MESSAGE,
            PUBLISHED_MESSAGE,
            self.registry.clock().now(),
            PUBLISH_MESSAGE_TTL,
        )))
    }

    /// Unbind the buffers, handing them back. Later autosaves do nothing.
    pub fn close(&mut self) -> Option<Buffers> {
        self.buffers.take()
    }
}

/// Draft fields win unless empty, field by field.
fn seed_buffers(domain: &Domain, draft: Option<&Draft>) -> Buffers {
    match draft {
        Some(draft) => Buffers::new(
            prefer(&draft.html, &domain.html),
            prefer(&draft.css, &domain.css),
            prefer(&draft.js, &domain.js),
        ),
        None => Buffers::new(
            domain.html.clone(),
            domain.css.clone(),
            domain.js.clone(),
        ),
    }
}

fn prefer(draft: &str, stored: &str) -> String {
    let chosen = if draft.is_empty() { stored } else { draft };
    chosen.to_string()
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{Clock, FixedClock, store::InMemory};

    fn user(handle: &str) -> User {
        User {
            name: handle.to_string(),
            email: format!("{handle}@singla.com"),
            password_hash: String::new(),
            is_admin: None,
        }
    }

    fn setup() -> (Registry, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::default());
        let registry = Registry::new(Arc::new(InMemory::new()), clock.clone());
        registry.register("alice.scom", "alice@singla.com").unwrap();
        (registry, clock)
    }

    #[test]
    fn open_unknown_domain_is_not_found() {
        let (registry, _) = setup();
        let err = EditorSession::open(&registry, "ghost.scom", &user("alice")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn open_by_non_owner_is_denied() {
        let (registry, _) = setup();
        let err = EditorSession::open(&registry, "alice.scom", &user("bob")).unwrap_err();
        assert!(err.is_permission_denied());
    }

    #[test]
    fn open_without_draft_uses_stored_content() {
        let (registry, _) = setup();
        let session = EditorSession::open(&registry, "alice.scom", &user("alice")).unwrap();
        let stored = registry.find("alice.scom").unwrap().unwrap();
        let buffers = session.buffers().unwrap();
        assert_eq!(buffers.html(), stored.html);
        assert_eq!(buffers.css(), "");
        assert_eq!(buffers.js(), "");
    }

    #[test]
    fn draft_fields_fall_back_individually() {
        let (registry, clock) = setup();
        registry
            .publish("alice.scom", "<p>stored</p>", "p {}", "stored()")
            .unwrap();
        save_draft(
            registry.store().as_ref(),
            &Draft {
                domain: "alice.scom".to_string(),
                html: "<p>draft</p>".to_string(),
                css: String::new(),
                js: "draft()".to_string(),
                saved_at: clock.now(),
            },
        )
        .unwrap();

        let session = EditorSession::open(&registry, "alice.scom", &user("alice")).unwrap();
        let buffers = session.buffers().unwrap();
        assert_eq!(buffers.html(), "<p>draft</p>");
        assert_eq!(buffers.css(), "p {}");
        assert_eq!(buffers.js(), "draft()");
    }

    #[test]
    fn autosave_overwrites_single_slot() {
        let (registry, clock) = setup();
        let mut session = EditorSession::open(&registry, "alice.scom", &user("alice")).unwrap();

        session.set_buffer(BufferKind::Html, "<p>one</p>");
        session.autosave().unwrap();
        clock.advance(AUTOSAVE_INTERVAL);
        session.set_buffer(BufferKind::Html, "<p>two</p>");
        let saved = session.autosave().unwrap().unwrap();

        assert_eq!(saved.saved_at, clock.now());
        let stored = load_draft(registry.store().as_ref(), "alice.scom")
            .unwrap()
            .unwrap();
        assert_eq!(stored, saved);
        assert_eq!(stored.html, "<p>two</p>");
        // Autosave never publishes
        assert_ne!(registry.find("alice.scom").unwrap().unwrap().html, "<p>two</p>");
    }

    #[test]
    fn autosave_after_close_is_noop() {
        let (registry, _) = setup();
        let mut session = EditorSession::open(&registry, "alice.scom", &user("alice")).unwrap();
        assert!(session.close().is_some());
        assert!(session.autosave().unwrap().is_none());
        assert!(session.publish().unwrap().is_none());
        assert!(!session.set_buffer(BufferKind::Css, "x"));
        assert!(registry.store().get("draft_alice.scom").unwrap().is_none());
    }

    #[test]
    fn publish_returns_short_lived_confirmation() {
        let (registry, clock) = setup();
        let mut session = EditorSession::open(&registry, "alice.scom", &user("alice")).unwrap();
        session.set_buffer(BufferKind::Html, "<h1>hi</h1>");

        let notice = session.publish().unwrap().unwrap();
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.message, PUBLISHED_MESSAGE);
        assert_eq!(notice.remaining(clock.now()), Duration::from_secs(3));
        assert_eq!(registry.find("alice.scom").unwrap().unwrap().html, "<h1>hi</h1>");
    }
}
