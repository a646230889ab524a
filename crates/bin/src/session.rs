//! Session management for the web host
//!
//! A browser gets a token cookie once there is something to remember for it:
//! a login, or a form message that must survive the redirect after a POST.
//! The token maps to the visitor's [`Session`] and a [`Notifier`]. Anonymous
//! entries whose messages have all expired are pruned when new ones are
//! created, and logging out destroys the entry.

use std::{collections::HashMap, sync::Arc};

use sitebuilder::{
    Clock, Session,
    notify::{Notification, Notifier},
    user::User,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (UUID stored in cookie)
pub type SessionToken = String;

struct Visitor {
    session: Session,
    notifier: Notifier,
}

/// In-memory session store
///
/// Sessions are ephemeral and lost on server restart; the persisted
/// `currentUser` key is not used by the web host.
#[derive(Clone)]
pub struct SessionStore {
    clock: Arc<dyn Clock>,
    visitors: Arc<RwLock<HashMap<SessionToken, Visitor>>>,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            visitors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start an anonymous session and return its token.
    pub async fn create_session(&self) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let visitor = Visitor {
            session: Session::anonymous(),
            notifier: Notifier::new(self.clock.clone()),
        };
        let mut visitors = self.visitors.write().await;
        prune(&mut visitors);
        visitors.insert(token.clone(), visitor);
        token
    }

    /// Drop the session entirely.
    pub async fn destroy_session(&self, token: &str) {
        self.visitors.write().await.remove(token);
    }

    /// Drop anonymous sessions with no live messages; returns how many went.
    pub async fn prune(&self) -> usize {
        prune(&mut *self.visitors.write().await)
    }

    /// Whether `token` names a live session.
    pub async fn contains(&self, token: &str) -> bool {
        self.visitors.read().await.contains_key(token)
    }

    /// The session for `token`; unknown tokens are anonymous.
    pub async fn session(&self, token: &str) -> Session {
        self.visitors
            .read()
            .await
            .get(token)
            .map(|v| v.session.clone())
            .unwrap_or_default()
    }

    /// Attach `user` to the session.
    pub async fn login(&self, token: &str, user: User) {
        if let Some(visitor) = self.visitors.write().await.get_mut(token) {
            visitor.session = Session::authenticated(user);
        }
    }

    /// Queue a message for the next page this visitor loads.
    pub async fn notify(&self, token: &str, notification: Notification) {
        if let Some(visitor) = self.visitors.write().await.get_mut(token) {
            visitor.notifier.push(notification);
        }
    }

    /// The live message for `target`, if it has not expired yet.
    pub async fn message(&self, token: &str, target: &str) -> Option<Notification> {
        let mut visitors = self.visitors.write().await;
        visitors
            .get_mut(token)
            .and_then(|v| v.notifier.for_target(target).cloned())
    }

    /// Get the number of sessions (for the health endpoint)
    pub async fn session_count(&self) -> usize {
        self.visitors.read().await.len()
    }
}

fn prune(visitors: &mut HashMap<SessionToken, Visitor>) -> usize {
    let before = visitors.len();
    visitors.retain(|_, v| v.session.is_authenticated() || !v.notifier.active().is_empty());
    before - visitors.len()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sitebuilder::{
        FixedClock, SystemClock,
        notify::{FORM_MESSAGE_TTL, LOGIN_MESSAGE, Severity},
    };

    use super::*;

    fn alice() -> User {
        User {
            name: "Alice".to_string(),
            email: "alice@singla.com".to_string(),
            password_hash: String::new(),
            is_admin: None,
        }
    }

    fn login_error(now: chrono::DateTime<chrono::Utc>) -> Notification {
        Notification::new(
            Severity::Error,
            LOGIN_MESSAGE,
            "Invalid email or password",
            now,
            FORM_MESSAGE_TTL,
        )
    }

    #[tokio::test]
    async fn login_and_destroy() {
        let store = SessionStore::new(Arc::new(SystemClock));
        let token = store.create_session().await;
        assert!(!store.session(&token).await.is_authenticated());

        store.login(&token, alice()).await;
        assert_eq!(store.session(&token).await.user(), Some(&alice()));

        store.destroy_session(&token).await;
        assert!(!store.contains(&token).await);
        assert!(!store.session(&token).await.is_authenticated());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn prune_keeps_logged_in_and_flashed_visitors() {
        let clock = Arc::new(FixedClock::default());
        let store = SessionStore::new(clock.clone());

        let idle = store.create_session().await;
        let logged_in = store.create_session().await;
        store.login(&logged_in, alice()).await;
        let flashed = store.create_session().await;
        store.notify(&flashed, login_error(clock.now())).await;

        assert_eq!(store.prune().await, 1);
        assert!(!store.contains(&idle).await);
        assert!(store.contains(&logged_in).await);
        assert!(store.contains(&flashed).await);

        // Once the message expires the anonymous entry goes too
        clock.advance(FORM_MESSAGE_TTL);
        assert_eq!(store.prune().await, 1);
        assert!(!store.contains(&flashed).await);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn creating_sessions_does_not_accumulate_idle_ones() {
        let store = SessionStore::new(Arc::new(SystemClock));
        for _ in 0..50 {
            store.create_session().await;
        }
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous_and_ignored() {
        let store = SessionStore::new(Arc::new(SystemClock));
        store.login("nope", alice()).await;
        assert!(!store.contains("nope").await);
        assert!(!store.session("nope").await.is_authenticated());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn messages_are_kept_per_target() {
        let clock = Arc::new(SystemClock);
        let store = SessionStore::new(clock.clone());
        let token = store.create_session().await;
        store.notify(&token, login_error(clock.now())).await;

        let message = store.message(&token, LOGIN_MESSAGE).await.unwrap();
        assert_eq!(message.message, "Invalid email or password");
        assert!(message.remaining(clock.now()) <= FORM_MESSAGE_TTL);
        assert!(message.remaining(clock.now()) > Duration::ZERO);
        assert!(store.message(&token, "other").await.is_none());
    }
}
