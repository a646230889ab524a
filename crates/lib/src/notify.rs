//! Transient status messages
//!
//! Form feedback and publish confirmations are short-lived: each
//! [`Notification`] carries the instant it stops being shown, and a
//! [`Notifier`] drops expired ones whenever it is read.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Clock;

/// Lifetime of login and signup form messages.
pub const FORM_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Lifetime of the publish confirmation.
pub const PUBLISH_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// UI slot for login form messages.
pub const LOGIN_MESSAGE: &str = "login-message";

/// UI slot for signup form messages.
pub const SIGNUP_MESSAGE: &str = "signup-message";

/// UI slot at the top of the editor.
pub const EDITOR_MESSAGE: &str = "editor";

/// UI slot on the dashboard (domain search and registration).
pub const DASHBOARD_MESSAGE: &str = "dashboard";

/// Shown in the signup slot once an account exists. Signup does not log in.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account created successfully! Please login.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub severity: Severity,
    /// UI slot the message belongs to
    pub target: String,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        severity: Severity,
        target: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            severity,
            target: target.into(),
            message: message.into(),
            expires_at: now + to_delta(ttl),
        }
    }

    /// A form error message for `target` built from `err`'s display text.
    pub fn from_error(
        target: impl Into<String>,
        err: &crate::Error,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            Severity::Error,
            target,
            err.to_string(),
            now,
            FORM_MESSAGE_TTL,
        )
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time left before the message clears itself.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

fn to_delta(ttl: Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero())
}

/// Queue of live notifications, pruned against a clock.
#[derive(Debug)]
pub struct Notifier {
    clock: Arc<dyn Clock>,
    queue: Vec<Notification>,
}

impl Notifier {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: Vec::new(),
        }
    }

    /// Post a message to `target`, replacing whatever that slot showed.
    pub fn notify(
        &mut self,
        severity: Severity,
        target: &str,
        message: impl Into<String>,
        ttl: Duration,
    ) -> &Notification {
        let notification = Notification::new(severity, target, message, self.clock.now(), ttl);
        self.push(notification)
    }

    /// Post an already built notification, replacing its slot.
    pub fn push(&mut self, notification: Notification) -> &Notification {
        self.queue.retain(|n| n.target != notification.target);
        self.queue.push(notification);
        &self.queue[self.queue.len() - 1]
    }

    /// Live notifications, oldest first.
    pub fn active(&mut self) -> &[Notification] {
        let now = self.clock.now();
        self.queue.retain(|n| !n.is_expired(now));
        &self.queue
    }

    /// The live notification shown in `target`, if any.
    pub fn for_target(&mut self, target: &str) -> Option<&Notification> {
        self.active().iter().find(|n| n.target == target)
    }
}
