//! Time provider abstraction
//!
//! Records carry creation, update and save timestamps, and notifications
//! expire after a fixed lifetime. Everything that needs "now" asks a
//! [`Clock`] so tests can pin and step time.
//!
//! # Example
//!
//! ```
//! use sitebuilder::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let stamp = clock.now_rfc3339();
//! assert!(stamp.contains('T'));
//! ```

use std::fmt::Debug;

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for getting current timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as an RFC3339-formatted string.
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339()
    }

    /// Returns the current time as milliseconds since Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Production clock using real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock that only moves when told to, through [`FixedClock::advance`]
/// or [`FixedClock::set`].
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    instant: Mutex<DateTime<Utc>>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a clock frozen at the given milliseconds since Unix epoch.
    pub fn new(millis: i64) -> Self {
        let instant = DateTime::from_timestamp_millis(millis).unwrap_or_default();
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: std::time::Duration) {
        let delta = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
        let mut instant = self.instant.lock().unwrap();
        *instant += delta;
    }

    /// Set the clock to a specific time in milliseconds.
    pub fn set(&self, millis: i64) {
        if let Some(instant) = DateTime::from_timestamp_millis(millis) {
            *self.instant.lock().unwrap() = instant;
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().unwrap()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1_704_067_200_000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedClock")
            .field("instant", &*self.instant.lock().unwrap())
            .finish()
    }
}
