//! Time-boxed UI feedback: the "added to list" toast and the share button's
//! "Copied!" state.
//!
//! Neither owns a timer. Callers pass the current [`Instant`] and visibility
//! is derived from it, so expiry is deterministic under test.

use std::time::{Duration, Instant};

/// How long an "added to list" toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// How long the share button reads "Copied!"
pub const COPIED_DURATION: Duration = Duration::from_secs(2);

/// Source of wall-clock and monotonic time for a session
pub trait Clock {
    /// Unix time in milliseconds, used to stamp new item ids
    fn now_ms(&self) -> i64;
    /// Monotonic time, used for toast expiry
    fn now(&self) -> Instant;
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        crate::util::unix_timestamp_millis_now()
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A single transient message; a newer message replaces the current one.
#[derive(Debug, Clone)]
pub struct Toast {
    current: Option<(String, Instant)>,
    duration: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(TOAST_DURATION)
    }
}

impl Toast {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some((message.into(), now));
    }

    /// The visible message at `now`, if it has not expired.
    #[must_use]
    pub fn message(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| now.saturating_duration_since(*shown_at) < self.duration)
            .map(|(message, _)| message.as_str())
    }
}

/// A boolean that reverts to `false` after a fixed duration.
#[derive(Debug, Clone)]
pub struct TimedFlag {
    raised_at: Option<Instant>,
    duration: Duration,
}

impl TimedFlag {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            raised_at: None,
            duration,
        }
    }

    pub fn raise(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    #[must_use]
    pub fn is_raised(&self, now: Instant) -> bool {
        self.raised_at
            .is_some_and(|raised_at| now.saturating_duration_since(raised_at) < self.duration)
    }
}
