//! Environment module - Dependency injection traits
//!
//! All process-wide state the engine needs (current time, identifier
//! sequences) is abstracted behind these traits and injected by the caller.
//! Production, test and demo code each pick their own implementation.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use cinema_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let _now = clock.now();
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Identifier generator - hands out monotonically increasing ids
///
/// Reservation numbers are drawn from an implementation of this trait instead
/// of a hidden global counter, so tests can create a fresh sequence and get
/// predictable ids.
pub trait IdGenerator: Send + Sync {
    /// Return the next identifier in the sequence
    fn next_id(&self) -> u64;
}

/// Monotonic sequence starting at 1
///
/// # Examples
///
/// ```
/// use cinema_core::environment::{IdGenerator, SequentialIds};
///
/// let ids = SequentialIds::new();
/// assert_eq!(ids.next_id(), 1);
/// assert_eq!(ids.peek(), 2);
/// ```
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Create a sequence whose first id is 1
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a sequence whose first id is `first`
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The id the next call to [`IdGenerator::next_id`] will return
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Restart the sequence at 1
    pub fn reset(&self) {
        self.next.store(1, Ordering::Relaxed);
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
