//! # Cinema Testing
//!
//! Testing utilities and helpers for the cinema seating engine.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Fixtures for the standard room and screening
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use cinema::{Seat, SeatKind};
//! use cinema_testing::helpers::standard_screening;
//!
//! let mut screening = standard_screening();
//! assert!(screening.reserve(Seat::new(2, 0), SeatKind::Normal).is_ok());
//! ```

use chrono::{DateTime, Utc};
use cinema_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use cinema_testing::mocks::FixedClock;
    /// use cinema_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that moves forward by a fixed step on every read
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: chrono::Duration,
    }

    impl SteppingClock {
        /// Start at `start`, advancing by `step` after each read
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: chrono::Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = match self.next.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Test helpers and fixtures.
pub mod helpers {
    use super::mocks::test_clock;
    use chrono::{NaiveDate, NaiveTime};
    use cinema::{BookingEnvironment, Layout, Person, Room, Screening, Seat};
    use cinema_core::SequentialIds;
    use std::sync::Arc;

    /// Fixed clock plus a sequence starting at 1
    #[must_use]
    pub fn test_environment() -> BookingEnvironment {
        BookingEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()))
    }

    /// 10 December 2025
    #[must_use]
    pub fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 10).unwrap_or_default()
    }

    /// 20:00
    #[must_use]
    pub fn test_time() -> NaiveTime {
        NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default()
    }

    /// A screening of "Test Movie" on the standard 5x10 layout
    ///
    /// # Panics
    ///
    /// Never in practice: the standard layout and title are always valid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn standard_screening() -> Screening {
        Screening::new("Salle 1", &Layout::default(), test_date(), test_time(), "Test Movie")
            .expect("standard screening should always build")
    }

    /// "Salle 1" with the standard layout
    ///
    /// # Panics
    ///
    /// Never in practice: the name is not blank.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn standard_room() -> Room {
        Room::new("Salle 1").expect("standard room should always build")
    }

    /// A person already bound to `seat`
    #[must_use]
    pub fn seated(first_name: &str, last_name: &str, seat: Seat) -> Person {
        let mut person = Person::new(first_name, last_name);
        person.assign_seat(seat);
        person
    }

    /// Install a test-writer tracing subscriber, once per process
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("cinema=debug")
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use cinema::layout::{DEFAULT_COLS, DEFAULT_ROWS};
    use cinema::{Seat, SeatKind};
    use proptest::prelude::*;

    /// Any of the three seat kinds
    pub fn seat_kind() -> impl Strategy<Value = SeatKind> {
        prop::sample::select(SeatKind::ALL.to_vec())
    }

    /// A seat inside a `rows x cols` grid
    pub fn seat_within(rows: usize, cols: usize) -> impl Strategy<Value = Seat> {
        (0..rows, 0..cols).prop_map(|(row, col)| Seat::new(row, col))
    }

    /// A seat inside the standard layout
    pub fn standard_seat() -> impl Strategy<Value = Seat> {
        seat_within(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// A seat outside the standard layout, including far-away coordinates
    pub fn out_of_bounds_seat() -> impl Strategy<Value = Seat> {
        prop_oneof![
            (DEFAULT_ROWS..usize::MAX, any::<usize>()).prop_map(|(row, col)| Seat::new(row, col)),
            (0..DEFAULT_ROWS, DEFAULT_COLS..usize::MAX).prop_map(|(row, col)| Seat::new(row, col)),
        ]
    }

    /// Raw coordinate components, well-formed or not
    pub fn raw_components() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-3_i64..12, 0..4)
    }
}

// Re-export commonly used items
pub use helpers::{standard_room, standard_screening, test_environment};
pub use mocks::{FixedClock, SteppingClock, test_clock};
