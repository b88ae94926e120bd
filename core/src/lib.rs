//! # Cinema Core
//!
//! Injected dependencies for the cinema seating engine.
//!
//! Domain code never reaches for the wall clock or a global counter directly.
//! Both are abstracted behind traits and handed to the engine through an
//! environment value, so production code uses [`SystemClock`] and
//! [`SequentialIds`] while tests swap in deterministic doubles.
//!
//! ## Example
//!
//! ```
//! use cinema_core::environment::{IdGenerator, SequentialIds};
//!
//! let ids = SequentialIds::new();
//! assert_eq!(ids.next_id(), 1);
//! assert_eq!(ids.next_id(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod environment;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use environment::{Clock, IdGenerator, SequentialIds, SystemClock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_are_usable() {
        let ids = SequentialIds::starting_at(10);
        assert_eq!(ids.next_id(), 10);

        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
