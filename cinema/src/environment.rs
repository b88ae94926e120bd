//! Environment dependencies for booking operations.

use cinema_core::environment::{Clock, IdGenerator, SequentialIds, SystemClock};
use std::sync::Arc;

/// Injected clock and reservation-number sequence
///
/// Cloning shares the same clock and sequence, so every screening booked
/// through clones of one environment draws from a single id space.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for reservation timestamps
    pub clock: Arc<dyn Clock>,
    /// Reservation number sequence
    pub ids: Arc<dyn IdGenerator>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and a fresh sequence starting at 1
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(SequentialIds::new()))
    }
}

impl std::fmt::Debug for BookingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEnvironment")
            .field("clock", &"<dyn Clock>")
            .field("ids", &"<dyn IdGenerator>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_sequence() {
        let env = BookingEnvironment::system();
        let clone = env.clone();
        assert_eq!(env.ids.next_id(), 1);
        assert_eq!(clone.ids.next_id(), 2);
    }
}
