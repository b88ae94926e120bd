//! Error types for the seating engine.
//!
//! Every fallible operation returns [`Result`], whose error is a single
//! [`CinemaError`] enum. Boolean queries (`is_reservable`, `is_releasable`,
//! `validate`) stay boolean; everything that mutates or constructs reports a
//! typed failure.

use crate::types::{ReservationId, Seat, SeatKind, ScreeningId};
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CinemaError>;

/// Errors that can occur while building layouts or booking seats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CinemaError {
    /// A required field was empty or a literal could not be recognised.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Raw coordinate input did not consist of exactly two non-negative integers.
    #[error("Invalid seat coordinate: {0}")]
    InvalidSeatCoordinate(String),

    /// A seat class outside the five static layout classes.
    #[error("Invalid seat class: {0:?}")]
    InvalidSeatClass(char),

    /// Coordinate outside the grid bounds.
    #[error("Seat {seat} is outside the {rows}x{cols} grid")]
    OutOfRange {
        /// The offending coordinate.
        seat: Seat,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },

    /// A replacement grid does not match the current dimensions.
    #[error("Layout dimensions {actual_rows}x{actual_cols} do not match {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        /// Current height.
        expected_rows: usize,
        /// Current width.
        expected_cols: usize,
        /// Height of the rejected grid.
        actual_rows: usize,
        /// Width of the rejected grid.
        actual_cols: usize,
    },

    /// Pairing invariant broken: a double-seat anchor without its continuation.
    #[error("Invalid layout: double seat at {0} is not followed by its continuation")]
    InvalidLayout(Seat),

    /// Reservation preconditions failed for the requested seat and kind.
    #[error("Seat {seat} is not available as {kind}")]
    SeatUnavailable {
        /// Requested coordinate.
        seat: Seat,
        /// Requested kind.
        kind: SeatKind,
    },

    /// Cancellation preconditions failed: the seat is not occupied.
    #[error("Seat {seat} is not occupied as {kind}")]
    SeatNotOccupied {
        /// Requested coordinate.
        seat: Seat,
        /// Kind the release was attempted as.
        kind: SeatKind,
    },

    /// Reservation is not attached to the screening.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    /// No room with the given name.
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// No screening with the given id.
    #[error("Screening not found: {0}")]
    ScreeningNotFound(ScreeningId),
}

impl CinemaError {
    /// Shorthand for [`CinemaError::InvalidArgument`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
