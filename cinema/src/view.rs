//! Read-only views handed to presentation code.
//!
//! Everything here is an owned copy; mutating a view never reaches the
//! screening it was taken from.

use crate::person::Person;
use crate::reservation::Reservation;
use crate::types::{Grid, ReservationId, ScreeningId, Seat, SeatClass};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat classes in the order a legend lists them
pub const LEGEND: [SeatClass; 6] = [
    SeatClass::Free,
    SeatClass::Occupied,
    SeatClass::Blocked,
    SeatClass::Accessible,
    SeatClass::PairAnchor,
    SeatClass::PairContinuation,
];

/// Legend lines, e.g. `"0 = Free"`
#[must_use]
pub fn legend_lines() -> Vec<String> {
    LEGEND
        .iter()
        .map(|class| format!("{} = {}", class.code(), class.label()))
        .collect()
}

/// Display codes of a screening's seats
///
/// `Display` renders a column header followed by one labelled line per row:
///
/// ```text
///    0 1 2
/// 0  D x X
/// 1  0 O X
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMapView {
    codes: Vec<Vec<char>>,
}

impl SeatMapView {
    /// Copy the codes of `grid`
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            codes: grid.codes(),
        }
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.codes.len()
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.codes.first().map_or(0, Vec::len)
    }

    /// Code of one cell, `None` when out of bounds
    #[must_use]
    pub fn code_at(&self, seat: Seat) -> Option<char> {
        self.codes.get(seat.row)?.get(seat.col).copied()
    }

    /// All codes, row-major
    #[must_use]
    pub fn codes(&self) -> &[Vec<char>] {
        &self.codes
    }
}

impl fmt::Display for SeatMapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.rows().saturating_sub(1).to_string().len();
        let cell_width = self.cols().saturating_sub(1).to_string().len();

        write!(f, "{:label_width$} ", "")?;
        for col in 0..self.cols() {
            write!(f, " {col:>cell_width$}")?;
        }
        writeln!(f)?;

        for (row, codes) in self.codes.iter().enumerate() {
            write!(f, "{row:>label_width$} ")?;
            for code in codes {
                write!(f, " {code:>cell_width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One reservation as shown to a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSummary {
    /// Reservation number
    pub id: ReservationId,
    /// Holder's full name
    pub holder: String,
    /// Guests' full names
    pub guests: Vec<String>,
    /// Bound seats, holder first
    pub seats: Vec<Seat>,
    /// Holder plus guests
    pub people: usize,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Reservation> for ReservationSummary {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id(),
            holder: reservation.holder().full_name(),
            guests: reservation.guests().iter().map(Person::full_name).collect(),
            seats: reservation.seats(),
            people: reservation.people_count(),
            created_at: reservation.created_at(),
        }
    }
}

impl fmt::Display for ReservationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seats: Vec<String> = self.seats.iter().map(ToString::to_string).collect();
        write!(
            f,
            "#{} {} ({} people) seats: {}",
            self.id,
            self.holder,
            self.people,
            seats.join(", ")
        )
    }
}

/// Headline information about a screening
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    /// Screening identifier
    pub id: ScreeningId,
    /// Movie title
    pub movie: String,
    /// Room name
    pub room: String,
    /// Day
    pub date: NaiveDate,
    /// Start time
    pub time: NaiveTime,
    /// Active reservations
    pub reservations: usize,
    /// Cells currently `Occupied` (a double seat counts twice)
    pub occupied_cells: usize,
}

impl fmt::Display for ScreeningSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} {} | {} | {} reservation(s)",
            self.movie,
            self.date.format("%d/%m/%Y"),
            self.time.format("%Hh%M"),
            self.room,
            self.reservations
        )
    }
}
