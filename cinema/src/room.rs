//! Rooms: a named layout plus the screenings scheduled in it.

use crate::config::LayoutConfig;
use crate::error::{CinemaError, Result};
use crate::layout::Layout;
use crate::screening::Screening;
use crate::types::{ScreeningId, Seat, SeatClass};
use chrono::{NaiveDate, NaiveTime};

/// A projection room
///
/// Editing the layout only affects screenings scheduled afterwards; each
/// screening keeps the copy it was created with.
#[derive(Clone, Debug)]
pub struct Room {
    name: String,
    layout: Layout,
    screenings: Vec<Screening>,
}

impl Room {
    /// Room with the standard 5x10 layout.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_layout(name, Layout::default())
    }

    /// Room with the standard layout at the configured dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if the name is blank or the
    /// dimensions are zero or too large.
    pub fn from_config(name: impl Into<String>, config: &LayoutConfig) -> Result<Self> {
        Self::with_layout(name, Layout::build(config.rows, config.cols)?)
    }

    /// Room with a custom layout.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if the name is blank, or
    /// [`CinemaError::InvalidLayout`] if a double seat is left unpaired.
    pub fn with_layout(name: impl Into<String>, layout: Layout) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CinemaError::invalid("room name cannot be empty"));
        }
        layout.check()?;
        Ok(Self {
            name,
            layout,
            screenings: Vec::new(),
        })
    }

    /// Room name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current layout template
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Change one layout cell.
    ///
    /// # Errors
    ///
    /// Same as [`Layout::set_cell`]; the layout is unchanged on error.
    pub fn set_seat_class(&mut self, seat: Seat, class: SeatClass) -> Result<()> {
        self.layout.set_cell(seat, class)
    }

    /// Replace the whole layout with same-sized rows.
    ///
    /// # Errors
    ///
    /// Same as [`Layout::relayout`]; the layout is unchanged on error.
    pub fn relayout(&mut self, rows: Vec<Vec<SeatClass>>) -> Result<()> {
        self.layout.relayout(rows)
    }

    /// Schedule a screening using a copy of the current layout.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if the movie title is blank.
    pub fn schedule(
        &mut self,
        date: NaiveDate,
        time: NaiveTime,
        movie: impl Into<String>,
    ) -> Result<ScreeningId> {
        let screening = Screening::new(self.name.clone(), &self.layout, date, time, movie)?;
        let id = screening.id();
        self.screenings.push(screening);
        Ok(id)
    }

    /// Scheduled screenings, in scheduling order
    #[must_use]
    pub fn screenings(&self) -> &[Screening] {
        &self.screenings
    }

    /// Screening by id
    #[must_use]
    pub fn screening(&self, id: ScreeningId) -> Option<&Screening> {
        self.screenings.iter().find(|screening| screening.id() == id)
    }

    /// Mutable screening by id
    pub fn screening_mut(&mut self, id: ScreeningId) -> Option<&mut Screening> {
        self.screenings
            .iter_mut()
            .find(|screening| screening.id() == id)
    }

    /// Remove a screening along with its reservations.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::ScreeningNotFound`] if `id` is not scheduled here.
    pub fn cancel_screening(&mut self, id: ScreeningId) -> Result<Screening> {
        let index = self
            .screenings
            .iter()
            .position(|screening| screening.id() == id)
            .ok_or(CinemaError::ScreeningNotFound(id))?;
        let screening = self.screenings.remove(index);
        tracing::info!(
            "Room {}: screening {} of '{}' cancelled ({} reservations dropped)",
            self.name,
            id,
            screening.movie(),
            screening.reservations().len()
        );
        Ok(screening)
    }

    /// Active reservations across every screening
    #[must_use]
    pub fn reservation_count(&self) -> usize {
        self.screenings
            .iter()
            .map(|screening| screening.reservations().len())
            .sum()
    }
}
