//! Screening aggregate: the seat reservation state machine.
//!
//! A [`Screening`] owns a private [`OccupancyMap`] plus an immutable copy of
//! the room layout taken when the screening was created. Every seat cell moves
//! between its reservable class and `Occupied` only through
//! [`Screening::reserve`] and the cancellation operations; there is no held
//! or pending state.
//!
//! ```text
//! Free / Accessible / PairAnchor+Continuation  --reserve-->  Occupied
//!                                              <--cancel---
//! ```
//!
//! Cancellation always restores cells from the layout copy, and the kind of
//! seat being released is derived from that copy rather than trusted from the
//! caller. A double seat is therefore never released as a single seat, which
//! would leave its right half stuck as `Occupied`.

use crate::config::BookingConfig;
use crate::environment::BookingEnvironment;
use crate::error::{CinemaError, Result};
use crate::layout::Layout;
use crate::occupancy::OccupancyMap;
use crate::person::Person;
use crate::reservation::Reservation;
use crate::types::{ReservationId, ScreeningId, Seat, SeatKind};
use crate::view::{ReservationSummary, ScreeningSummary, SeatMapView};
use chrono::{NaiveDate, NaiveTime};

// ============================================================================
// Group booking requests
// ============================================================================

/// One extra person in a group booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestRequest {
    /// Who is coming
    pub person: Person,
    /// Requested seat
    pub seat: Seat,
    /// Requested kind
    pub kind: SeatKind,
}

/// A holder's seat plus the seats requested for their guests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    /// The person making the booking
    pub holder: Person,
    /// Holder's seat
    pub seat: Seat,
    /// Holder's seat kind
    pub kind: SeatKind,
    /// Guests, booked in order
    pub guests: Vec<GuestRequest>,
}

impl BookingRequest {
    /// Creates a request for the holder alone
    #[must_use]
    pub const fn new(holder: Person, seat: Seat, kind: SeatKind) -> Self {
        Self {
            holder,
            seat,
            kind,
            guests: Vec::new(),
        }
    }

    /// Adds a guest to the request
    #[must_use]
    pub fn with_guest(mut self, person: Person, seat: Seat, kind: SeatKind) -> Self {
        self.guests.push(GuestRequest { person, seat, kind });
        self
    }

    /// Holder plus guests
    #[must_use]
    pub fn party_size(&self) -> usize {
        1 + self.guests.len()
    }
}

/// A guest whose seat could not be booked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedGuest {
    /// The guest, still unseated
    pub person: Person,
    /// Seat that was requested
    pub seat: Seat,
    /// Kind that was requested
    pub kind: SeatKind,
    /// Why the seat was refused
    pub error: CinemaError,
}

/// Result of a group booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingOutcome {
    /// Number of the attached reservation
    pub reservation_id: ReservationId,
    /// Seats now held by the reservation, holder first
    pub confirmed: Vec<Seat>,
    /// Guests left out of the reservation
    pub rejected: Vec<RejectedGuest>,
}

impl BookingOutcome {
    /// Whether every requested seat was booked
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

// ============================================================================
// Screening
// ============================================================================

/// One showing of a movie in a room
#[derive(Clone, Debug)]
pub struct Screening {
    id: ScreeningId,
    room: String,
    date: NaiveDate,
    time: NaiveTime,
    movie: String,
    template: Layout,
    occupancy: OccupancyMap,
    reservations: Vec<Reservation>,
}

impl Screening {
    /// Create a screening of `movie` in `room`, copying `layout`.
    ///
    /// # Errors
    ///
    /// - [`CinemaError::InvalidArgument`] if the movie title is blank
    /// - [`CinemaError::InvalidLayout`] if `layout` breaks the pairing invariant
    pub fn new(
        room: impl Into<String>,
        layout: &Layout,
        date: NaiveDate,
        time: NaiveTime,
        movie: impl Into<String>,
    ) -> Result<Self> {
        let movie = movie.into().trim().to_string();
        if movie.is_empty() {
            return Err(CinemaError::invalid("movie title cannot be empty"));
        }
        layout.check()?;

        let screening = Self {
            id: ScreeningId::new(),
            room: room.into(),
            date,
            time,
            movie,
            template: layout.clone(),
            occupancy: OccupancyMap::from_layout(layout),
            reservations: Vec::new(),
        };
        tracing::info!(
            "Screening {} scheduled: '{}' in {} on {} at {}",
            screening.id,
            screening.movie,
            screening.room,
            screening.date,
            screening.time.format("%H:%M")
        );
        Ok(screening)
    }

    /// Screening identifier
    #[must_use]
    pub const fn id(&self) -> ScreeningId {
        self.id
    }

    /// Name of the room showing the movie
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Day of the screening
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Start time
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Movie title
    #[must_use]
    pub fn movie(&self) -> &str {
        &self.movie
    }

    /// Layout copy used as the rollback source
    #[must_use]
    pub const fn template(&self) -> &Layout {
        &self.template
    }

    /// Live seat state
    #[must_use]
    pub const fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Active reservations, oldest first
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Active reservation with the given number
    #[must_use]
    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|reservation| reservation.id() == id)
    }

    /// Whether `seat` can be reserved as `kind` right now
    #[must_use]
    pub fn is_reservable(&self, seat: Seat, kind: SeatKind) -> bool {
        self.occupancy.is_reservable(seat, kind)
    }

    // ========== Seat transitions ==========

    /// Occupy `seat` as `kind`.
    ///
    /// This only flips map state; binding the seat to a person and attaching
    /// a reservation is up to the caller (or use [`Screening::book`]).
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::SeatUnavailable`] if the seat is out of bounds,
    /// already occupied, or of a different class than `kind` requires.
    pub fn reserve(&mut self, seat: Seat, kind: SeatKind) -> Result<Seat> {
        if !self.occupancy.is_reservable(seat, kind) {
            tracing::debug!("Screening {}: seat {seat} unavailable as {kind}", self.id);
            return Err(CinemaError::SeatUnavailable { seat, kind });
        }
        self.occupancy.apply(seat, kind);
        tracing::debug!("Screening {}: seat {seat} reserved as {kind}", self.id);
        Ok(seat)
    }

    /// Occupy a seat given as untyped coordinate components.
    ///
    /// # Errors
    ///
    /// [`CinemaError::InvalidSeatCoordinate`] unless `components` is exactly
    /// two non-negative integers, then the errors of [`Screening::reserve`].
    pub fn reserve_raw(&mut self, components: &[i64], kind: SeatKind) -> Result<Seat> {
        let seat = Seat::from_components(components)?;
        self.reserve(seat, kind)
    }

    /// Release a single seat back to its layout class.
    ///
    /// Low-level primitive: it does not touch reservations or seat bindings.
    /// Use [`Screening::cancel_reservation`] to cancel a booking.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::SeatNotOccupied`] if the seat (both halves for a
    /// double) is not currently occupied.
    pub fn cancel_seat(&mut self, seat: Seat, kind: SeatKind) -> Result<()> {
        if !self.occupancy.is_releasable(seat, kind) {
            return Err(CinemaError::SeatNotOccupied { seat, kind });
        }
        self.occupancy.release(seat, kind, &self.template);
        tracing::debug!("Screening {}: seat {seat} released as {kind}", self.id);
        Ok(())
    }

    /// Cancel a whole reservation.
    ///
    /// Every bound seat is released as the kind its layout class implies,
    /// every person's seat binding is cleared, and the reservation is
    /// detached and handed back. Seats are all checked before any is
    /// released, so a failure leaves the screening untouched.
    ///
    /// # Errors
    ///
    /// - [`CinemaError::ReservationNotFound`] if `id` is not attached here
    /// - [`CinemaError::InvalidArgument`] if a bound seat is not a bookable
    ///   layout cell
    /// - [`CinemaError::SeatNotOccupied`] if a bound seat is not occupied
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<Reservation> {
        let index = self
            .position(id)
            .ok_or(CinemaError::ReservationNotFound(id))?;

        let mut releases: Vec<(Seat, SeatKind)> = Vec::new();
        for seat in self.reservations[index].seats() {
            if releases.iter().any(|(released, _)| *released == seat) {
                continue;
            }
            let kind = self
                .template
                .class_at(seat)
                .and_then(SeatKind::for_class)
                .ok_or_else(|| {
                    CinemaError::invalid(format!("seat {seat} is not a bookable seat"))
                })?;
            if !self.occupancy.is_releasable(seat, kind) {
                return Err(CinemaError::SeatNotOccupied { seat, kind });
            }
            releases.push((seat, kind));
        }

        for (seat, kind) in releases {
            self.cancel_seat(seat, kind)?;
        }

        let mut reservation = self.reservations.remove(index);
        reservation.clear_seats();
        tracing::info!(
            "Screening {}: reservation #{} cancelled ({} people)",
            self.id,
            id,
            reservation.people_count()
        );
        Ok(reservation)
    }

    // ========== Reservation bookkeeping ==========

    /// Attach a reservation without touching the seat map.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if a reservation with the same
    /// number is already attached.
    pub fn add_reservation(&mut self, reservation: Reservation) -> Result<()> {
        if self.position(reservation.id()).is_some() {
            return Err(CinemaError::invalid(format!(
                "reservation #{} is already attached",
                reservation.id()
            )));
        }
        self.reservations.push(reservation);
        Ok(())
    }

    /// Detach a reservation without touching the seat map
    pub fn remove_reservation(&mut self, id: ReservationId) -> Option<Reservation> {
        self.position(id).map(|index| self.reservations.remove(index))
    }

    /// First active reservation holding `seat`
    #[must_use]
    pub fn find_reservation_by_seat(&self, seat: Seat) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|reservation| reservation.holds_seat(seat))
    }

    // ========== Group booking ==========

    /// Book seats for a holder and their guests, then attach the reservation.
    ///
    /// The holder's seat is reserved first; if that fails nothing changes.
    /// Each guest seat is then tried in order. A refused guest seat is
    /// reported in [`BookingOutcome::rejected`] and does not undo seats
    /// already confirmed for the holder or earlier guests.
    ///
    /// # Errors
    ///
    /// - [`CinemaError::InvalidArgument`] if the party exceeds
    ///   `config.max_party_size` (0 means unlimited), or if the environment
    ///   hands out a reservation number already attached here; in the
    ///   latter case the seats taken by this call are released again
    /// - the errors of [`Screening::reserve`] for the holder's seat
    pub fn book(
        &mut self,
        env: &BookingEnvironment,
        config: &BookingConfig,
        request: BookingRequest,
    ) -> Result<BookingOutcome> {
        let party = request.party_size();
        if config.max_party_size > 0 && party > config.max_party_size {
            return Err(CinemaError::invalid(format!(
                "cannot book more than {} people at once (requested: {party})",
                config.max_party_size
            )));
        }

        let BookingRequest {
            mut holder,
            seat,
            kind,
            guests,
        } = request;

        let seat = self.reserve(seat, kind)?;
        holder.assign_seat(seat);

        let mut reservation = Reservation::new(env, holder);
        let mut taken = vec![(seat, kind)];
        let mut rejected = Vec::new();

        for guest in guests {
            match self.reserve(guest.seat, guest.kind) {
                Ok(seat) => {
                    reservation.add_guest(guest.person, seat);
                    taken.push((seat, guest.kind));
                }
                Err(error) => {
                    tracing::warn!(
                        "Screening {}: seat {} refused for {}: {error}",
                        self.id,
                        guest.seat,
                        guest.person
                    );
                    rejected.push(RejectedGuest {
                        person: guest.person,
                        seat: guest.seat,
                        kind: guest.kind,
                        error,
                    });
                }
            }
        }

        let reservation_id = reservation.id();
        if let Err(error) = self.add_reservation(reservation) {
            for (seat, kind) in &taken {
                self.occupancy.release(*seat, *kind, &self.template);
            }
            return Err(error);
        }

        tracing::info!(
            "Screening {}: reservation #{reservation_id} booked ({} seats, {} refused)",
            self.id,
            taken.len(),
            rejected.len()
        );

        Ok(BookingOutcome {
            reservation_id,
            confirmed: taken.into_iter().map(|(seat, _)| seat).collect(),
            rejected,
        })
    }

    // ========== Views ==========

    /// Read-only seat map for display
    #[must_use]
    pub fn seat_map(&self) -> SeatMapView {
        SeatMapView::from_grid(&self.occupancy.snapshot())
    }

    /// Summaries of the active reservations
    #[must_use]
    pub fn reservation_summaries(&self) -> Vec<ReservationSummary> {
        self.reservations.iter().map(ReservationSummary::from).collect()
    }

    /// Headline information about this screening
    #[must_use]
    pub fn summary(&self) -> ScreeningSummary {
        ScreeningSummary {
            id: self.id,
            movie: self.movie.clone(),
            room: self.room.clone(),
            date: self.date,
            time: self.time,
            reservations: self.reservations.len(),
            occupied_cells: self.occupancy.occupied_count(),
        }
    }

    fn position(&self, id: ReservationId) -> Option<usize> {
        self.reservations
            .iter()
            .position(|reservation| reservation.id() == id)
    }
}

// ============================================================================
// Showtime parsing
// ============================================================================

/// Parse a screening date written `10/12/2025` (day first) or `2025-12-10`.
///
/// # Errors
///
/// Returns [`CinemaError::InvalidArgument`] for any other shape.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    ["%d/%m/%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .ok_or_else(|| CinemaError::invalid(format!("unrecognised date {input:?}")))
}

/// Parse a start time written `18h15`, `18h` or `18:15`.
///
/// # Errors
///
/// Returns [`CinemaError::InvalidArgument`] for any other shape.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    let normalized = if input.ends_with(['h', 'H']) {
        format!("{input}00")
    } else {
        input.to_string()
    };
    ["%Hh%M", "%HH%M", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| CinemaError::invalid(format!("unrecognised time {input:?}")))
}
