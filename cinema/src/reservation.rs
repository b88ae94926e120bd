//! Reservations: a holder plus guests, each bound to a seat.

use crate::environment::BookingEnvironment;
use crate::person::Person;
use crate::types::{ReservationId, Seat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booking made by one holder for themselves and zero or more guests
///
/// The reservation owns its people, so a person can belong to at most one
/// reservation at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    holder: Person,
    guests: Vec<Person>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a reservation for `holder`, drawing the next id from the environment
    #[must_use]
    pub fn new(env: &BookingEnvironment, holder: Person) -> Self {
        Self::with_guests(env, holder, Vec::new())
    }

    /// Create a reservation with an existing guest list
    #[must_use]
    pub fn with_guests(env: &BookingEnvironment, holder: Person, guests: Vec<Person>) -> Self {
        Self {
            id: ReservationId::new(env.ids.next_id()),
            holder,
            guests,
            created_at: env.clock.now(),
        }
    }

    /// Reservation number
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// The person who made the booking
    #[must_use]
    pub const fn holder(&self) -> &Person {
        &self.holder
    }

    /// Additional people, in the order they were added
    #[must_use]
    pub fn guests(&self) -> &[Person] {
        &self.guests
    }

    /// When the reservation was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Bind `person` to `seat` and append them as a guest
    pub fn add_guest(&mut self, mut person: Person, seat: Seat) {
        person.assign_seat(seat);
        self.guests.push(person);
    }

    /// Holder first, then guests
    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        std::iter::once(&self.holder).chain(self.guests.iter())
    }

    /// Seats of every seated person, holder first
    #[must_use]
    pub fn seats(&self) -> Vec<Seat> {
        self.people().filter_map(Person::seat).collect()
    }

    /// Whether any person in the reservation is bound to `seat`
    #[must_use]
    pub fn holds_seat(&self, seat: Seat) -> bool {
        self.people().any(|person| person.seat() == Some(seat))
    }

    /// Holder plus guests
    #[must_use]
    pub fn people_count(&self) -> usize {
        1 + self.guests.len()
    }

    /// Seats formatted as `"(2,0), (2,1)"`
    #[must_use]
    pub fn seat_string(&self) -> String {
        self.seats()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Clear every person's seat binding
    pub(crate) fn clear_seats(&mut self) {
        self.holder.clear_seat();
        for guest in &mut self.guests {
            guest.clear_seat();
        }
    }
}
