//! The cinema registry: a named set of rooms.

use crate::error::{CinemaError, Result};
use crate::room::Room;
use crate::screening::Screening;
use crate::types::ScreeningId;
use crate::view::ReservationSummary;

/// A cinema and its rooms
///
/// Room names are unique, compared case-insensitively.
#[derive(Clone, Debug)]
pub struct Cinema {
    name: String,
    rooms: Vec<Room>,
}

impl Cinema {
    /// Creates a cinema without rooms.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: non_blank(name.into())?,
            rooms: Vec::new(),
        })
    }

    /// Cinema name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the name.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if the new name is blank.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = non_blank(name.into())?;
        Ok(())
    }

    /// Register a room.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if a room with the same name
    /// (ignoring case) is already registered.
    pub fn add_room(&mut self, room: Room) -> Result<()> {
        if self.room(room.name()).is_some() {
            return Err(CinemaError::invalid(format!(
                "room '{}' already exists",
                room.name()
            )));
        }
        tracing::info!("Cinema {}: room '{}' added", self.name, room.name());
        self.rooms.push(room);
        Ok(())
    }

    /// Register several rooms, stopping at the first duplicate.
    ///
    /// # Errors
    ///
    /// Same as [`Cinema::add_room`]; rooms before the duplicate stay added.
    pub fn add_rooms(&mut self, rooms: impl IntoIterator<Item = Room>) -> Result<()> {
        rooms.into_iter().try_for_each(|room| self.add_room(room))
    }

    /// Unregister a room with its screenings.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::RoomNotFound`] if no room has that name.
    pub fn remove_room(&mut self, name: &str) -> Result<Room> {
        let index = self
            .rooms
            .iter()
            .position(|room| same_name(room.name(), name))
            .ok_or_else(|| CinemaError::RoomNotFound(name.to_string()))?;
        Ok(self.rooms.remove(index))
    }

    /// Room by name, ignoring case
    #[must_use]
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| same_name(room.name(), name))
    }

    /// Mutable room by name, ignoring case
    pub fn room_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| same_name(room.name(), name))
    }

    /// Rooms in registration order
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Screenings across all rooms
    #[must_use]
    pub fn total_screenings(&self) -> usize {
        self.rooms.iter().map(|room| room.screenings().len()).sum()
    }

    /// Active reservations across all rooms
    #[must_use]
    pub fn total_reservations(&self) -> usize {
        self.rooms.iter().map(Room::reservation_count).sum()
    }

    /// Every screening
    pub fn screenings(&self) -> impl Iterator<Item = &Screening> + '_ {
        self.rooms.iter().flat_map(|room| room.screenings().iter())
    }

    /// Screenings whose title contains `query`, ignoring case.
    ///
    /// A blank query matches every screening.
    #[must_use]
    pub fn search_screenings(&self, query: &str) -> Vec<&Screening> {
        let query = query.trim().to_lowercase();
        self.screenings()
            .filter(|screening| screening.movie().to_lowercase().contains(&query))
            .collect()
    }

    /// Screening by id, in any room
    #[must_use]
    pub fn find_screening(&self, id: ScreeningId) -> Option<&Screening> {
        self.rooms.iter().find_map(|room| room.screening(id))
    }

    /// Mutable screening by id, in any room
    pub fn find_screening_mut(&mut self, id: ScreeningId) -> Option<&mut Screening> {
        self.rooms.iter_mut().find_map(|room| room.screening_mut(id))
    }

    /// Active reservations of every screening, oldest first
    #[must_use]
    pub fn reservation_history(&self) -> Vec<ReservationSummary> {
        let mut history: Vec<ReservationSummary> = self
            .screenings()
            .flat_map(Screening::reservation_summaries)
            .collect();
        history.sort_by_key(|summary| (summary.created_at, summary.id));
        history
    }
}

fn non_blank(name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CinemaError::invalid("cinema name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::BookingConfig;
    use crate::environment::BookingEnvironment;
    use crate::person::Person;
    use crate::screening::BookingRequest;
    use crate::types::{Seat, SeatKind};
    use chrono::{NaiveDate, NaiveTime};

    fn cinema() -> Cinema {
        let mut cinema = Cinema::new("Le Grand Rex").unwrap();
        cinema
            .add_rooms([Room::new("Salle 1").unwrap(), Room::new("Salle 2").unwrap()])
            .unwrap();
        cinema
    }

    fn schedule(cinema: &mut Cinema, room: &str, movie: &str) -> ScreeningId {
        cinema
            .room_mut(room)
            .unwrap()
            .schedule(
                NaiveDate::from_ymd_opt(2025, 12, 10).unwrap(),
                NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                movie,
            )
            .unwrap()
    }

    #[test]
    fn duplicate_room_names_are_rejected() {
        let mut cinema = cinema();
        assert!(matches!(
            cinema.add_room(Room::new("SALLE 1").unwrap()),
            Err(CinemaError::InvalidArgument(_))
        ));
        assert_eq!(cinema.room_count(), 2);
    }

    #[test]
    fn rooms_are_found_ignoring_case() {
        let mut cinema = cinema();
        assert!(cinema.room("salle 2").is_some());
        assert_eq!(cinema.remove_room("SALLE 2").unwrap().name(), "Salle 2");
        assert_eq!(
            cinema.remove_room("Salle 2").unwrap_err(),
            CinemaError::RoomNotFound("Salle 2".to_string())
        );
    }

    #[test]
    fn rename_rejects_blank() {
        let mut cinema = cinema();
        assert!(cinema.rename(" ").is_err());
        cinema.rename("Pathé").unwrap();
        assert_eq!(cinema.name(), "Pathé");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut cinema = cinema();
        schedule(&mut cinema, "Salle 1", "Dune: Part Two");
        schedule(&mut cinema, "Salle 2", "Dune");
        schedule(&mut cinema, "Salle 2", "Alien");

        assert_eq!(cinema.search_screenings("dune").len(), 2);
        assert_eq!(cinema.search_screenings("").len(), 3);
        assert!(cinema.search_screenings("matrix").is_empty());
        assert_eq!(cinema.total_screenings(), 3);
    }

    #[test]
    fn totals_and_history_span_rooms() {
        let env = BookingEnvironment::system();
        let mut cinema = cinema();
        let first = schedule(&mut cinema, "Salle 1", "Dune");
        let second = schedule(&mut cinema, "Salle 2", "Alien");

        for (id, seat) in [(second, Seat::new(3, 3)), (first, Seat::new(2, 0))] {
            cinema
                .find_screening_mut(id)
                .unwrap()
                .book(
                    &env,
                    &BookingConfig::default(),
                    BookingRequest::new(Person::new("Jean", "Dupont"), seat, SeatKind::Normal),
                )
                .unwrap();
        }

        assert_eq!(cinema.total_reservations(), 2);
        let history = cinema.reservation_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id.value(), 1);
        assert_eq!(history[0].seats, vec![Seat::new(3, 3)]);
        assert_eq!(cinema.find_screening(first).unwrap().movie(), "Dune");
    }
}
