//! End-to-end booking scenarios on the standard 5x10 layout.
//!
//! ```text
//!    0 1 2 3 4 5 6 7 8 9
//! 0  D x X P P P P X D x
//! 1  D x X D x D x X D x
//! 2  0 0 X 0 0 0 0 X 0 0
//! 3  0 0 X 0 0 0 0 X 0 0
//! 4  0 0 X 0 0 0 0 X 0 0
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use cinema::{
    BookingConfig, BookingRequest, Cinema, CinemaError, Layout, Person, ReservationId, Room,
    Screening, Seat, SeatClass, SeatKind,
};
use cinema_testing::helpers::{init_tracing, seated, test_date, test_time};
use cinema_testing::{standard_screening, test_environment};

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn reference_scenario_on_default_layout() {
    init_tracing();
    let mut screening = standard_screening();

    // Normal seat, then the same seat again
    assert_eq!(screening.reserve(Seat::new(2, 0), SeatKind::Normal), Ok(Seat::new(2, 0)));
    assert_eq!(
        screening.reserve(Seat::new(2, 0), SeatKind::Normal),
        Err(CinemaError::SeatUnavailable {
            seat: Seat::new(2, 0),
            kind: SeatKind::Normal
        })
    );

    // Double seat occupies both halves
    assert!(screening.reserve(Seat::new(0, 0), SeatKind::Double).is_ok());
    assert_eq!(screening.occupancy().class_at(Seat::new(0, 0)), Some(SeatClass::Occupied));
    assert_eq!(screening.occupancy().class_at(Seat::new(0, 1)), Some(SeatClass::Occupied));

    // Accessible seat refuses a normal booking but takes an accessible one
    assert!(matches!(
        screening.reserve(Seat::new(0, 3), SeatKind::Normal),
        Err(CinemaError::SeatUnavailable { .. })
    ));
    assert!(screening.reserve(Seat::new(0, 3), SeatKind::Accessible).is_ok());

    let map = screening.seat_map();
    assert_eq!(map.codes()[0][..4], ['O', 'O', 'X', 'O']);
    assert_eq!(map.codes()[2][0], 'O');
}

#[test]
fn kinds_only_fit_their_own_class() {
    let mut screening = standard_screening();

    assert!(screening.reserve(Seat::new(2, 0), SeatKind::Accessible).is_err());
    assert!(screening.reserve(Seat::new(0, 3), SeatKind::Double).is_err());
    assert!(screening.reserve(Seat::new(0, 1), SeatKind::Double).is_err());
    assert!(screening.reserve(Seat::new(0, 1), SeatKind::Normal).is_err());
    assert!(screening.reserve(Seat::new(2, 2), SeatKind::Normal).is_err());
    assert_eq!(screening.occupancy().occupied_count(), 0);
}

// ============================================================================
// Whole-reservation cancellation
// ============================================================================

#[test]
fn cancelling_a_mixed_party_restores_every_seat() {
    let env = test_environment();
    let mut screening = standard_screening();
    let pristine = screening.occupancy().snapshot();

    let outcome = screening
        .book(
            &env,
            &BookingConfig::default(),
            BookingRequest::new(Person::new("Jean", "Dupont"), Seat::new(1, 3), SeatKind::Double)
                .with_guest(Person::new("Marie", "Dupont"), Seat::new(0, 4), SeatKind::Accessible)
                .with_guest(Person::new("Paul", "Dupont"), Seat::new(3, 3), SeatKind::Normal),
        )
        .unwrap();
    assert!(outcome.is_complete());
    assert_eq!(screening.occupancy().occupied_count(), 4);

    let cancelled = screening.cancel_reservation(outcome.reservation_id).unwrap();

    assert_eq!(screening.occupancy().snapshot(), pristine);
    assert!(cancelled.people().all(|person| !person.is_seated()));
    assert!(screening.reservations().is_empty());
    assert_eq!(
        screening.cancel_reservation(outcome.reservation_id),
        Err(CinemaError::ReservationNotFound(outcome.reservation_id))
    );
}

#[test]
fn a_double_bound_to_the_anchor_releases_both_halves() {
    let env = test_environment();
    let mut screening = standard_screening();

    screening.reserve(Seat::new(1, 8), SeatKind::Double).unwrap();
    let reservation = cinema::Reservation::new(&env, seated("Jean", "Dupont", Seat::new(1, 8)));
    let id = reservation.id();
    screening.add_reservation(reservation).unwrap();

    screening.cancel_reservation(id).unwrap();
    assert_eq!(screening.occupancy().class_at(Seat::new(1, 8)), Some(SeatClass::PairAnchor));
    assert_eq!(
        screening.occupancy().class_at(Seat::new(1, 9)),
        Some(SeatClass::PairContinuation)
    );
    assert!(screening.reserve(Seat::new(1, 8), SeatKind::Double).is_ok());
}

#[test]
fn reservation_numbers_follow_the_environment_sequence() {
    let env = test_environment();
    let mut screening = standard_screening();
    let config = BookingConfig::default();

    let ids: Vec<ReservationId> = [Seat::new(4, 0), Seat::new(4, 1), Seat::new(4, 3)]
        .into_iter()
        .map(|seat| {
            screening
                .book(
                    &env,
                    &config,
                    BookingRequest::new(Person::new("", ""), seat, SeatKind::Normal),
                )
                .unwrap()
                .reservation_id
        })
        .collect();

    assert_eq!(ids, vec![ReservationId::new(1), ReservationId::new(2), ReservationId::new(3)]);
    let holder = screening.reservation(ids[0]).unwrap().holder();
    assert_eq!(holder.full_name(), "No firstname No lastName");
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn screenings_keep_the_layout_they_were_scheduled_with() {
    let mut cinema = Cinema::new("Le Grand Rex").unwrap();
    cinema.add_room(Room::new("Salle 1").unwrap()).unwrap();

    let room = cinema.room_mut("salle 1").unwrap();
    let before = room.schedule(test_date(), test_time(), "Dune").unwrap();
    let blocked_rows: Vec<Vec<SeatClass>> = room
        .layout()
        .snapshot()
        .to_rows()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|class| if class == SeatClass::Free { SeatClass::Blocked } else { class })
                .collect()
        })
        .collect();
    room.relayout(blocked_rows).unwrap();
    let after = room.schedule(test_date(), test_time(), "Dune").unwrap();

    let seat = Seat::new(3, 0);
    assert!(cinema.find_screening(before).unwrap().is_reservable(seat, SeatKind::Normal));
    assert!(!cinema.find_screening(after).unwrap().is_reservable(seat, SeatKind::Normal));
    assert_eq!(cinema.search_screenings("DUNE").len(), 2);
}

#[test]
fn invalid_layouts_never_reach_a_screening() {
    assert_eq!(
        Layout::from_codes(&["0D0"]),
        Err(CinemaError::InvalidLayout(Seat::new(0, 1)))
    );
    assert_eq!(
        Layout::from_codes(&["0O"]),
        Err(CinemaError::InvalidSeatClass('O'))
    );

    let layout = Layout::from_codes(&["Dx", "00"]).unwrap();
    let screening =
        Screening::new("Salle 9", &layout, test_date(), test_time(), "Alien").unwrap();
    assert_eq!(screening.occupancy().snapshot(), layout.snapshot());
}

#[test]
fn summaries_serialize_to_json() {
    let env = test_environment();
    let mut screening = standard_screening();
    screening
        .book(
            &env,
            &BookingConfig::default(),
            BookingRequest::new(Person::new("Jean", "Dupont"), Seat::new(2, 3), SeatKind::Normal),
        )
        .unwrap();

    let json = serde_json::to_value(screening.reservation_summaries()).unwrap();
    assert_eq!(json[0]["holder"], "Jean Dupont");
    assert_eq!(json[0]["seats"][0]["row"], 2);
    assert_eq!(json[0]["created_at"], "2025-01-01T00:00:00Z");

    let summary = serde_json::to_value(screening.summary()).unwrap();
    assert_eq!(summary["movie"], "Test Movie");
    assert_eq!(summary["occupied_cells"], 1);
}
