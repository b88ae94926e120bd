//! Cinema Seating Demo
//!
//! Walks through a booking session on the standard layout:
//! - Room and screening setup from configuration
//! - Single-seat reservations of each kind, including refusals
//! - A group booking with one refused guest
//! - Whole-reservation cancellation
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info,cinema=debug cargo run --bin cinema-demo
//! ```

use cinema::screening::{parse_date, parse_time};
use cinema::view::legend_lines;
use cinema::{
    BookingEnvironment, BookingRequest, Cinema, Config, Person, Reservation, Room, Seat, SeatKind,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present, then configuration
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n============================================");
    println!("   Cinema Seating - Demo");
    println!("============================================\n");

    let env = BookingEnvironment::system();
    let mut cinema = Cinema::new("Le Grand Rex")?;
    cinema.add_room(Room::from_config("Salle 1", &config.layout)?)?;

    let room = cinema
        .room_mut("Salle 1")
        .ok_or_else(|| cinema::CinemaError::RoomNotFound("Salle 1".to_string()))?;
    let screening_id = room.schedule(parse_date("10/12/2025")?, parse_time("20h00")?, "Dune")?;
    let screening = room
        .screening_mut(screening_id)
        .ok_or(cinema::CinemaError::ScreeningNotFound(screening_id))?;

    println!("{}\n", screening.summary());
    println!("{}", screening.seat_map());
    for line in legend_lines() {
        println!("  {line}");
    }

    // ========== Single seats ==========

    println!("\n1. Single-seat reservations");
    for (seat, kind) in [
        (Seat::new(2, 0), SeatKind::Normal),
        (Seat::new(2, 0), SeatKind::Normal),
        (Seat::new(0, 0), SeatKind::Double),
        (Seat::new(0, 3), SeatKind::Normal),
        (Seat::new(0, 3), SeatKind::Accessible),
    ] {
        match screening.reserve(seat, kind) {
            Ok(seat) => {
                let mut holder = Person::new("Walk-in", "");
                holder.assign_seat(seat);
                screening.add_reservation(Reservation::new(&env, holder))?;
                println!("   ok      {seat} as {kind}");
            }
            Err(error) => println!("   refused {seat} as {kind}: {error}"),
        }
    }

    // ========== Group booking ==========

    println!("\n2. Group booking");
    let holder = Person::new("Jean", "Dupont");
    let request = BookingRequest::new(holder, Seat::new(3, 3), SeatKind::Normal)
        .with_guest(Person::new("Marie", "Dupont"), Seat::new(3, 4), SeatKind::Normal)
        .with_guest(Person::new("Paul", "Dupont"), Seat::new(3, 2), SeatKind::Normal)
        .with_guest(Person::new("Lea", "Dupont"), Seat::new(1, 3), SeatKind::Double);
    let outcome = screening.book(&env, &config.booking, request)?;
    println!(
        "   reservation #{} confirmed {} seat(s)",
        outcome.reservation_id,
        outcome.confirmed.len()
    );
    for rejected in &outcome.rejected {
        println!("   refused {} at {}: {}", rejected.person, rejected.seat, rejected.error);
    }

    println!("\n{}", screening.seat_map());
    for summary in screening.reservation_summaries() {
        println!("   {summary}");
    }

    // ========== Cancellation ==========

    println!("\n3. Cancelling reservation #{}", outcome.reservation_id);
    let cancelled = screening.cancel_reservation(outcome.reservation_id)?;
    println!("   released {} people", cancelled.people_count());
    println!("\n{}", screening.seat_map());

    println!("History as JSON:");
    println!("{}", serde_json::to_string_pretty(&cinema.reservation_history())?);
    println!(
        "\n{} room(s), {} screening(s), {} active reservation(s)",
        cinema.room_count(),
        cinema.total_screenings(),
        cinema.total_reservations()
    );

    Ok(())
}
