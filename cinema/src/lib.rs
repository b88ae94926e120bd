//! # Cinema
//!
//! Seat allocation engine for cinema screenings.
//!
//! A [`Room`] owns a [`Layout`], the seating template made of free seats,
//! aisles, accessible seats and double seats. Scheduling a screening copies
//! that layout into a per-screening [`OccupancyMap`]; reservations then move
//! individual cells between their reservable class and `Occupied`.
//!
//! ## Quick Start
//!
//! ```
//! use cinema::{BookingConfig, BookingEnvironment, BookingRequest, Person, Room, Seat, SeatKind};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! # fn main() -> cinema::Result<()> {
//! let env = BookingEnvironment::system();
//! let mut room = Room::new("Salle 1")?;
//! let id = room.schedule(
//!     NaiveDate::from_ymd_opt(2025, 12, 10).unwrap_or_default(),
//!     NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
//!     "Dune",
//! )?;
//!
//! let screening = room.screening_mut(id).ok_or(cinema::CinemaError::ScreeningNotFound(id))?;
//! let outcome = screening.book(
//!     &env,
//!     &BookingConfig::default(),
//!     BookingRequest::new(Person::new("Jean", "Dupont"), Seat::new(0, 0), SeatKind::Double),
//! )?;
//!
//! assert!(outcome.is_complete());
//! assert_eq!(screening.seat_map().code_at(Seat::new(0, 1)), Some('O'));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: seats, seat classes and kinds, grids, identifiers
//! - [`layout`] / [`builder`]: seating templates and generators
//! - [`occupancy`] / [`screening`]: live seat state and the reservation flow
//! - [`room`] / [`cinema`]: the registry around screenings
//! - [`view`]: read-only data for presentation
//! - [`config`] / [`environment`]: configuration and injected dependencies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod cinema;
pub mod config;
pub mod environment;
pub mod error;
pub mod layout;
pub mod occupancy;
pub mod person;
pub mod reservation;
pub mod room;
pub mod screening;
pub mod types;
pub mod view;

pub use builder::LayoutBuilder;
pub use cinema::Cinema;
pub use config::{BookingConfig, Config, LayoutConfig};
pub use environment::BookingEnvironment;
pub use error::{CinemaError, Result};
pub use layout::{Capacity, Layout};
pub use occupancy::OccupancyMap;
pub use person::Person;
pub use reservation::Reservation;
pub use room::Room;
pub use screening::{BookingOutcome, BookingRequest, GuestRequest, RejectedGuest, Screening};
pub use types::{Grid, ReservationId, ScreeningId, Seat, SeatClass, SeatKind};
pub use view::{ReservationSummary, ScreeningSummary, SeatMapView, LEGEND};
