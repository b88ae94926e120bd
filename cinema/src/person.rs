//! People attending a screening.

use crate::types::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder stored when no first name is given
pub const NO_FIRST_NAME: &str = "No firstname";

/// Placeholder stored when no last name is given
pub const NO_LAST_NAME: &str = "No lastName";

/// A named individual, optionally bound to one seat
///
/// Names are never empty: blank input is normalised to [`NO_FIRST_NAME`] /
/// [`NO_LAST_NAME`] rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    first_name: String,
    last_name: String,
    seat: Option<Seat>,
}

impl Person {
    /// Creates a new unseated `Person`
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: normalize(first_name.into(), NO_FIRST_NAME),
            last_name: normalize(last_name.into(), NO_LAST_NAME),
            seat: None,
        }
    }

    /// First name
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"First Last"`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Seat the person is bound to, if any
    #[must_use]
    pub const fn seat(&self) -> Option<Seat> {
        self.seat
    }

    /// Whether the person is bound to a seat
    #[must_use]
    pub const fn is_seated(&self) -> bool {
        self.seat.is_some()
    }

    /// Bind the person to `seat`, replacing any previous binding
    pub fn assign_seat(&mut self, seat: Seat) {
        self.seat = Some(seat);
    }

    /// Clear the seat binding, returning the previous seat
    pub fn clear_seat(&mut self) -> Option<Seat> {
        self.seat.take()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

fn normalize(name: String, placeholder: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else if trimmed.len() == name.len() {
        name
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_given_names() {
        let person = Person::new("Jean", "Dupont");
        assert_eq!(person.first_name(), "Jean");
        assert_eq!(person.last_name(), "Dupont");
        assert_eq!(person.full_name(), "Jean Dupont");
        assert!(!person.is_seated());
    }

    #[test]
    fn blank_names_become_placeholders() {
        let person = Person::new("", "   ");
        assert_eq!(person.first_name(), NO_FIRST_NAME);
        assert_eq!(person.last_name(), NO_LAST_NAME);
    }

    #[test]
    fn names_are_trimmed() {
        let person = Person::new("  Marie ", "Curie\n");
        assert_eq!(person.full_name(), "Marie Curie");
    }

    #[test]
    fn seat_binding_can_be_replaced_and_cleared() {
        let mut person = Person::new("Jean", "Dupont");
        person.assign_seat(Seat::new(2, 0));
        person.assign_seat(Seat::new(3, 1));
        assert_eq!(person.seat(), Some(Seat::new(3, 1)));
        assert_eq!(person.clear_seat(), Some(Seat::new(3, 1)));
        assert_eq!(person.seat(), None);
    }
}
