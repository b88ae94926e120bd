//! Domain value types for the seating engine.
//!
//! Coordinates, seat classes, seat kinds, identifiers and the rectangular
//! [`Grid`] shared by layouts and occupancy maps.

use crate::error::{CinemaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Reservation number, assigned from an injected sequence starting at 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReservationId(u64);

impl ReservationId {
    /// Wrap a raw reservation number
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw reservation number
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a screening
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreeningId(Uuid);

impl ScreeningId {
    /// Creates a new random `ScreeningId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `ScreeningId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ScreeningId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScreeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Seat coordinates
// ============================================================================

/// A `(row, col)` position in a seating grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat {
    /// Zero-based row, front of the room first
    pub row: usize,
    /// Zero-based column, left to right
    pub col: usize,
}

impl Seat {
    /// Creates a new `Seat`
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The seat immediately to the right, if the column does not overflow
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.col.checked_add(1).map(|col| Self::new(self.row, col))
    }

    /// Build a seat from untyped coordinate components.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidSeatCoordinate`] unless `components` holds
    /// exactly two non-negative integers.
    pub fn from_components(components: &[i64]) -> Result<Self> {
        let [row, col] = components else {
            return Err(CinemaError::InvalidSeatCoordinate(format!(
                "expected 2 components, got {}",
                components.len()
            )));
        };

        let to_index = |value: i64| {
            usize::try_from(value).map_err(|_| {
                CinemaError::InvalidSeatCoordinate(format!("negative component {value}"))
            })
        };

        Ok(Self::new(to_index(*row)?, to_index(*col)?))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Seat {
    type Err = CinemaError;

    /// Parses `"row,col"`, tolerating surrounding parentheses and whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let components = trimmed
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<i64>()
                    .map_err(|_| CinemaError::InvalidSeatCoordinate(s.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_components(&components)
    }
}

// ============================================================================
// Seat classes and kinds
// ============================================================================

/// Category of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    /// Ordinary free seat (`0`)
    Free,
    /// Aisle or non-existent position (`X`)
    Blocked,
    /// Accessible (PMR) seat (`P`)
    Accessible,
    /// Left half of a double seat (`D`)
    PairAnchor,
    /// Right half of a double seat, never reserved directly (`x`)
    PairContinuation,
    /// Taken for a screening (`O`); never part of a layout
    Occupied,
}

impl SeatClass {
    /// The five classes a layout may contain
    pub const STATIC: [Self; 5] = [
        Self::Free,
        Self::Blocked,
        Self::Accessible,
        Self::PairAnchor,
        Self::PairContinuation,
    ];

    /// Single-character display code
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Free => '0',
            Self::Blocked => 'X',
            Self::Accessible => 'P',
            Self::PairAnchor => 'D',
            Self::PairContinuation => 'x',
            Self::Occupied => 'O',
        }
    }

    /// Parse a display code.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidSeatClass`] for unknown characters.
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            '0' => Ok(Self::Free),
            'X' => Ok(Self::Blocked),
            'P' => Ok(Self::Accessible),
            'D' => Ok(Self::PairAnchor),
            'x' => Ok(Self::PairContinuation),
            'O' => Ok(Self::Occupied),
            other => Err(CinemaError::InvalidSeatClass(other)),
        }
    }

    /// Whether the class may appear in a layout
    #[must_use]
    pub const fn is_static(self) -> bool {
        !matches!(self, Self::Occupied)
    }

    /// Human-readable legend entry
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Blocked => "Aisle / no seat",
            Self::Accessible => "Accessible (PMR)",
            Self::PairAnchor => "Double seat",
            Self::PairContinuation => "Double seat continuation",
            Self::Occupied => "Occupied",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind of seat a booking asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatKind {
    /// A `Free` seat
    Normal,
    /// An `Accessible` seat
    Accessible,
    /// A `PairAnchor` and its `PairContinuation`
    Double,
}

impl SeatKind {
    /// All kinds, in menu order
    pub const ALL: [Self; 3] = [Self::Normal, Self::Accessible, Self::Double];

    /// Kind a layout cell is booked as, if it is bookable at all
    #[must_use]
    pub const fn for_class(class: SeatClass) -> Option<Self> {
        match class {
            SeatClass::Free => Some(Self::Normal),
            SeatClass::Accessible => Some(Self::Accessible),
            SeatClass::PairAnchor => Some(Self::Double),
            SeatClass::Blocked | SeatClass::PairContinuation | SeatClass::Occupied => None,
        }
    }

    /// Class the anchor cell must have for this kind to be reservable
    #[must_use]
    pub const fn required_class(self) -> SeatClass {
        match self {
            Self::Normal => SeatClass::Free,
            Self::Accessible => SeatClass::Accessible,
            Self::Double => SeatClass::PairAnchor,
        }
    }

    /// Number of grid cells a booking of this kind covers
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Normal | Self::Accessible => 1,
            Self::Double => 2,
        }
    }

    /// Literal used at the presentation boundary
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Accessible => "PMR",
            Self::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for SeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for SeatKind {
    type Err = CinemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "PMR" => Ok(Self::Accessible),
            "DOUBLE" => Ok(Self::Double),
            _ => Err(CinemaError::invalid(format!(
                "unknown seat kind {s:?}, expected NORMAL, PMR or DOUBLE"
            ))),
        }
    }
}

// ============================================================================
// Grid
// ============================================================================

/// Largest number of cells a grid may hold
pub const MAX_CELLS: usize = 1 << 20;

/// Rectangular, row-major grid of seat classes
///
/// `Grid` is a plain value: cloning it is a deep copy, and nothing hands out
/// mutable access to a grid owned by a layout or occupancy map. It
/// serializes as nested rows and deserializes through [`Grid::from_rows`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<SeatClass>>", into = "Vec<Vec<SeatClass>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<SeatClass>,
}

impl Grid {
    /// Number of cells in a `rows x cols` grid.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if a dimension is zero or the
    /// area exceeds [`MAX_CELLS`].
    pub fn area(rows: usize, cols: usize) -> Result<usize> {
        if rows == 0 || cols == 0 {
            return Err(CinemaError::invalid(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }
        rows.checked_mul(cols)
            .filter(|area| *area <= MAX_CELLS)
            .ok_or_else(|| {
                CinemaError::invalid(format!(
                    "grid of {rows}x{cols} exceeds {MAX_CELLS} cells"
                ))
            })
    }

    /// A `rows x cols` grid with every cell set to `class`.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::area`].
    pub fn filled(rows: usize, cols: usize, class: SeatClass) -> Result<Self> {
        Self::area(rows, cols)?;
        Ok(Self::filled_unchecked(rows, cols, class))
    }

    /// [`Grid::filled`] for dimensions already known to be in range.
    pub(crate) fn filled_unchecked(rows: usize, cols: usize, class: SeatClass) -> Self {
        Self {
            rows,
            cols,
            cells: vec![class; rows * cols],
        }
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if there are no rows, no
    /// columns, more than [`MAX_CELLS`] cells, or rows of different lengths.
    pub fn from_rows(rows: Vec<Vec<SeatClass>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        Self::area(height, width)?;
        if let Some(index) = rows.iter().position(|row| row.len() != width) {
            return Err(CinemaError::invalid(format!(
                "row {index} has {} cells, expected {width}",
                rows[index].len()
            )));
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `seat` lies inside the grid
    #[must_use]
    pub const fn contains(&self, seat: Seat) -> bool {
        seat.row < self.rows && seat.col < self.cols
    }

    /// Class at `seat`, or `None` when out of bounds
    #[must_use]
    pub fn get(&self, seat: Seat) -> Option<SeatClass> {
        self.index_of(seat).map(|index| self.cells[index])
    }

    /// Iterate over rows, front first
    pub fn iter_rows(&self) -> impl Iterator<Item = &[SeatClass]> + '_ {
        self.cells.chunks(self.cols.max(1))
    }

    /// Iterate over every `(seat, class)` pair in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Seat, SeatClass)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, class)| (Seat::new(index / cols, index % cols), *class))
    }

    /// Nested copy of the cells
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<SeatClass>> {
        self.iter_rows().map(<[SeatClass]>::to_vec).collect()
    }

    /// Nested copy of the display codes
    #[must_use]
    pub fn codes(&self) -> Vec<Vec<char>> {
        self.iter_rows()
            .map(|row| row.iter().map(|class| class.code()).collect())
            .collect()
    }

    /// Number of cells holding `class`
    #[must_use]
    pub fn count(&self, class: SeatClass) -> usize {
        self.cells.iter().filter(|cell| **cell == class).count()
    }

    /// Overwrite a cell, returning the previous class; `None` when out of bounds
    pub(crate) fn set(&mut self, seat: Seat, class: SeatClass) -> Option<SeatClass> {
        let index = self.index_of(seat)?;
        Some(std::mem::replace(&mut self.cells[index], class))
    }

    const fn index_of(&self, seat: Seat) -> Option<usize> {
        if self.contains(seat) {
            Some(seat.row * self.cols + seat.col)
        } else {
            None
        }
    }
}

impl TryFrom<Vec<Vec<SeatClass>>> for Grid {
    type Error = CinemaError;

    fn try_from(rows: Vec<Vec<SeatClass>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<SeatClass>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn seat_from_components_requires_two_values() {
        assert_eq!(Seat::from_components(&[2, 3]).unwrap(), Seat::new(2, 3));
        assert!(matches!(
            Seat::from_components(&[1]),
            Err(CinemaError::InvalidSeatCoordinate(_))
        ));
        assert!(matches!(
            Seat::from_components(&[1, 2, 3]),
            Err(CinemaError::InvalidSeatCoordinate(_))
        ));
        assert!(matches!(
            Seat::from_components(&[-1, 2]),
            Err(CinemaError::InvalidSeatCoordinate(_))
        ));
    }

    #[test]
    fn seat_parses_from_text() {
        assert_eq!("2,0".parse::<Seat>().unwrap(), Seat::new(2, 0));
        assert_eq!(" (4, 7) ".parse::<Seat>().unwrap(), Seat::new(4, 7));
        assert!("4".parse::<Seat>().is_err());
        assert!("a,b".parse::<Seat>().is_err());
    }

    #[test]
    fn seat_right_stops_at_overflow() {
        assert_eq!(Seat::new(0, 3).right(), Some(Seat::new(0, 4)));
        assert_eq!(Seat::new(0, usize::MAX).right(), None);
    }

    #[test]
    fn seat_class_codes_round_trip() {
        for class in SeatClass::STATIC {
            assert_eq!(SeatClass::from_code(class.code()).unwrap(), class);
            assert!(class.is_static());
        }
        assert!(!SeatClass::Occupied.is_static());
        assert_eq!(SeatClass::from_code('?'), Err(CinemaError::InvalidSeatClass('?')));
    }

    #[test]
    fn seat_kind_parses_presentation_literals() {
        assert_eq!("NORMAL".parse::<SeatKind>().unwrap(), SeatKind::Normal);
        assert_eq!(" pmr ".parse::<SeatKind>().unwrap(), SeatKind::Accessible);
        assert_eq!("Double".parse::<SeatKind>().unwrap(), SeatKind::Double);
        assert!("VIP".parse::<SeatKind>().is_err());
        assert!("ACCESSIBLE".parse::<SeatKind>().is_err());
    }

    #[test]
    fn seat_kind_for_class() {
        assert_eq!(SeatKind::for_class(SeatClass::Free), Some(SeatKind::Normal));
        assert_eq!(SeatKind::for_class(SeatClass::Accessible), Some(SeatKind::Accessible));
        assert_eq!(SeatKind::for_class(SeatClass::PairAnchor), Some(SeatKind::Double));
        assert_eq!(SeatKind::for_class(SeatClass::PairContinuation), None);
        assert_eq!(SeatKind::for_class(SeatClass::Blocked), None);
    }

    #[test]
    fn grid_rejects_ragged_rows() {
        let result = Grid::from_rows(vec![
            vec![SeatClass::Free, SeatClass::Free],
            vec![SeatClass::Free],
        ]);
        assert!(matches!(result, Err(CinemaError::InvalidArgument(_))));
        assert!(Grid::from_rows(Vec::new()).is_err());
        assert!(Grid::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn grid_get_is_total() {
        let grid = Grid::filled(2, 3, SeatClass::Free).unwrap();
        assert_eq!(grid.get(Seat::new(1, 2)), Some(SeatClass::Free));
        assert_eq!(grid.get(Seat::new(2, 0)), None);
        assert_eq!(grid.get(Seat::new(0, 3)), None);
    }

    #[test]
    fn grid_clone_is_independent() {
        let original = Grid::filled(2, 2, SeatClass::Free).unwrap();
        let mut copy = original.clone();
        copy.set(Seat::new(0, 0), SeatClass::Blocked);
        assert_eq!(original.get(Seat::new(0, 0)), Some(SeatClass::Free));
        assert_eq!(copy.get(Seat::new(0, 0)), Some(SeatClass::Blocked));
    }

    #[test]
    fn grid_cells_walk_row_major() {
        let grid = Grid::filled(2, 2, SeatClass::Free).unwrap();
        let seats: Vec<Seat> = grid.cells().map(|(seat, _)| seat).collect();
        assert_eq!(
            seats,
            vec![Seat::new(0, 0), Seat::new(0, 1), Seat::new(1, 0), Seat::new(1, 1)]
        );
    }

    #[test]
    fn grid_area_rejects_overflow_and_oversize() {
        assert!(matches!(Grid::area(usize::MAX, 2), Err(CinemaError::InvalidArgument(_))));
        assert!(matches!(Grid::area(MAX_CELLS, 2), Err(CinemaError::InvalidArgument(_))));
        assert!(Grid::filled(usize::MAX, usize::MAX, SeatClass::Free).is_err());
        assert_eq!(Grid::area(MAX_CELLS, 1), Ok(MAX_CELLS));
    }

    #[test]
    fn grid_deserializes_through_row_checks() {
        let grid = Grid::filled(2, 2, SeatClass::Free).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["Free","Free"],["Free","Free"]]"#);
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);

        assert!(serde_json::from_str::<Grid>("[]").is_err());
        assert!(serde_json::from_str::<Grid>(r#"[["Free"],[]]"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"rows":5,"cols":10,"cells":[]}"#).is_err());
    }
}
