//! Seating layouts: the reusable template of a room.
//!
//! A [`Layout`] is a [`Grid`] restricted to the five static seat classes and
//! guarded by the pairing invariant: every double-seat anchor (`D`) is
//! immediately followed, in the same row, by its continuation (`x`). No
//! constructor or edit can leave a layout that breaks it.

use crate::error::{CinemaError, Result};
use crate::types::{Grid, MAX_CELLS, Seat, SeatClass, SeatKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Height of the standard room
pub const DEFAULT_ROWS: usize = 5;

/// Width of the standard room
pub const DEFAULT_COLS: usize = 10;

const _: () = assert!(DEFAULT_ROWS > 0 && DEFAULT_COLS > 0);
const _: () = assert!(DEFAULT_ROWS * DEFAULT_COLS <= MAX_CELLS);

/// Immutable-once-built seating template
///
/// Deserialization runs the same checks as [`Layout::from_grid`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Grid", into = "Grid")]
pub struct Layout {
    grid: Grid,
}

/// Bookable places in a layout, by kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    /// `Free` seats
    pub normal: usize,
    /// `Accessible` seats
    pub accessible: usize,
    /// Double seats (each counted once)
    pub double: usize,
}

impl Capacity {
    /// Number of bookings the layout can hold at once
    #[must_use]
    pub const fn bookings(&self) -> usize {
        self.normal + self.accessible + self.double
    }

    /// Number of people the layout can seat (two per double seat)
    #[must_use]
    pub const fn people(&self) -> usize {
        self.normal + self.accessible + self.double * 2
    }
}

impl Layout {
    /// Build the canonical layout for a `rows x cols` room.
    ///
    /// The front row mixes double seats on both sides with accessible seats in
    /// the middle block, the second row is double seats throughout, and the
    /// remaining rows are free seats. Columns `2` and `cols - 3` are aisles.
    /// Rooms narrower than six columns get free seats only.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if either dimension is zero
    /// or the room would exceed [`MAX_CELLS`].
    pub fn build(rows: usize, cols: usize) -> Result<Self> {
        Grid::area(rows, cols)?;
        Ok(Self {
            grid: standard_grid(rows, cols),
        })
    }

    /// Build a layout from explicit rows, deep-copying the input.
    ///
    /// # Errors
    ///
    /// - [`CinemaError::InvalidArgument`] if the grid is empty or ragged
    /// - [`CinemaError::InvalidSeatClass`] if a cell is `Occupied`
    /// - [`CinemaError::InvalidLayout`] if the pairing invariant is broken
    pub fn from_grid(rows: Vec<Vec<SeatClass>>) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        Self::check_grid(&grid)?;
        Ok(Self { grid })
    }

    /// Build a layout from rows of display codes, e.g. `"Dx0X0"`.
    ///
    /// Whitespace inside a row is ignored, so `"D x 0"` is accepted too.
    ///
    /// # Errors
    ///
    /// Same as [`Layout::from_grid`], plus [`CinemaError::InvalidSeatClass`]
    /// for unknown characters.
    pub fn from_codes<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(SeatClass::from_code)
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_grid(rows)
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Class of the cell at `seat`
    #[must_use]
    pub fn class_at(&self, seat: Seat) -> Option<SeatClass> {
        self.grid.get(seat)
    }

    /// Change the class of one cell.
    ///
    /// # Errors
    ///
    /// - [`CinemaError::OutOfRange`] if `seat` is outside the grid
    /// - [`CinemaError::InvalidSeatClass`] if `class` is `Occupied`
    /// - [`CinemaError::InvalidLayout`] if the edit breaks the pairing
    ///   invariant; the layout is left unchanged
    pub fn set_cell(&mut self, seat: Seat, class: SeatClass) -> Result<()> {
        if !class.is_static() {
            return Err(CinemaError::InvalidSeatClass(class.code()));
        }
        let mut edited = self.grid.clone();
        if edited.set(seat, class).is_none() {
            return Err(self.out_of_range(seat));
        }
        Self::check_pairing(&edited)?;
        self.grid = edited;
        Ok(())
    }

    /// Turn `seat` and its right neighbour into one double seat.
    ///
    /// # Errors
    ///
    /// [`CinemaError::OutOfRange`] if either cell is outside the grid, or
    /// [`CinemaError::InvalidLayout`] if overwriting the right neighbour
    /// orphans an anchor further left.
    pub fn set_pair(&mut self, seat: Seat) -> Result<()> {
        let continuation = seat
            .right()
            .filter(|right| self.grid.contains(*right))
            .ok_or_else(|| self.out_of_range(seat))?;
        if !self.grid.contains(seat) {
            return Err(self.out_of_range(seat));
        }

        let mut edited = self.grid.clone();
        edited.set(seat, SeatClass::PairAnchor);
        edited.set(continuation, SeatClass::PairContinuation);
        Self::check_pairing(&edited)?;
        self.grid = edited;
        Ok(())
    }

    /// Replace the whole layout with a grid of the same dimensions.
    ///
    /// # Errors
    ///
    /// [`CinemaError::DimensionMismatch`] if the dimensions differ, otherwise
    /// the same errors as [`Layout::from_grid`]. On error the layout is left
    /// unchanged.
    pub fn relayout(&mut self, rows: Vec<Vec<SeatClass>>) -> Result<()> {
        let replacement = Self::from_grid(rows)?;
        if replacement.rows() != self.rows() || replacement.cols() != self.cols() {
            return Err(CinemaError::DimensionMismatch {
                expected_rows: self.rows(),
                expected_cols: self.cols(),
                actual_rows: replacement.rows(),
                actual_cols: replacement.cols(),
            });
        }
        *self = replacement;
        Ok(())
    }

    /// Re-check the pairing invariant
    #[must_use]
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Re-check the pairing invariant, reporting the first orphaned anchor.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidLayout`] naming the first anchor, in
    /// row-major order, that is not followed by its continuation.
    pub fn check(&self) -> Result<()> {
        Self::check_pairing(&self.grid)
    }

    /// Defensive deep copy of the grid
    #[must_use]
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Count bookable places per kind
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        let mut capacity = Capacity::default();
        for (_, class) in self.grid.cells() {
            match SeatKind::for_class(class) {
                Some(SeatKind::Normal) => capacity.normal += 1,
                Some(SeatKind::Accessible) => capacity.accessible += 1,
                Some(SeatKind::Double) => capacity.double += 1,
                None => {}
            }
        }
        capacity
    }

    fn check_grid(grid: &Grid) -> Result<()> {
        if let Some((_, class)) = grid.cells().find(|(_, class)| !class.is_static()) {
            return Err(CinemaError::InvalidSeatClass(class.code()));
        }
        Self::check_pairing(grid)
    }

    fn check_pairing(grid: &Grid) -> Result<()> {
        let orphan = grid
            .cells()
            .filter(|(_, class)| *class == SeatClass::PairAnchor)
            .find(|(seat, _)| {
                seat.right().and_then(|right| grid.get(right)) != Some(SeatClass::PairContinuation)
            });
        match orphan {
            Some((seat, _)) => Err(CinemaError::InvalidLayout(seat)),
            None => Ok(()),
        }
    }

    const fn out_of_range(&self, seat: Seat) -> CinemaError {
        CinemaError::OutOfRange {
            seat,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            grid: standard_grid(DEFAULT_ROWS, DEFAULT_COLS),
        }
    }
}

impl FromStr for Layout {
    type Err = CinemaError;

    /// One row per non-empty line of display codes.
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.lines().filter(|line| !line.trim().is_empty()).collect();
        Self::from_codes(&rows)
    }
}

impl TryFrom<Grid> for Layout {
    type Error = CinemaError;

    fn try_from(grid: Grid) -> Result<Self> {
        Self::check_grid(&grid)?;
        Ok(Self { grid })
    }
}

impl From<Layout> for Grid {
    fn from(layout: Layout) -> Self {
        layout.grid
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.iter_rows() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Callers check the dimensions with [`Grid::area`] first.
fn standard_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::filled_unchecked(rows, cols, SeatClass::Free);
    if cols < 6 {
        return grid;
    }

    let left_aisle = 2;
    let right_aisle = cols - 3;

    for row in 0..rows {
        grid.set(Seat::new(row, left_aisle), SeatClass::Blocked);
        grid.set(Seat::new(row, right_aisle), SeatClass::Blocked);
    }

    for row in 0..rows.min(2) {
        // Double seats on both outer blocks
        for col in [0, cols - 2] {
            grid.set(Seat::new(row, col), SeatClass::PairAnchor);
            grid.set(Seat::new(row, col + 1), SeatClass::PairContinuation);
        }

        let middle = left_aisle + 1..right_aisle;
        if row == 0 {
            for col in middle {
                grid.set(Seat::new(row, col), SeatClass::Accessible);
            }
        } else {
            let mut col = middle.start;
            while col + 1 < middle.end {
                grid.set(Seat::new(row, col), SeatClass::PairAnchor);
                grid.set(Seat::new(row, col + 1), SeatClass::PairContinuation);
                col += 2;
            }
        }
    }

    grid
}
