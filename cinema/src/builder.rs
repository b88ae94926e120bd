//! Layout generators.
//!
//! [`LayoutBuilder`] accumulates rows of display codes with a left padding
//! and pads them into a rectangle of `Blocked` cells. The shape helpers
//! ([`LayoutBuilder::rectangular`], [`LayoutBuilder::trapezoid`],
//! [`LayoutBuilder::arched`]) produce rooms made of free seats only.

use crate::error::{CinemaError, Result};
use crate::layout::{Layout, DEFAULT_COLS, DEFAULT_ROWS};
use crate::types::{Grid, SeatClass};

/// One row: blocked cells on the left, then the pattern
#[derive(Clone, Debug, PartialEq, Eq)]
struct RowSpec {
    left_padding: usize,
    cells: Vec<SeatClass>,
}

impl RowSpec {
    fn width(&self) -> Option<usize> {
        self.left_padding.checked_add(self.cells.len())
    }
}

/// Row-by-row layout builder
///
/// # Example
///
/// ```
/// use cinema::builder::LayoutBuilder;
///
/// let layout = LayoutBuilder::new()
///     .add_row(1, "00")
///     .unwrap()
///     .add_row(0, "Dx0X")
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(layout.to_string(), "X 0 0 X\nD x 0 X\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutBuilder {
    rows: Vec<RowSpec>,
}

impl LayoutBuilder {
    /// Creates an empty builder
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a row made of `left_padding` blocked cells followed by `pattern`.
    ///
    /// Whitespace in the pattern is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidSeatClass`] for a character that is not
    /// a static seat class code (including `O`).
    pub fn add_row(mut self, left_padding: usize, pattern: &str) -> Result<Self> {
        let cells = pattern
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|code| {
                SeatClass::from_code(code).and_then(|class| {
                    if class.is_static() {
                        Ok(class)
                    } else {
                        Err(CinemaError::InvalidSeatClass(code))
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.rows.push(RowSpec {
            left_padding,
            cells,
        });
        Ok(self)
    }

    /// Rows added so far
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Pad every row to the widest one with blocked cells and validate.
    ///
    /// An empty builder yields a plain rectangular room of the default size.
    ///
    /// # Errors
    ///
    /// - [`CinemaError::InvalidArgument`] if every row is empty or the
    ///   padded room would be too large
    /// - [`CinemaError::InvalidLayout`] if a double seat is left unpaired
    pub fn build(self) -> Result<Layout> {
        if self.rows.is_empty() {
            return Self::rectangular(DEFAULT_ROWS, DEFAULT_COLS);
        }

        let width = self
            .rows
            .iter()
            .map(RowSpec::width)
            .try_fold(0, |widest, width| width.map(|width| widest.max(width)))
            .ok_or_else(|| CinemaError::invalid("row padding overflows the room width"))?;
        Grid::area(self.rows.len(), width)?;

        let grid = self
            .rows
            .into_iter()
            .map(|spec| {
                let mut row = vec![SeatClass::Blocked; spec.left_padding];
                row.extend(spec.cells);
                row.resize(width, SeatClass::Blocked);
                row
            })
            .collect();
        Layout::from_grid(grid)
    }

    /// A `rows x cols` room of free seats.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if either dimension is zero
    /// or the room is too large.
    pub fn rectangular(rows: usize, cols: usize) -> Result<Layout> {
        check_positive(rows, cols)?;
        Layout::from_grid(vec![vec![SeatClass::Free; cols]; rows])
    }

    /// A room widening linearly from `min_width` at the front to `max_width`
    /// at the back, each row centered.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if `rows` or `min_width` is
    /// zero, if `min_width > max_width`, or if the room is too large.
    pub fn trapezoid(rows: usize, min_width: usize, max_width: usize) -> Result<Layout> {
        check_positive(rows, min_width)?;
        if min_width > max_width {
            return Err(CinemaError::invalid(format!(
                "minimum width {min_width} exceeds maximum width {max_width}"
            )));
        }
        // Bounds (max_width - min_width) * i below
        check_positive(rows, max_width)?;

        let mut builder = Self::new();
        for i in 0..rows {
            let width = if rows == 1 {
                max_width
            } else {
                min_width + (max_width - min_width) * i / (rows - 1)
            };
            builder = builder.free_row((max_width - width) / 2, width);
        }
        builder.build()
    }

    /// A room bulging in the middle rows: row `i` is
    /// `center + sin(pi * i / (rows - 1)) * 0.3 * center` seats wide,
    /// centered in `1.3 * center` columns.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::InvalidArgument`] if `rows` or `center_width`
    /// is zero, or if the room is too large.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn arched(rows: usize, center_width: usize) -> Result<Layout> {
        // Rows span at most 1.3 * center columns
        check_positive(rows, center_width.saturating_add(center_width.div_ceil(3)))?;

        let center = center_width as f64;
        let mut builder = Self::new();
        for i in 0..rows {
            let arc = if rows == 1 {
                0.0
            } else {
                (std::f64::consts::PI * i as f64 / (rows - 1) as f64).sin()
            };
            let width = (center + arc * center * 0.3) as usize;
            let padding = ((center * 1.3 - width as f64) / 2.0).max(0.0) as usize;
            builder = builder.free_row(padding, width);
        }
        builder.build()
    }

    fn free_row(mut self, left_padding: usize, width: usize) -> Self {
        self.rows.push(RowSpec {
            left_padding,
            cells: vec![SeatClass::Free; width],
        });
        self
    }
}

fn check_positive(rows: usize, cols: usize) -> Result<()> {
    Grid::area(rows, cols).map(drop)
}
