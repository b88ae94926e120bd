//! Live seat state of a single screening.
//!
//! An [`OccupancyMap`] starts as a deep copy of a layout and flips cells
//! between their original class and [`SeatClass::Occupied`]. All queries are
//! total: any coordinate outside the grid, including the right half of a
//! double seat hanging off the last column, simply answers `false`.

use crate::layout::Layout;
use crate::types::{Grid, Seat, SeatClass, SeatKind};

/// Per-screening copy of a layout tracking which cells are taken
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMap {
    grid: Grid,
}

impl OccupancyMap {
    /// Create a map from a layout snapshot
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            grid: layout.snapshot(),
        }
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

    /// Current class of the cell at `seat`
    #[must_use]
    pub fn class_at(&self, seat: Seat) -> Option<SeatClass> {
        self.grid.get(seat)
    }

    /// Whether `seat` can be reserved as `kind` right now
    #[must_use]
    pub fn is_reservable(&self, seat: Seat, kind: SeatKind) -> bool {
        if self.grid.get(seat) != Some(kind.required_class()) {
            return false;
        }
        kind.width() == 1 || self.continuation_class(seat) == Some(SeatClass::PairContinuation)
    }

    /// Mark `seat` (and its continuation for doubles) as occupied.
    ///
    /// The caller must have checked [`OccupancyMap::is_reservable`] first.
    pub fn apply(&mut self, seat: Seat, kind: SeatKind) {
        for cell in Self::cells_for(seat, kind) {
            self.grid.set(cell, SeatClass::Occupied);
        }
    }

    /// Whether `seat` is currently held as `kind`
    #[must_use]
    pub fn is_releasable(&self, seat: Seat, kind: SeatKind) -> bool {
        if self.grid.get(seat) != Some(SeatClass::Occupied) {
            return false;
        }
        match kind {
            SeatKind::Normal | SeatKind::Accessible => true,
            SeatKind::Double => self.continuation_class(seat) == Some(SeatClass::Occupied),
        }
    }

    /// Restore `seat` (and its continuation for doubles) to the classes found
    /// at the same coordinates in `original`.
    pub fn release(&mut self, seat: Seat, kind: SeatKind, original: &Layout) {
        for cell in Self::cells_for(seat, kind) {
            if let Some(class) = original.class_at(cell) {
                self.grid.set(cell, class);
            }
        }
    }

    /// Defensive deep copy of the grid
    #[must_use]
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Display codes, one row per vector
    #[must_use]
    pub fn codes(&self) -> Vec<Vec<char>> {
        self.grid.codes()
    }

    /// Number of occupied cells (a double seat counts twice)
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.grid.count(SeatClass::Occupied)
    }

    /// Seats that could be reserved as `kind` right now, row-major
    #[must_use]
    pub fn available(&self, kind: SeatKind) -> Vec<Seat> {
        self.grid
            .cells()
            .map(|(seat, _)| seat)
            .filter(|seat| self.is_reservable(*seat, kind))
            .collect()
    }

    fn continuation_class(&self, seat: Seat) -> Option<SeatClass> {
        seat.right().and_then(|right| self.grid.get(right))
    }

    fn cells_for(seat: Seat, kind: SeatKind) -> impl Iterator<Item = Seat> {
        std::iter::successors(Some(seat), Seat::right).take(kind.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_map() -> OccupancyMap {
        OccupancyMap::from_layout(&Layout::default())
    }

    #[test]
    fn starts_identical_to_layout() {
        let layout = Layout::default();
        let map = OccupancyMap::from_layout(&layout);
        assert_eq!(map.snapshot(), layout.snapshot());
        assert_eq!(map.occupied_count(), 0);
    }

    #[test]
    fn kind_must_match_class() {
        let map = standard_map();
        assert!(map.is_reservable(Seat::new(2, 0), SeatKind::Normal));
        assert!(!map.is_reservable(Seat::new(2, 0), SeatKind::Accessible));
        assert!(!map.is_reservable(Seat::new(2, 0), SeatKind::Double));

        assert!(map.is_reservable(Seat::new(0, 3), SeatKind::Accessible));
        assert!(!map.is_reservable(Seat::new(0, 3), SeatKind::Normal));

        assert!(map.is_reservable(Seat::new(0, 0), SeatKind::Double));
        assert!(!map.is_reservable(Seat::new(0, 1), SeatKind::Double));
        assert!(!map.is_reservable(Seat::new(0, 1), SeatKind::Normal));

        assert!(!map.is_reservable(Seat::new(0, 2), SeatKind::Normal));
    }

    #[test]
    fn out_of_bounds_is_never_reservable_or_releasable() {
        let map = standard_map();
        for kind in SeatKind::ALL {
            assert!(!map.is_reservable(Seat::new(5, 0), kind));
            assert!(!map.is_reservable(Seat::new(0, 10), kind));
            assert!(!map.is_reservable(Seat::new(usize::MAX, usize::MAX), kind));
            assert!(!map.is_releasable(Seat::new(5, 0), kind));
            assert!(!map.is_releasable(Seat::new(0, usize::MAX), kind));
        }
    }

    #[test]
    fn double_at_last_column_checks_bounds() {
        // Valid layouts never end a row with an anchor; check the occupied side
        let mut map = standard_map();
        map.apply(Seat::new(2, 9), SeatKind::Normal);
        assert!(map.is_releasable(Seat::new(2, 9), SeatKind::Normal));
        assert!(!map.is_releasable(Seat::new(2, 9), SeatKind::Double));
    }

    #[test]
    fn apply_double_occupies_both_halves() {
        let mut map = standard_map();
        map.apply(Seat::new(0, 0), SeatKind::Double);
        assert_eq!(map.class_at(Seat::new(0, 0)), Some(SeatClass::Occupied));
        assert_eq!(map.class_at(Seat::new(0, 1)), Some(SeatClass::Occupied));
        assert_eq!(map.occupied_count(), 2);
        assert!(map.is_releasable(Seat::new(0, 0), SeatKind::Double));
    }

    #[test]
    fn release_restores_from_layout() {
        let layout = Layout::default();
        let mut map = OccupancyMap::from_layout(&layout);
        map.apply(Seat::new(1, 3), SeatKind::Double);
        map.release(Seat::new(1, 3), SeatKind::Double, &layout);
        assert_eq!(map.class_at(Seat::new(1, 3)), Some(SeatClass::PairAnchor));
        assert_eq!(map.class_at(Seat::new(1, 4)), Some(SeatClass::PairContinuation));
        assert_eq!(map.snapshot(), layout.snapshot());
    }

    #[test]
    fn releasing_double_as_normal_strands_continuation() {
        let layout = Layout::default();
        let mut map = OccupancyMap::from_layout(&layout);
        map.apply(Seat::new(0, 8), SeatKind::Double);
        map.release(Seat::new(0, 8), SeatKind::Normal, &layout);
        assert_eq!(map.class_at(Seat::new(0, 9)), Some(SeatClass::Occupied));
    }

    #[test]
    fn map_is_independent_of_layout() {
        let mut layout = Layout::default();
        let map = OccupancyMap::from_layout(&layout);
        layout.set_cell(Seat::new(2, 0), SeatClass::Blocked).ok();
        assert_eq!(map.class_at(Seat::new(2, 0)), Some(SeatClass::Free));
    }

    #[test]
    fn available_lists_reservable_seats() {
        let mut map = standard_map();
        assert_eq!(map.available(SeatKind::Accessible).len(), 4);
        map.apply(Seat::new(0, 3), SeatKind::Accessible);
        let remaining = map.available(SeatKind::Accessible);
        assert_eq!(remaining.len(), 3);
        assert!(!remaining.contains(&Seat::new(0, 3)));
        assert_eq!(map.available(SeatKind::Double).len(), 6);
    }
}
