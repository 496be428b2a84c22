//! Ship geometry and damage tracking.

use core::fmt;

use crate::common::{CellPos, ShipDescriptor};
use crate::config::BOARD_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A straight run of `size` cells with a damage counter.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    row: usize,
    column: usize,
    orientation: Orientation,
    hit_count: usize,
}

impl Ship {
    /// Create a ship of `size` at the origin, standing vertically.
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            row: 0,
            column: 0,
            orientation: Orientation::Vertical,
            hit_count: 0,
        }
    }

    /// Create a ship of `size` at (`row`, `column`) with `orientation`.
    pub const fn placed(size: usize, row: usize, column: usize, orientation: Orientation) -> Self {
        Self {
            size,
            row,
            column,
            orientation,
            hit_count: 0,
        }
    }

    /// Rebuild a ship from a revealed descriptor. The result is already sunk.
    pub fn from_descriptor(desc: &ShipDescriptor) -> Self {
        Self {
            size: desc.size,
            row: desc.row,
            column: desc.column,
            orientation: desc.orientation(),
            hit_count: desc.size,
        }
    }

    /// Wire form of this ship's position and size.
    pub fn descriptor(&self) -> ShipDescriptor {
        ShipDescriptor {
            row: self.row,
            column: self.column,
            is_vertical: self.is_vertical(),
            size: self.size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Origin of the ship (row, column).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// A ship is sunk once every segment has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hit_count == self.size
    }

    /// Cells covered by the ship, starting at its origin.
    ///
    /// Coordinates past the edge of the board are yielded as-is; validation
    /// is the board's job.
    pub fn covered_cells(&self) -> CoveredCells {
        CoveredCells {
            ship: *self,
            idx: 0,
        }
    }

    /// Returns `true` if the ship covers (`row`, `column`).
    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.covered_cells()
            .any(|pos| pos.row == row && pos.column == column)
    }

    /// Returns `true` when every covered cell lies on the board.
    pub fn fits_on_board(&self) -> bool {
        let (long, short) = match self.orientation {
            Orientation::Vertical => (self.row, self.column),
            Orientation::Horizontal => (self.column, self.row),
        };
        short < BOARD_SIZE
            && long
                .checked_add(self.size)
                .is_some_and(|end| end <= BOARD_SIZE)
    }

    /// Move the ship, keeping its damage counter.
    pub fn set_position(&mut self, row: usize, column: usize, orientation: Orientation) {
        self.row = row;
        self.column = column;
        self.orientation = orientation;
    }

    /// Toggle orientation, pulling the origin back so the new long axis
    /// stays inside the board.
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
        let max_origin = BOARD_SIZE.saturating_sub(self.size);
        match self.orientation {
            Orientation::Vertical => self.row = self.row.min(max_origin),
            Orientation::Horizontal => self.column = self.column.min(max_origin),
        }
    }

    /// Record one more hit. Returns `true` if this hit sank the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hit_count += 1;
        self.is_sunk()
    }

    pub(crate) fn reset_hits(&mut self) {
        self.hit_count = 0;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.size, self.row, self.column, self.orientation, self.hit_count,
        )
    }
}

/// Iterator over the cells covered by a ship.
#[derive(Clone, Copy)]
pub struct CoveredCells {
    ship: Ship,
    idx: usize,
}

impl Iterator for CoveredCells {
    type Item = CellPos;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.ship.size {
            return None;
        }
        let i = self.idx;
        self.idx += 1;
        Some(match self.ship.orientation {
            Orientation::Vertical => CellPos::new(self.ship.row.saturating_add(i), self.ship.column),
            Orientation::Horizontal => {
                CellPos::new(self.ship.row, self.ship.column.saturating_add(i))
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.ship.size - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CoveredCells {}
