use crate::common::CellPos;

/// A single grid square.
///
/// Cells are created with their board and live for the whole session. Only
/// shot resolution and the placement commit change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    column: usize,
    has_hit: bool,
    ship_index: Option<usize>,
}

impl Cell {
    pub(crate) const fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            has_hit: false,
            ship_index: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.column)
    }

    /// Whether the cell has been fired upon.
    pub fn has_hit(&self) -> bool {
        self.has_hit
    }

    /// Index into the fleet of the ship covering this cell, if any.
    pub fn ship_index(&self) -> Option<usize> {
        self.ship_index
    }

    pub(crate) fn mark_hit(&mut self) {
        self.has_hit = true;
    }

    pub(crate) fn set_ship(&mut self, index: Option<usize>) {
        self.ship_index = index;
    }

    pub(crate) fn reset(&mut self) {
        self.has_hit = false;
        self.ship_index = None;
    }
}
