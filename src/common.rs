//! Common types for the board model: coordinates, revealed ships, shot payloads and errors.

use crate::ship::Orientation;

/// A grid coordinate as carried on the wire (`{"row": r, "column": c}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

impl CellPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Returns `true` when the coordinate lies inside a `size`×`size` grid.
    pub fn in_range(&self, size: usize) -> bool {
        self.row < size && self.column < size
    }
}

/// Position, orientation and size of a ship revealed by a sinking shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShipDescriptor {
    pub row: usize,
    pub column: usize,
    pub is_vertical: bool,
    pub size: usize,
}

impl ShipDescriptor {
    pub fn orientation(&self) -> Orientation {
        if self.is_vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// Outcome of one shot, as replayed on the firing player's opponent view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShotResult {
    pub cell_pos: CellPos,
    pub hit: bool,
    #[cfg_attr(
        feature = "std",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub ship: Option<ShipDescriptor>,
    #[cfg_attr(
        feature = "std",
        serde(default, skip_serializing_if = "core::ops::Not::not")
    )]
    pub all_sunk: bool,
}

impl ShotResult {
    /// A shot that found open water.
    pub fn miss(cell_pos: CellPos) -> Self {
        Self {
            cell_pos,
            hit: false,
            ship: None,
            all_sunk: false,
        }
    }

    /// A shot that struck a ship without sinking it.
    pub fn hit(cell_pos: CellPos) -> Self {
        Self {
            hit: true,
            ..Self::miss(cell_pos)
        }
    }

    /// A shot that sank `ship`; `all_sunk` marks the last ship of the fleet.
    pub fn sunk(cell_pos: CellPos, ship: ShipDescriptor, all_sunk: bool) -> Self {
        Self {
            cell_pos,
            hit: true,
            ship: Some(ship),
            all_sunk,
        }
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, column: usize },
    /// Specified ship index is out of range.
    InvalidIndex,
    /// Ship size is zero or longer than the board.
    InvalidShipSize(usize),
    /// Fleet is empty or cannot fit on the board.
    InvalidFleet,
    /// Placement was attempted after the fleet was locked for play.
    PlacementLocked,
    /// Unable to lay the fleet out (random and fallback placement failed).
    UnableToPlaceShip,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds { row, column } => {
                write!(f, "Cell ({}, {}) is outside the board", row, column)
            }
            BoardError::InvalidIndex => write!(f, "Ship index is out of range"),
            BoardError::InvalidShipSize(size) => write!(f, "Invalid ship size {}", size),
            BoardError::InvalidFleet => write!(f, "Fleet is empty or too large for the board"),
            BoardError::PlacementLocked => write!(f, "Fleet is locked for play"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
