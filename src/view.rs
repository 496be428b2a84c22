//! The local reconstruction of the opponent's board.

use crate::board::{Board, BoardEvent, CellState};
use crate::common::{CellPos, ShotResult};
use crate::config::BOARD_SIZE;
use crate::ship::Ship;

/// What is known about the opponent's board, built only from shot results
/// the opponent has revealed. Never resolves hits on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentView {
    board: Board,
    struck: [[bool; BOARD_SIZE]; BOARD_SIZE],
}

impl OpponentView {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            struck: [[false; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Ships revealed so far, in the order they were sunk.
    pub fn revealed_ships(&self) -> &[Ship] {
        self.board.fleet()
    }

    /// Whether a result for (`row`, `column`) has already been received.
    pub fn is_revealed(&self, row: usize, column: usize) -> bool {
        self.board.cell(row, column).is_some_and(|c| c.has_hit())
    }

    /// Display state of (`row`, `column`).
    pub fn cell_state(&self, row: usize, column: usize) -> CellState {
        if !self.is_revealed(row, column) {
            CellState::Untouched
        } else if self.struck[row][column] {
            CellState::Hit
        } else {
            CellState::Miss
        }
    }

    /// A hit cell not yet attributed to a revealed ship.
    pub fn is_open_hit(&self, row: usize, column: usize) -> bool {
        self.cell_state(row, column) == CellState::Hit
            && self
                .board
                .cell(row, column)
                .is_some_and(|c| c.ship_index().is_none())
    }

    /// Cells with no result yet, row-major.
    pub fn untouched_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.board
            .cells()
            .filter(|c| !c.has_hit())
            .map(|c| c.pos())
    }

    /// Turn player input on (`row`, `column`) into a fire event.
    ///
    /// Off-grid and already revealed cells yield nothing.
    pub fn target(&self, row: usize, column: usize) -> Option<BoardEvent> {
        let pos = CellPos::new(row, column);
        if !pos.in_range(BOARD_SIZE) || self.is_revealed(row, column) {
            return None;
        }
        Some(BoardEvent::BombCell(pos))
    }

    /// Replay a shot result received from the opponent.
    ///
    /// Returns `false` and changes nothing if the cell is off the grid or
    /// already has a result.
    pub fn apply_revealed_result(&mut self, result: &ShotResult) -> bool {
        let CellPos { row, column } = result.cell_pos;
        match self.board.cell_mut(row, column) {
            Some(cell) if !cell.has_hit() => cell.mark_hit(),
            _ => return false,
        }
        self.struck[row][column] = result.hit;

        if let Some(desc) = result.ship {
            let ship = Ship::from_descriptor(&desc);
            if desc.size == 0 || !ship.fits_on_board() {
                log::debug!("ignoring revealed ship outside the board: {:?}", desc);
                return true;
            }
            let index = self.board.fleet().len();
            self.board.fleet_mut().push(ship);
            for pos in ship.covered_cells() {
                if let Some(cell) = self.board.cell_mut(pos.row, pos.column) {
                    cell.set_ship(Some(index));
                }
            }
        }
        true
    }
}

impl Default for OpponentView {
    fn default() -> Self {
        Self::new()
    }
}
