//! Board model: the shared grid, the owner's fleet board and its placement logic.

use alloc::vec::Vec;
use core::fmt;

use log::debug;
use rand::Rng;

use crate::cell::Cell;
use crate::common::{BoardError, CellPos, ShotResult};
use crate::config::{BOARD_SIZE, MAX_RANDOMIZE_ROUNDS};
use crate::ship::{Orientation, Ship};

type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// What a renderer shows for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Untouched,
    Miss,
    Hit,
}

/// Events raised by the boards and consumed by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Input on the opponent view while it is not this player's turn.
    Click,
    /// Player chose a cell of the opponent view to fire at.
    BombCell(CellPos),
    /// Incoming shot found open water.
    PlayerMissed(ShotResult),
    /// Incoming shot struck a ship.
    Hit(ShotResult),
    /// Incoming shot sank a ship.
    ShipSunk(ShotResult),
    /// Incoming shot sank the last ship of the fleet.
    AllSunk(ShotResult),
}

/// A 10×10 grid of cells plus an ordered fleet.
///
/// Fleet indices are stable for the whole session; `Cell::ship_index`
/// refers into `fleet`.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
    fleet: Vec<Ship>,
}

impl Board {
    /// Create an empty board with no ships.
    pub fn new() -> Self {
        Self {
            cells: core::array::from_fn(|r| core::array::from_fn(|c| Cell::new(r, c))),
            fleet: Vec::new(),
        }
    }

    /// Cell at (`row`, `column`), or `None` off the grid.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(column)
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row)?.get_mut(column)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    pub(crate) fn fleet_mut(&mut self) -> &mut Vec<Ship> {
        &mut self.fleet
    }

    /// Returns `true` when the fleet is non-empty and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.fleet.is_empty() && self.fleet.iter().all(Ship::is_sunk)
    }

    /// Number of ships already sunk.
    pub fn sunk_count(&self) -> usize {
        self.fleet.iter().filter(|s| s.is_sunk()).count()
    }

    /// Stamp every cell's ship index from the current fleet and clear shots.
    fn restamp(&mut self) {
        self.cells.iter_mut().flatten().for_each(Cell::reset);
        for index in 0..self.fleet.len() {
            self.fleet[index].reset_hits();
            let ship = self.fleet[index];
            for pos in ship.covered_cells() {
                if let Some(cell) = self.cell_mut(pos.row, pos.column) {
                    cell.set_ship(Some(index));
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ fleet: {:?} }}", self.fleet)?;
        for row in self.cells.iter() {
            for cell in row {
                let ch = match (cell.ship_index(), cell.has_hit()) {
                    (Some(_), true) => 'X',
                    (Some(_), false) => 'S',
                    (None, true) => 'o',
                    (None, false) => '.',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Returns `true` iff no two ships share a cell and every covered cell is on the board.
///
/// Covered cells are flattened and sorted so duplicates end up adjacent.
pub fn fleet_is_valid(fleet: &[Ship]) -> bool {
    let mut all: Vec<CellPos> = fleet.iter().flat_map(Ship::covered_cells).collect();
    all.sort_unstable();
    let overlapping = all.windows(2).any(|pair| pair[0] == pair[1]);
    let out_of_range = all.iter().any(|pos| !pos.in_range(BOARD_SIZE));
    !(overlapping || out_of_range)
}

/// The player's own board: fleet placement and authoritative shot resolution.
#[derive(Debug, Clone)]
pub struct OwnBoard {
    board: Board,
    locked: bool,
    committed: bool,
}

impl OwnBoard {
    /// Create a board with one ship per entry of `sizes`, ship `i` laid
    /// horizontally along row `i`.
    pub fn new(sizes: &[usize]) -> Result<Self, BoardError> {
        if sizes.is_empty() {
            return Err(BoardError::InvalidFleet);
        }
        let mut board = Board::new();
        for (i, &size) in sizes.iter().enumerate() {
            if size == 0 || size > BOARD_SIZE {
                return Err(BoardError::InvalidShipSize(size));
            }
            board
                .fleet_mut()
                .push(Ship::placed(size, i, 0, Orientation::Horizontal));
        }
        let mut own = Self {
            board,
            locked: false,
            committed: false,
        };
        own.validate();
        Ok(own)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &[Ship] {
        self.board.fleet()
    }

    /// Whether the fleet is frozen for play.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the current layout has been validated and committed.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Check the layout and, when valid, commit it: re-stamp every cell's
    /// ship index and reset all shots and hit counters.
    pub fn validate(&mut self) -> bool {
        if !fleet_is_valid(self.board.fleet()) {
            self.committed = false;
            return false;
        }
        self.board.restamp();
        self.committed = true;
        true
    }

    /// Freeze the fleet; placement edits fail from now on.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    fn ensure_unlocked(&self) -> Result<(), BoardError> {
        if self.locked {
            Err(BoardError::PlacementLocked)
        } else {
            Ok(())
        }
    }

    fn ship_mut(&mut self, index: usize) -> Result<&mut Ship, BoardError> {
        self.ensure_unlocked()?;
        self.board
            .fleet_mut()
            .get_mut(index)
            .ok_or(BoardError::InvalidIndex)
    }

    /// Move ship `index` to a new origin, keeping its orientation.
    ///
    /// The layout is not validated; call [`OwnBoard::validate`] afterwards.
    pub fn move_ship(&mut self, index: usize, row: usize, column: usize) -> Result<(), BoardError> {
        let ship = self.ship_mut(index)?;
        let orientation = ship.orientation();
        ship.set_position(row, column, orientation);
        self.committed = false;
        Ok(())
    }

    /// Flip ship `index` in place; see [`Ship::flip`].
    pub fn flip(&mut self, index: usize) -> Result<(), BoardError> {
        self.ship_mut(index)?.flip();
        self.committed = false;
        Ok(())
    }

    /// Scatter the fleet at random until the layout is valid, and commit it.
    ///
    /// Each round draws an origin and an orientation for every ship. After
    /// `MAX_RANDOMIZE_ROUNDS` rejected rounds the fleet is laid out with a
    /// deterministic first-fit scan instead. Returns the number of rounds used.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, BoardError> {
        self.ensure_unlocked()?;
        for round in 1..=MAX_RANDOMIZE_ROUNDS {
            for ship in self.board.fleet_mut().iter_mut() {
                let row = rng.random_range(0..BOARD_SIZE);
                let column = rng.random_range(0..BOARD_SIZE);
                let orientation = if rng.random_bool(0.5) {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                ship.set_position(row, column, orientation);
            }
            if self.validate() {
                debug!("fleet randomized after {} round(s)", round);
                return Ok(round);
            }
        }
        debug!(
            "random placement gave up after {} rounds; using first-fit",
            MAX_RANDOMIZE_ROUNDS
        );
        self.first_fit()?;
        Ok(MAX_RANDOMIZE_ROUNDS)
    }

    /// Place ships in fleet order at the first free origin, scanning rows
    /// then columns, horizontal before vertical.
    fn first_fit(&mut self) -> Result<(), BoardError> {
        let mut occupied = [[false; BOARD_SIZE]; BOARD_SIZE];
        for ship in self.board.fleet_mut().iter_mut() {
            let mut placed = false;
            'scan: for row in 0..BOARD_SIZE {
                for column in 0..BOARD_SIZE {
                    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                        let candidate = Ship::placed(ship.size(), row, column, orientation);
                        if candidate.fits_on_board()
                            && candidate
                                .covered_cells()
                                .all(|pos| !occupied[pos.row][pos.column])
                        {
                            for pos in candidate.covered_cells() {
                                occupied[pos.row][pos.column] = true;
                            }
                            ship.set_position(row, column, orientation);
                            placed = true;
                            break 'scan;
                        }
                    }
                }
            }
            if !placed {
                return Err(BoardError::UnableToPlaceShip);
            }
        }
        if self.validate() {
            Ok(())
        } else {
            Err(BoardError::UnableToPlaceShip)
        }
    }

    /// Resolve an incoming shot at (`row`, `column`).
    ///
    /// Returns `Ok(None)` if the cell was already fired upon; the board is
    /// left untouched in that case.
    pub fn resolve_shot(
        &mut self,
        row: usize,
        column: usize,
    ) -> Result<Option<BoardEvent>, BoardError> {
        let cell = self
            .board
            .cell_mut(row, column)
            .ok_or(BoardError::OutOfBounds { row, column })?;
        if cell.has_hit() {
            return Ok(None);
        }
        cell.mark_hit();
        let pos = CellPos::new(row, column);

        let Some(index) = cell.ship_index() else {
            return Ok(Some(BoardEvent::PlayerMissed(ShotResult::miss(pos))));
        };
        let ship = self
            .board
            .fleet_mut()
            .get_mut(index)
            .ok_or(BoardError::InvalidIndex)?;
        if !ship.register_hit() {
            return Ok(Some(BoardEvent::Hit(ShotResult::hit(pos))));
        }
        let desc = ship.descriptor();
        if self.board.all_sunk() {
            Ok(Some(BoardEvent::AllSunk(ShotResult::sunk(pos, desc, true))))
        } else {
            Ok(Some(BoardEvent::ShipSunk(ShotResult::sunk(pos, desc, false))))
        }
    }

    /// Display state of (`row`, `column`).
    pub fn cell_state(&self, row: usize, column: usize) -> CellState {
        match self.board.cell(row, column) {
            Some(cell) if cell.has_hit() && cell.ship_index().is_some() => CellState::Hit,
            Some(cell) if cell.has_hit() => CellState::Miss,
            _ => CellState::Untouched,
        }
    }
}
