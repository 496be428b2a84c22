use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::Rng;

use super::Player;
use crate::board::OwnBoard;
use crate::common::{BoardError, CellPos};
use crate::config::BOARD_SIZE;
use crate::view::OpponentView;

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Computer player.
///
/// Hunts on a checkerboard until it scores a hit, then targets the
/// untouched neighbours of hits that do not yet belong to a sunk ship.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }

    /// Untouched cells next to an open hit.
    pub fn targets(view: &OpponentView) -> Vec<CellPos> {
        let mut out: Vec<CellPos> = Vec::new();
        for cell in view.board().cells() {
            if !view.is_open_hit(cell.row(), cell.column()) {
                continue;
            }
            for (dr, dc) in NEIGHBOURS {
                let (Some(row), Some(column)) = (
                    cell.row().checked_add_signed(dr),
                    cell.column().checked_add_signed(dc),
                ) else {
                    continue;
                };
                let pos = CellPos::new(row, column);
                if pos.in_range(BOARD_SIZE) && !view.is_revealed(row, column) && !out.contains(&pos)
                {
                    out.push(pos);
                }
            }
        }
        out
    }

    /// Pick a target: a neighbour of an open hit if there is one, otherwise
    /// an untouched checkerboard cell, otherwise any untouched cell.
    pub fn choose(rng: &mut SmallRng, view: &OpponentView) -> CellPos {
        let targets = Self::targets(view);
        if !targets.is_empty() {
            return targets[rng.random_range(0..targets.len())];
        }
        let untouched: Vec<CellPos> = view.untouched_cells().collect();
        let parity: Vec<CellPos> = untouched
            .iter()
            .copied()
            .filter(|p| (p.row + p.column) % 2 == 0)
            .collect();
        let pool = if parity.is_empty() { &untouched } else { &parity };
        if pool.is_empty() {
            return CellPos::new(0, 0);
        }
        pool[rng.random_range(0..pool.len())]
    }
}

impl Player for AiPlayer {
    fn arrange_fleet(&mut self, rng: &mut SmallRng, board: &mut OwnBoard) -> Result<(), BoardError> {
        board.randomize(rng).map(|_| ())
    }

    fn select_target(&mut self, rng: &mut SmallRng, view: &OpponentView) -> CellPos {
        Self::choose(rng, view)
    }
}
