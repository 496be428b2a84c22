use alloc::vec::Vec;

use crate::common::BoardError;

/// Width and height of every board.
pub const BOARD_SIZE: usize = 10;
/// Number of cells on a board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Fleet used when nothing else is configured: a single destroyer.
pub const DEFAULT_FLEET: [usize; 1] = [2];
/// The ten-ship fleet of the classic paper game.
pub const CLASSIC_FLEET: [usize; 10] = [5, 4, 4, 3, 3, 3, 2, 2, 2, 2];

/// Rejection-sampling rounds before randomization falls back to first-fit.
pub const MAX_RANDOMIZE_ROUNDS: usize = 10_000;

/// Runtime game settings shared by both peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    fleet: Vec<usize>,
}

impl GameConfig {
    /// Validate ship sizes and build a configuration.
    ///
    /// Every size must be in `1..=BOARD_SIZE` and the fleet must cover less
    /// than half of the board, which keeps random placement quick.
    pub fn new(fleet: Vec<usize>) -> Result<Self, BoardError> {
        if fleet.is_empty() {
            return Err(BoardError::InvalidFleet);
        }
        if let Some(&bad) = fleet.iter().find(|&&s| s == 0 || s > BOARD_SIZE) {
            return Err(BoardError::InvalidShipSize(bad));
        }
        if fleet.iter().sum::<usize>() * 2 > BOARD_CELLS {
            return Err(BoardError::InvalidFleet);
        }
        Ok(Self { fleet })
    }

    pub fn classic() -> Self {
        Self {
            fleet: CLASSIC_FLEET.to_vec(),
        }
    }

    /// Ship sizes in fleet order.
    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    /// Parse a comma separated list of ship sizes, e.g. `"5,4,3"`.
    pub fn parse_fleet(list: &str) -> Result<Self, BoardError> {
        let mut fleet = Vec::new();
        for part in list.split(',') {
            let part = part.trim();
            let size = part
                .parse::<usize>()
                .map_err(|_| BoardError::InvalidFleet)?;
            fleet.push(size);
        }
        Self::new(fleet)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fleet: DEFAULT_FLEET.to_vec(),
        }
    }
}

/// Time allowed to finish writing a frame, or reading one once it has started.
#[cfg(feature = "std")]
pub const FRAME_TIMEOUT: core::time::Duration = core::time::Duration::from_secs(30);

/// Largest accepted frame body in bytes.
#[cfg(feature = "std")]
pub const MAX_FRAME_SIZE: u32 = 64 * 1024;
