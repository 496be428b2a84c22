//! Sources of local input for a session.
//!
//! - [`AiPlayer`]: computer player, random layout and hunt/target firing
//! - [`CliPlayer`]: interactive terminal player

use rand::rngs::SmallRng;

use crate::board::OwnBoard;
use crate::common::{BoardError, CellPos};
use crate::session::Session;
use crate::view::OpponentView;

/// Interface implemented by the different player types.
pub trait Player: Send {
    /// Arrange the fleet before declaring ready. Called again whenever the
    /// session rejects the layout.
    fn arrange_fleet(&mut self, rng: &mut SmallRng, board: &mut OwnBoard) -> Result<(), BoardError>;

    /// Choose the next cell of the opponent board to fire at.
    fn select_target(&mut self, rng: &mut SmallRng, view: &OpponentView) -> CellPos;

    /// Called after every step of the session.
    fn observe(&mut self, _session: &Session) {}
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;
