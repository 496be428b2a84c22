use alloc::boxed::Box;
use rand::rngs::SmallRng;

use crate::{
    player::Player,
    session::{GameState, Outcome, Session},
    transport::Transport,
};

/// Drives one [`Session`]: asks the player for local input, feeds inbound
/// messages in arrival order, and flushes the session's outbox to the
/// transport after every step.
pub struct PlayerNode {
    player: Box<dyn Player>,
    session: Session,
    transport: Box<dyn Transport>,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, session: Session, transport: Box<dyn Transport>) -> Self {
        Self {
            player,
            session,
            transport,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Play until the session finishes. Transport failures end the game
    /// with an error; the session is not resumed.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<Outcome> {
        if let Some(board) = self.session.placement_board() {
            self.player.arrange_fleet(rng, board)?;
        }
        loop {
            self.player.observe(&self.session);
            self.flush().await?;
            if let Some(outcome) = self.session.outcome() {
                log::info!(
                    "game over: {:?} after {} shot(s) in {:?}",
                    outcome,
                    self.session.shots_fired(),
                    self.session.elapsed()
                );
                return Ok(outcome);
            }

            match self.session.state() {
                GameState::Begin | GameState::EnemyReady => {
                    self.session.ready();
                    if let Some(board) = self.session.placement_board() {
                        self.player.arrange_fleet(rng, board)?;
                    }
                }
                GameState::MyTurn if self.session.can_fire() => {
                    let target = self
                        .player
                        .select_target(rng, self.session.opponent_view());
                    self.session.fire_at(target.row, target.column);
                }
                _ => {
                    let msg = self.transport.recv().await?;
                    log::trace!("received {:?}", msg);
                    self.session.handle_message(msg);
                }
            }
        }
    }

    async fn flush(&mut self) -> anyhow::Result<()> {
        for msg in self.session.take_outgoing() {
            log::trace!("sending {:?}", msg);
            self.transport.send(msg).await?;
        }
        Ok(())
    }
}
