//! The turn/session state machine.
//!
//! A [`Session`] owns the player's [`OwnBoard`] and [`OpponentView`]. Local
//! input (`ready`, `fire_at`) and inbound [`Message`]s drive it through
//! [`GameState`]; messages it wants delivered to the peer are queued in an
//! outbox that the caller drains with [`Session::take_outgoing`].

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;

use log::debug;

use crate::board::{BoardEvent, OwnBoard};
use crate::clock::Clock;
use crate::common::CellPos;
use crate::protocol::Message;
use crate::status::StatusMessage;
use crate::view::OpponentView;

/// Phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Placing ships; neither side has declared ready.
    Begin,
    /// The opponent is ready, we are still placing.
    EnemyReady,
    /// We are ready and wait for the opponent.
    IAmReady,
    /// The opponent holds the token.
    EnemyTurn,
    /// We hold the token.
    MyTurn,
    /// One fleet is fully sunk.
    Finished,
}

/// Which end of the connection this session sits on.
///
/// Breaks the tie when both peers declare ready at the same time: the host
/// then hands the first turn to the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Guest,
}

/// Result of a finished game from this player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

pub struct Session {
    role: Role,
    state: GameState,
    status: StatusMessage,
    own: OwnBoard,
    view: OpponentView,
    outbox: VecDeque<Message>,
    pending_shot: Option<CellPos>,
    shots_fired: usize,
    outcome: Option<Outcome>,
    clock: Box<dyn Clock>,
    started_at: u64,
    finished_at: Option<u64>,
}

impl Session {
    /// Start a session around an already arranged board.
    pub fn new(role: Role, own: OwnBoard, clock: Box<dyn Clock>) -> Self {
        let started_at = clock.now_millis();
        Self {
            role,
            state: GameState::Begin,
            status: StatusMessage::GameStart,
            own,
            view: OpponentView::new(),
            outbox: VecDeque::new(),
            pending_shot: None,
            shots_fired: 0,
            outcome: None,
            clock,
            started_at,
            finished_at: None,
        }
    }

    /// Start a session with a randomly arranged fleet, timed by the wall clock.
    #[cfg(feature = "std")]
    pub fn start<R: rand::Rng + ?Sized>(
        role: Role,
        config: &crate::config::GameConfig,
        rng: &mut R,
    ) -> Result<Self, crate::common::BoardError> {
        let mut own = OwnBoard::new(config.fleet())?;
        own.randomize(rng)?;
        Ok(Self::new(role, own, Box::new(crate::clock::StdClock::new())))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn status(&self) -> StatusMessage {
        self.status
    }

    pub fn own_board(&self) -> &OwnBoard {
        &self.own
    }

    pub fn opponent_view(&self) -> &OpponentView {
        &self.view
    }

    /// Mutable access to the own board while ships may still be moved.
    pub fn placement_board(&mut self) -> Option<&mut OwnBoard> {
        if self.own.is_locked() {
            None
        } else {
            Some(&mut self.own)
        }
    }

    /// Firing is enabled on the opponent view.
    pub fn can_fire(&self) -> bool {
        self.state == GameState::MyTurn && self.pending_shot.is_none()
    }

    /// The own board is exposed to incoming shots.
    pub fn under_fire(&self) -> bool {
        self.state == GameState::EnemyTurn
    }

    /// Shot sent and not yet answered.
    pub fn pending_shot(&self) -> Option<CellPos> {
        self.pending_shot
    }

    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.state == GameState::Finished
    }

    /// Time since the session started, frozen once it is finished.
    pub fn elapsed(&self) -> Duration {
        let end = self
            .finished_at
            .unwrap_or_else(|| self.clock.now_millis());
        Duration::from_millis(end.saturating_sub(self.started_at))
    }

    /// Drain messages queued for the peer, oldest first.
    pub fn take_outgoing(&mut self) -> Vec<Message> {
        self.outbox.drain(..).collect()
    }

    /// Local input on the opponent view outside of a turn: declares the
    /// fleet ready, or updates the status if there is nothing to do.
    pub fn ready(&mut self) {
        self.handle_board_event(BoardEvent::Click);
    }

    /// Local input on cell (`row`, `column`) of the opponent view.
    pub fn fire_at(&mut self, row: usize, column: usize) {
        if self.state != GameState::MyTurn {
            self.handle_board_event(BoardEvent::Click);
        }
        if !self.can_fire() {
            return;
        }
        if let Some(event) = self.view.target(row, column) {
            self.handle_board_event(event);
        }
    }

    /// Apply one inbound message.
    pub fn handle_message(&mut self, msg: Message) {
        match msg {
            Message::ReadyToPlay { reply } => self.on_ready_to_play(reply),
            Message::PassToken => self.on_pass_token(),
            Message::BombCell { cell_pos } => self.on_bomb_cell(cell_pos),
            Message::BombResponse(result) => self.on_bomb_response(result),
        }
    }

    fn handle_board_event(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::Click => match self.state {
                GameState::Begin | GameState::EnemyReady => self.ready_to_start(),
                GameState::IAmReady => self.set_status(StatusMessage::WaitForStart),
                GameState::EnemyTurn => self.set_status(StatusMessage::Wait),
                GameState::MyTurn | GameState::Finished => {}
            },
            BoardEvent::BombCell(cell_pos) => {
                self.pending_shot = Some(cell_pos);
                self.shots_fired += 1;
                self.send(Message::BombCell { cell_pos });
            }
            BoardEvent::PlayerMissed(result) | BoardEvent::Hit(result) => {
                self.send(Message::BombResponse(result));
            }
            BoardEvent::ShipSunk(result) => {
                self.send(Message::BombResponse(result));
                self.set_status(StatusMessage::LostShip);
            }
            BoardEvent::AllSunk(result) => {
                self.set_status(StatusMessage::LostGame);
                self.finish(Outcome::Lost);
                self.send(Message::BombResponse(result));
            }
        }
    }

    fn ready_to_start(&mut self) {
        if !self.own.validate() {
            self.set_status(StatusMessage::InvalidPositions);
            return;
        }
        self.own.lock();
        match self.state {
            GameState::Begin => {
                self.send(Message::ReadyToPlay { reply: false });
                self.transition(GameState::IAmReady);
                self.set_status(StatusMessage::WaitForStart);
            }
            GameState::EnemyReady => {
                self.send(Message::ReadyToPlay { reply: true });
                self.pass_token();
                self.set_status(StatusMessage::Wait);
            }
            _ => {}
        }
    }

    fn on_ready_to_play(&mut self, reply: bool) {
        match self.state {
            GameState::Begin => self.transition(GameState::EnemyReady),
            GameState::IAmReady => {
                self.set_status(StatusMessage::GameOn);
                // Both sides readied before seeing each other; exactly one
                // of them must hand out the first turn.
                if !reply && self.role == Role::Host {
                    self.pass_token();
                }
            }
            state => debug!("ignoring readyToPlay in {:?}", state),
        }
    }

    fn on_pass_token(&mut self) {
        match self.state {
            GameState::IAmReady | GameState::EnemyTurn => {
                self.transition(GameState::MyTurn);
                self.set_status(StatusMessage::YourTurn);
            }
            state => debug!("ignoring passToken in {:?}", state),
        }
    }

    fn on_bomb_cell(&mut self, pos: CellPos) {
        if self.state != GameState::EnemyTurn {
            debug!("ignoring bombCell {:?} in {:?}", pos, self.state);
            return;
        }
        match self.own.resolve_shot(pos.row, pos.column) {
            Ok(Some(event)) => self.handle_board_event(event),
            Ok(None) => debug!("ignoring repeated bombCell {:?}", pos),
            Err(e) => debug!("ignoring bombCell {:?}: {}", pos, e),
        }
    }

    fn on_bomb_response(&mut self, result: crate::common::ShotResult) {
        if self.state != GameState::MyTurn || self.pending_shot != Some(result.cell_pos) {
            debug!(
                "ignoring bombResponse {:?} in {:?}",
                result.cell_pos, self.state
            );
            return;
        }
        self.pending_shot = None;
        self.view.apply_revealed_result(&result);
        let status = match (result.hit, result.ship.is_some()) {
            (false, _) => StatusMessage::Miss,
            (true, false) => StatusMessage::Hit,
            (true, true) => StatusMessage::ShipSunk,
        };
        self.set_status(status);
        if result.all_sunk {
            self.set_status(StatusMessage::Won);
            self.finish(Outcome::Won);
        } else {
            self.pass_token();
        }
    }

    fn pass_token(&mut self) {
        self.transition(GameState::EnemyTurn);
        self.send(Message::PassToken);
    }

    fn finish(&mut self, outcome: Outcome) {
        self.transition(GameState::Finished);
        self.outcome = Some(outcome);
        self.finished_at = Some(self.clock.now_millis());
    }

    fn transition(&mut self, next: GameState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn set_status(&mut self, status: StatusMessage) {
        self.status = status;
    }

    fn send(&mut self, msg: Message) {
        self.outbox.push_back(msg);
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("pending_shot", &self.pending_shot)
            .field("shots_fired", &self.shots_fired)
            .field("outcome", &self.outcome)
            .finish()
    }
}
