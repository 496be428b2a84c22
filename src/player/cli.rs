use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use super::{AiPlayer, Player};
use crate::board::OwnBoard;
use crate::common::{BoardError, CellPos};
use crate::render::{coord_label, parse_coord, OwnBoardDisplay, SessionDisplay};
use crate::session::{GameState, Session};
use crate::status::StatusMessage;
use crate::view::OpponentView;

/// Interactive player reading commands from standard input.
#[derive(Debug, Default)]
pub struct CliPlayer {
    last_seen: Option<(GameState, StatusMessage, usize)>,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Prompt and read one trimmed line. End of input reads as an empty line.
fn prompt(text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        log::warn!("failed to read input: {}", e);
    }
    line.trim().to_string()
}

fn ship_number(arg: Option<&str>) -> Result<usize, String> {
    let n: usize = arg
        .ok_or_else(|| "Missing ship number".to_string())?
        .parse()
        .map_err(|_| "Ship number must be a positive integer".to_string())?;
    n.checked_sub(1)
        .ok_or_else(|| "Ships are numbered from 1".to_string())
}

impl Player for CliPlayer {
    fn arrange_fleet(&mut self, rng: &mut SmallRng, board: &mut OwnBoard) -> Result<(), BoardError> {
        println!("Arrange your fleet. Commands:");
        println!("  r          random layout");
        println!("  f N        flip ship N");
        println!("  m N A5     move ship N to A5");
        println!("  <enter>    done");
        loop {
            print!("{}", OwnBoardDisplay(board));
            let line = prompt("> ");
            let mut parts = line.split_whitespace();
            let result = match parts.next() {
                None | Some("done") => {
                    if board.validate() {
                        return Ok(());
                    }
                    Err(StatusMessage::InvalidPositions.text().to_string())
                }
                Some("r") => board.randomize(rng).map(|_| ()).map_err(|e| e.to_string()),
                Some("f") => ship_number(parts.next())
                    .and_then(|i| board.flip(i).map_err(|e| e.to_string())),
                Some("m") => ship_number(parts.next()).and_then(|i| {
                    let pos = parse_coord(parts.next().unwrap_or(""))?;
                    board
                        .move_ship(i, pos.row, pos.column)
                        .map_err(|e| e.to_string())
                }),
                Some(other) => Err(format!("Unknown command '{}'", other)),
            };
            if let Err(e) = result {
                println!("Error: {}", e);
            }
        }
    }

    fn select_target(&mut self, rng: &mut SmallRng, view: &OpponentView) -> CellPos {
        let suggestion = AiPlayer::choose(rng, view);
        loop {
            let line = prompt(&format!("Fire at [{}]: ", coord_label(suggestion)));
            if line.is_empty() {
                return suggestion;
            }
            match parse_coord(&line) {
                Ok(pos) if view.is_revealed(pos.row, pos.column) => {
                    println!("Already fired at {}", coord_label(pos));
                }
                Ok(pos) => return pos,
                Err(e) => println!("Error: {}", e),
            }
        }
    }

    fn observe(&mut self, session: &Session) {
        let seen = (session.state(), session.status(), session.shots_fired());
        if self.last_seen == Some(seen) {
            return;
        }
        self.last_seen = Some(seen);
        println!();
        print!("{}", SessionDisplay(session));
    }
}
