//! Text rendering of boards and session status for terminal front ends.
//!
//! Rendering only reads the model; nothing here feeds back into a session.

use core::fmt;

use crate::board::{CellState, OwnBoard};
use crate::common::CellPos;
use crate::config::BOARD_SIZE;
use crate::session::{GameState, Session};
use crate::view::OpponentView;

/// Letter-number label of a cell, e.g. `B4` for row 3, column 1.
pub fn coord_label(pos: CellPos) -> String {
    let col = (b'A' + pos.column as u8) as char;
    format!("{}{}", col, pos.row + 1)
}

/// Parse a letter-number label such as `A5` or `j10`.
pub fn parse_coord(input: &str) -> Result<CellPos, String> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or_else(|| "Empty input".to_string())?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let column = (col_ch as u8 - b'A') as usize;
    if column >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str = chars.as_str();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(CellPos::new(row - 1, column))
}

fn write_grid<F>(f: &mut fmt::Formatter<'_>, glyph: F) -> fmt::Result
where
    F: Fn(usize, usize) -> char,
{
    write!(f, "   ")?;
    for c in 0..BOARD_SIZE {
        write!(f, " {}", (b'A' + c as u8) as char)?;
    }
    writeln!(f)?;
    for r in 0..BOARD_SIZE {
        write!(f, "{:2} ", r + 1)?;
        for c in 0..BOARD_SIZE {
            write!(f, " {}", glyph(r, c))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Own board: `S` ship, `X` hit, `o` miss, `.` water.
pub struct OwnBoardDisplay<'a>(pub &'a OwnBoard);

impl fmt::Display for OwnBoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let own = self.0;
        write_grid(f, |r, c| match own.cell_state(r, c) {
            CellState::Hit => 'X',
            CellState::Miss => 'o',
            CellState::Untouched => match own.board().cell(r, c).and_then(|x| x.ship_index()) {
                Some(_) => 'S',
                None => '.',
            },
        })?;
        for (i, ship) in own.fleet().iter().enumerate() {
            let (row, column) = ship.origin();
            writeln!(
                f,
                "  #{} size {} at {} {} {}",
                i + 1,
                ship.size(),
                coord_label(CellPos::new(row, column)),
                if ship.is_vertical() { "V" } else { "H" },
                if ship.is_sunk() { "SUNK" } else { "" },
            )?;
        }
        Ok(())
    }
}

/// Opponent view: `#` sunk ship, `X` hit, `o` miss, `.` unknown.
pub struct OpponentViewDisplay<'a>(pub &'a OpponentView);

impl fmt::Display for OpponentViewDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        write_grid(f, |r, c| match view.cell_state(r, c) {
            CellState::Hit if !view.is_open_hit(r, c) => '#',
            CellState::Hit => 'X',
            CellState::Miss => 'o',
            CellState::Untouched => '.',
        })
    }
}

/// Both boards plus the status line.
pub struct SessionDisplay<'a>(pub &'a Session);

impl fmt::Display for SessionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let firing = if session.can_fire() { "armed" } else { "holding" };
        writeln!(f, "Enemy board ({}):", firing)?;
        write!(f, "{}", OpponentViewDisplay(session.opponent_view()))?;
        writeln!(f, "\nYour board:")?;
        write!(f, "{}", OwnBoardDisplay(session.own_board()))?;
        if session.state() == GameState::Finished {
            let secs = session.elapsed().as_secs();
            writeln!(f, "\n{} ({}m {:02}s)", session.status(), secs / 60, secs % 60)
        } else {
            writeln!(f, "\n{}", session.status())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parser() {
        let pos = CellPos::new(9, 2);
        assert_eq!(coord_label(pos), "C10");
        assert_eq!(parse_coord("c10"), Ok(pos));
    }

    #[test]
    fn parser_rejects_off_board_labels() {
        assert!(parse_coord("K1").is_err());
        assert!(parse_coord("A0").is_err());
        assert!(parse_coord("A11").is_err());
        assert!(parse_coord("5A").is_err());
        assert!(parse_coord("").is_err());
    }

    #[test]
    fn own_board_shows_ship_and_shots() {
        let mut own = OwnBoard::new(&[2]).unwrap();
        own.resolve_shot(0, 0).unwrap();
        own.resolve_shot(5, 5).unwrap();
        let text = OwnBoardDisplay(&own).to_string();
        let first_row = text.lines().nth(1).unwrap();
        assert!(first_row.starts_with(" 1  X S ."));
        assert!(text.lines().nth(6).unwrap().contains('o'));
    }
}
