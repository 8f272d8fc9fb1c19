use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::engine::{Color, PieceType};

/** Cell of the board: `row` 1 is White's back rank, `column` 1 is the a-file.
 * Range is not checked here, out of board positions are caller's fault. */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    pub const fn new(row: u8, column: u8) -> Position {
        Position { row, column }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn is_valid(&self) -> bool {
        (1..=8).contains(&self.row) && (1..=8).contains(&self.column)
    }

    /// Shifted position, `None` if it falls off the board.
    pub fn offset(&self, d_row: i8, d_column: i8) -> Option<Position> {
        let row = self.row as i16 + d_row as i16;
        let column = self.column as i16 + d_column as i16;
        if (1..=8).contains(&row) && (1..=8).contains(&column) {
            Some(Position::new(row as u8, column as u8))
        } else {
            None
        }
    }

    /// Zero-based `(row, column)` index into the board grid.
    pub(crate) fn index(&self) -> Option<(usize, usize)> {
        if self.is_valid() {
            Some((self.row as usize - 1, self.column as usize - 1))
        } else {
            None
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (b'a' + self.column - 1) as char, self.row)
        } else {
            write!(f, "({},{})", self.row, self.column)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    start: Position,
    end: Position,
    /** set only when a pawn reaches the farthest rank */
    promotion: Option<PieceType>,
}

impl Move {
    pub fn new(start: Position, end: Position, promotion: Option<PieceType>) -> Move {
        Move {
            start,
            end,
            promotion,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn promotion(&self) -> Option<PieceType> {
        self.promotion
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Reasons for `Game::make_move` to refuse a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMoveError {
    #[error("there is no piece at {0}")]
    EmptySquare(Position),
    #[error("piece at {position} is {found}, but it's {expected}'s turn")]
    WrongTurn {
        position: Position,
        expected: Color,
        found: Color,
    },
    #[error("{0} is not a legal move")]
    Illegal(Move),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("FEN record has no piece placement field")]
    MissingPlacement,
    #[error("piece placement describes {0} ranks, expected 8")]
    InvalidRankCount(usize),
    #[error("rank {rank} describes {cells} cells, expected 8")]
    InvalidRankLength { rank: u8, cells: usize },
    #[error("'{0}' is not a piece letter")]
    InvalidPiece(char),
    #[error("'{0}' is not an active color, expected 'w' or 'b'")]
    InvalidColor(String),
}
