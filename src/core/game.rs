use log::{debug, trace};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::core::definitions::{InvalidMoveError, Move, ParseFenError, Position};
use crate::core::engine::{Board, Color};

/// Outcome of the position for one side. Nothing here locks the game, it is
/// derived from the current board every time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    team_turn: Color,
}

impl Game {
    /// Standard starting position, White to move.
    pub fn new() -> Game {
        Game::with_board(Board::default(), Color::White)
    }

    pub fn with_board(board: Board, team_turn: Color) -> Game {
        Game { board, team_turn }
    }

    pub fn from_fen(fen: &str) -> Result<Game, ParseFenError> {
        let (board, team_turn) = Board::from_fen(fen)?;
        Ok(Game::with_board(board, team_turn))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn team_turn(&self) -> Color {
        self.team_turn
    }

    pub fn set_team_turn(&mut self, team_turn: Color) {
        self.team_turn = team_turn;
    }

    /// Legal moves of the piece at `position`, empty if the cell is empty.
    pub fn valid_moves(&self, position: Position) -> Vec<Move> {
        let Some(piece) = self.board.get_piece(position) else {
            return Vec::new();
        };
        piece
            .piece_moves(&self.board, position)
            .into_iter()
            .filter(|_move| self.is_move_safe(_move, piece.color()))
            .collect()
    }

    /// Legal moves of every `color` piece, pieces taken in row-major order.
    pub fn all_valid_moves(&self, color: Color) -> Vec<Move> {
        self.board
            .iter_pieces()
            .filter(|(_, piece)| piece.color() == color)
            .flat_map(|(pos, _)| self.valid_moves(pos))
            .collect()
    }

    pub fn make_move(&mut self, _move: Move) -> Result<(), InvalidMoveError> {
        let start = _move.start();
        let piece = self
            .board
            .get_piece(start)
            .ok_or(InvalidMoveError::EmptySquare(start))?;
        if piece.color() != self.team_turn {
            debug!("Rejected {_move}: {} piece moved on {} turn", piece.color(), self.team_turn);
            return Err(InvalidMoveError::WrongTurn {
                position: start,
                expected: self.team_turn,
                found: piece.color(),
            });
        }
        if !self.valid_moves(start).contains(&_move) {
            debug!("Rejected {_move}: not among legal moves of {piece:?}");
            return Err(InvalidMoveError::Illegal(_move));
        }
        self.board.execute(_move);
        self.team_turn = self.team_turn.opposite();
        debug!("{} played {_move}", piece.color());
        Ok(())
    }

    /// Plays a uniformly chosen legal move for the side to move.
    pub fn make_random_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Move> {
        let chosen_move = self
            .all_valid_moves(self.team_turn)
            .into_iter()
            .choose(rng)?;
        self.make_move(chosen_move).ok().map(|_| chosen_move)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.board.king_position(color)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_checked(color)
    }

    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_valid_move(color)
    }

    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_valid_move(color)
    }

    pub fn status(&self, color: Color) -> GameStatus {
        match (self.is_in_check(color), self.has_valid_move(color)) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Stops at the first legal move found.
    fn has_valid_move(&self, color: Color) -> bool {
        self.board
            .iter_pieces()
            .filter(|(_, piece)| piece.color() == color)
            .any(|(pos, piece)| {
                piece
                    .piece_moves(&self.board, pos)
                    .iter()
                    .any(|_move| self.is_move_safe(_move, color))
            })
    }

    /// Plays `_move` on a scratch copy of the board and looks at the mover's king.
    /// Promotion is ignored here, the moved piece keeps its type.
    fn is_move_safe(&self, _move: &Move, color: Color) -> bool {
        let mut board = self.board.clone();
        board.relocate(_move.start(), _move.end());
        let safe = !board.is_checked(color);
        if !safe {
            trace!("Discarding {_move}: {color} king would be attacked");
        }
        safe
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
