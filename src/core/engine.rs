use std::fmt::{Debug, Display};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::definitions::{Move, ParseFenError, Position};
use crate::core::utils::{in_direction, leaps, ITER_INDEX};

/** Tables directions for pieces, `(row, column)` steps */
const BISHOP_DIR: &[(i8, i8)] = &[(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ROOK_DIR: &[(i8, i8)] = &[(1, 0), (0, -1), (-1, 0), (0, 1)];
const QUEEN_DIR: &[(i8, i8)] = &[
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
];

/** Possible moves for pieces */
const KING_MOVES: &[(i8, i8)] = QUEEN_DIR;
const KNIGHT_MOVES: &[(i8, i8)] = &[
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/** Pawn ranks, kept absolute for each side */
const WHITE_PAWN_HOME_ROW: u8 = 2;
const BLACK_PAWN_HOME_ROW: u8 = 7;
const WHITE_PROMOTION_ROW: u8 = 8;
const BLACK_PROMOTION_ROW: u8 = 1;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(PartialEq, Eq, Hash, Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a pawn push.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_home_row(self) -> u8 {
        match self {
            Color::White => WHITE_PAWN_HOME_ROW,
            Color::Black => BLACK_PAWN_HOME_ROW,
        }
    }

    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => WHITE_PROMOTION_ROW,
            Color::Black => BLACK_PROMOTION_ROW,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    /** Pieces a pawn may turn into, in the order they are generated */
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// FEN letter, upper case.
    pub fn symbol(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Rook => 'R',
            PieceType::Pawn => 'P',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<PieceType> {
        match symbol.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'R' => Some(PieceType::Rook),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/** Piece doesn't know where it stands: two pieces of the same color and type
 * are equal wherever they are on the board. */
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    kind: PieceType,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Piece {
        Piece { color, kind }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn type_(&self) -> PieceType {
        self.kind
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        PieceType::from_symbol(symbol).map(|kind| Piece::new(color, kind))
    }

    /// Pseudo-legal moves of this piece standing at `position`: movement and
    /// occupancy rules only, own king safety is not considered.
    pub fn piece_moves(&self, board: &Board, position: Position) -> Vec<Move> {
        let mut possible_moves = Vec::with_capacity(28);
        match self.kind {
            // Special cases
            PieceType::Pawn => self.pawn_moves(board, position, &mut possible_moves),
            PieceType::Knight => self.leap_moves(board, position, KNIGHT_MOVES, &mut possible_moves),
            PieceType::King => self.leap_moves(board, position, KING_MOVES, &mut possible_moves),
            // Sliding pieces
            PieceType::Bishop => self.ray_moves(board, position, BISHOP_DIR, &mut possible_moves),
            PieceType::Rook => self.ray_moves(board, position, ROOK_DIR, &mut possible_moves),
            PieceType::Queen => self.ray_moves(board, position, QUEEN_DIR, &mut possible_moves),
        }
        possible_moves
    }

    fn pawn_moves(&self, board: &Board, position: Position, possible_moves: &mut Vec<Move>) {
        let step = self.color.forward();
        let promotion_row = self.color.promotion_row();
        let mut push = |end: Position| {
            if end.row() == promotion_row {
                possible_moves.extend(
                    PieceType::PROMOTIONS
                        .iter()
                        .map(|kind| Move::new(position, end, Some(*kind))),
                );
            } else {
                possible_moves.push(Move::new(position, end, None));
            }
        };
        // push
        if let Some(front_pos) = position.offset(step, 0) {
            if board.get_piece(front_pos).is_none() {
                push(front_pos);
                // double push
                if position.row() == self.color.pawn_home_row() {
                    if let Some(pos) = front_pos.offset(step, 0) {
                        if board.get_piece(pos).is_none() {
                            push(pos);
                        }
                    }
                }
            }
        }
        // capture
        for side in [-1, 1] {
            let Some(pos) = position.offset(step, side) else {
                continue;
            };
            if board
                .get_piece(pos)
                .is_some_and(|target| target.color != self.color)
            {
                push(pos);
            }
        }
    }

    fn leap_moves(
        &self,
        board: &Board,
        position: Position,
        offsets: &'static [(i8, i8)],
        possible_moves: &mut Vec<Move>,
    ) {
        for pos in leaps(position, offsets) {
            match board.get_piece(pos) {
                Some(target) if target.color == self.color => (),
                _ => possible_moves.push(Move::new(position, pos, None)),
            }
        }
    }

    fn ray_moves(
        &self,
        board: &Board,
        position: Position,
        directions: &[(i8, i8)],
        possible_moves: &mut Vec<Move>,
    ) {
        for dir in directions {
            for pos in in_direction(position, *dir) {
                match board.get_piece(pos) {
                    None => possible_moves.push(Move::new(position, pos, None)),
                    Some(target) => {
                        if target.color != self.color {
                            possible_moves.push(Move::new(position, pos, None));
                        }
                        break;
                    }
                }
            }
        }
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("color", &self.color)
            .field("type", &self.kind)
            .finish()
    }
}

/** 8x8 grid, `cells[row - 1][column - 1]` */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Board without any piece on it.
    pub fn new() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Board and side to move from a FEN record. Only the placement and active
    /// color fields are read, castling/en passant/clock fields are ignored.
    pub fn from_fen(fen: &str) -> Result<(Board, Color), ParseFenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(ParseFenError::MissingPlacement)?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseFenError::InvalidRankCount(ranks.len()));
        }
        let mut board = Board::new();
        // FEN lists rank 8 first
        for (rank, row) in ranks.into_iter().zip((1..=8u8).rev()) {
            let mut cells = 0usize;
            for symbol in rank.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    cells += skip as usize;
                    continue;
                }
                let piece = Piece::from_symbol(symbol).ok_or(ParseFenError::InvalidPiece(symbol))?;
                cells += 1;
                if cells <= 8 {
                    board.add_piece(Position::new(row, cells as u8), Some(piece));
                }
            }
            if cells != 8 {
                return Err(ParseFenError::InvalidRankLength { rank: row, cells });
            }
        }
        let color = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(ParseFenError::InvalidColor(other.to_string())),
        };
        Ok((board, color))
    }

    /// Overwrite the cell, `None` clears it.
    pub fn add_piece(&mut self, position: Position, piece: Option<Piece>) {
        match position.index() {
            Some((row, column)) => self.cells[row][column] = piece,
            None => warn!("Ignoring placement outside of the board at {position}"),
        }
    }

    pub fn get_piece(&self, position: Position) -> Option<Piece> {
        position
            .index()
            .and_then(|(row, column)| self.cells[row][column])
    }

    /// Standard starting arrangement, everything else is cleared.
    pub fn reset_board(&mut self) {
        self.cells = [[None; 8]; 8];
        for (column, kind) in (1..=8u8).zip(BACK_RANK) {
            self.add_piece(Position::new(1, column), Some(Piece::new(Color::White, kind)));
            self.add_piece(
                Position::new(2, column),
                Some(Piece::new(Color::White, PieceType::Pawn)),
            );
            self.add_piece(
                Position::new(7, column),
                Some(Piece::new(Color::Black, PieceType::Pawn)),
            );
            self.add_piece(Position::new(8, column), Some(Piece::new(Color::Black, kind)));
        }
    }

    /// Move whatever stands at `start` to `end`, leaving `start` empty.
    pub fn relocate(&mut self, start: Position, end: Position) {
        let piece = self.get_piece(start);
        self.add_piece(start, None);
        self.add_piece(end, piece);
    }

    /** Execute ***valid*** move, promoting the piece if the move asks for it. */
    pub fn execute(&mut self, _move: Move) {
        let piece = self.get_piece(_move.start()).map(|piece| match _move.promotion() {
            Some(kind) => Piece::new(piece.color(), kind),
            None => piece,
        });
        self.add_piece(_move.start(), None);
        self.add_piece(_move.end(), piece);
    }

    /// Occupied cells in row-major order: row 1 to 8, column 1 to 8.
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        ITER_INDEX
            .iter()
            .filter_map(|&pos| self.get_piece(pos).map(|piece| (pos, piece)))
    }

    /// First king of `color` in row-major order.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.iter_pieces()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceType::King)
            .map(|(pos, _)| pos)
    }

    /// Whether any piece of `attacker` has a pseudo-legal move ending on `position`.
    pub fn is_attacked(&self, position: Position, attacker: Color) -> bool {
        self.iter_pieces()
            .filter(|(_, piece)| piece.color == attacker)
            .any(|(pos, piece)| {
                piece
                    .piece_moves(self, pos)
                    .iter()
                    .any(|_move| _move.end() == position)
            })
    }

    /// A side without king is never in check.
    pub fn is_checked(&self, color: Color) -> bool {
        self.king_position(color)
            .map(|king| self.is_attacked(king, color.opposite()))
            .unwrap_or(false)
    }
}

impl Default for Board {
    fn default() -> Self {
        let mut board = Board::new();
        board.reset_board();
        board
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (1..=8u8).rev() {
            write!(f, "{row} ")?;
            for column in 1..=8u8 {
                let symbol = self
                    .get_piece(Position::new(row, column))
                    .map(|piece| piece.symbol())
                    .unwrap_or('.');
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
