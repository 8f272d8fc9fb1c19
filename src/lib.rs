pub mod core;
pub mod utils;

// module re-exports
pub use crate::core::definitions::{InvalidMoveError, Move, ParseFenError, Position};
pub use crate::core::engine::{Board, Color, Piece, PieceType};
pub use crate::core::game::{Game, GameStatus};
