use std::{fmt::Display, ops::AddAssign};

use crate::core::definitions::{InvalidMoveError, Move};
use crate::core::game::{Game, GameStatus};

/// Leaf counters of a perft run. Everything except `nodes` describes the
/// moves of the last ply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
    pub stalemates: usize,
}

impl PerftResult {
    pub fn combine(self, other: PerftResult) -> Self {
        PerftResult {
            nodes: self.nodes + other.nodes,
            captures: self.captures + other.captures,
            promotions: self.promotions + other.promotions,
            checks: self.checks + other.checks,
            checkmates: self.checkmates + other.checkmates,
            stalemates: self.stalemates + other.stalemates,
        }
    }
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} pr: {:<4} Ch: {:<4} CM: {:<4} SM: {:4}",
            self.nodes,
            self.captures,
            self.promotions,
            self.checks,
            self.checkmates,
            self.stalemates
        )
    }
}

fn count_perft_result(game: &Game) -> Result<PerftResult, InvalidMoveError> {
    let mut result = PerftResult::default();
    for _move in game.all_valid_moves(game.team_turn()) {
        result.nodes += 1;
        if game.board().get_piece(_move.end()).is_some() {
            result.captures += 1;
        }
        if _move.promotion().is_some() {
            result.promotions += 1;
        }
        let mut next = game.clone();
        next.make_move(_move)?;
        match next.status(next.team_turn()) {
            GameStatus::Ongoing => (),
            GameStatus::Check => result.checks += 1,
            GameStatus::Checkmate => {
                result.checks += 1;
                result.checkmates += 1;
            }
            GameStatus::Stalemate => result.stalemates += 1,
        }
    }
    Ok(result)
}

/// Walks the legal move tree of `game` down to `depth` plies.
pub fn perft(game: &Game, depth: usize) -> Result<PerftResult, InvalidMoveError> {
    match depth {
        0 => Ok(PerftResult {
            nodes: 1,
            ..Default::default()
        }),
        1 => count_perft_result(game),
        _ => {
            let mut result = PerftResult::default();
            for _move in game.all_valid_moves(game.team_turn()) {
                let mut next = game.clone();
                next.make_move(_move)?;
                result += perft(&next, depth - 1)?;
            }
            Ok(result)
        }
    }
}

/// Perft split by the first move, handy to find which subtree diverges.
pub fn perft_divide(game: &Game, depth: usize) -> Result<Vec<(Move, PerftResult)>, InvalidMoveError> {
    if depth == 0 {
        return Ok(Vec::new());
    }
    game.all_valid_moves(game.team_turn())
        .into_iter()
        .map(|_move| -> Result<(Move, PerftResult), InvalidMoveError> {
            let mut next = game.clone();
            next.make_move(_move)?;
            Ok((_move, perft(&next, depth - 1)?))
        })
        .collect()
}
