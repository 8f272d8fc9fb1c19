use std::env;

use anyhow::{bail, Context};
use chess_rules::utils::{perft_divide, PerftResult};
use chess_rules::Game;
use log::info;

const USAGE: &str = "Usage: perft-debug <fen> <depth> [expected]";

fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args: Vec<String> = env::args().collect();
    let fen = args.get(1).context(USAGE)?;
    let depth: usize = args
        .get(2)
        .context(USAGE)?
        .parse()
        .context("Depth must be a non-negative number")?;
    if depth == 0 {
        bail!("Depth must be at least 1");
    }
    let expected: Option<usize> = args
        .get(3)
        .map(|arg| arg.parse())
        .transpose()
        .context("Expected node count must be a non-negative number")?;
    let game = Game::from_fen(fen).with_context(|| format!("Failed to parse FEN `{fen}`"))?;
    info!("Perft to depth {depth}, {} to move\n{}", game.team_turn(), game.board());

    let mut total = PerftResult::default();
    for (_move, result) in perft_divide(&game, depth)? {
        println!(" {_move} : {result}");
        total += result;
    }
    println!("+ total: {total}");
    match expected {
        Some(expected) if total.nodes != expected => {
            bail!("Found {} nodes, expected {expected}", total.nodes)
        }
        _ => Ok(()),
    }
}
