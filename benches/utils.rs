use chess_rules::{utils::perft, Board, Game, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn all_valid_moves(game: &Game) -> usize {
    game.board()
        .iter_pieces()
        .map(|(pos, _)| game.valid_moves(pos).len())
        .sum()
}

fn all_piece_moves(board: &Board) -> usize {
    board
        .iter_pieces()
        .map(|(pos, piece)| piece.piece_moves(board, pos).len())
        .sum()
}

fn stupid_game(mut game: Game, max_steps: usize) -> Game {
    let mut rng = rand::thread_rng();
    for _ in 0..max_steps {
        if game.make_random_move(&mut rng).is_none() {
            break;
        }
    }
    game
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("piece moves", |b| {
        b.iter(|| all_piece_moves(black_box(&Board::default())))
    });
    c.bench_function("valid moves", |b| {
        b.iter(|| all_valid_moves(black_box(&Game::default())))
    });
    c.bench_function("queen valid moves", |b| {
        let game = Game::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        b.iter(|| black_box(&game).valid_moves(Position::new(4, 4)))
    });
    c.bench_function("perft 2", |b| {
        b.iter(|| perft(black_box(&Game::default()), 2).unwrap())
    });
    c.bench_function("stupid game 100", |b| {
        b.iter(|| {
            let game: Game = Default::default();
            stupid_game(game, 100)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
