//! Rules Core Benchmarks
//!
//! Performance benchmarks for move generation, legality and attack detection
//! using Criterion.

use chess_rules::move_gen::{is_square_attacked, possible_moves};
use chess_rules::validation::{all_legal_moves, check_move, refresh_status};
use chess_rules::{GameEngine, GameState, PieceColor, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Open middlegame with fairy pieces in play
const FAIRY_FEN: &str = "r1b1kb1r/pp1p1ppp/2n1pc2/8/2A5/2N1PN2/PPPP1PPP/R1BMK2R w KQkq - 4 6";

fn sq(notation: &str) -> Position {
    Position::from_notation(notation).unwrap()
}

fn bench_possible_moves_starting(c: &mut Criterion) {
    let state = GameState::standard();

    c.bench_function("possible_moves_starting_position", |b| {
        b.iter(|| {
            let total: usize = state
                .board
                .pieces_of_color(PieceColor::White)
                .into_iter()
                .map(|(from, _)| possible_moves(&state.board, from).len())
                .sum();
            black_box(total)
        })
    });
}

fn bench_all_legal_moves(c: &mut Criterion) {
    let start = GameState::standard();
    let fairy = GameState::from_fen(FAIRY_FEN).unwrap();

    c.bench_function("all_legal_moves_starting", |b| {
        b.iter(|| black_box(all_legal_moves(&start).len()))
    });
    c.bench_function("all_legal_moves_fairy", |b| {
        b.iter(|| black_box(all_legal_moves(&fairy).len()))
    });
}

fn bench_attack_detection(c: &mut Criterion) {
    let fairy = GameState::from_fen(FAIRY_FEN).unwrap();

    c.bench_function("is_square_attacked_fairy", |b| {
        b.iter(|| black_box(is_square_attacked(&fairy.board, sq("e8"), PieceColor::White)))
    });
}

fn bench_check_move(c: &mut Criterion) {
    let state = GameState::standard();

    c.bench_function("check_move_e2e4", |b| {
        b.iter(|| black_box(check_move(&state, sq("e2"), sq("e4")).is_ok()))
    });
}

fn bench_refresh_status(c: &mut Criterion) {
    let fairy = GameState::from_fen(FAIRY_FEN).unwrap();

    c.bench_function("refresh_status_fairy", |b| {
        b.iter(|| {
            let mut state = fairy.clone();
            black_box(refresh_status(&mut state))
        })
    });
}

fn bench_coordinator_move(c: &mut Criterion) {
    c.bench_function("coordinator_four_moves", |b| {
        b.iter(|| {
            let engine = GameEngine::new();
            for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
                engine.try_make_move(sq(from), sq(to));
            }
            black_box(engine.version())
        })
    });
}

criterion_group!(
    benches,
    bench_possible_moves_starting,
    bench_all_legal_moves,
    bench_attack_detection,
    bench_check_move,
    bench_refresh_status,
    bench_coordinator_move,
);
criterion_main!(benches);
