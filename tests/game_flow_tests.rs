//! Game Flow Integration Tests
//!
//! Full games driven through the public [`GameEngine`] API:
//! - Mates, stalemate and the fifty-move draw
//! - Castling, en passant and promotion side effects
//! - Concurrent callers on one engine
//! - An external engine speaking UCI text

use chess_rules::notation::{parse_bestmove, position_command};
use chess_rules::{
    AdapterError, EngineAdapter, Evaluation, GameEngine, GameEvent, GameResult, PieceColor,
    PieceType, Position,
};
use std::sync::Arc;
use std::thread;

fn sq(notation: &str) -> Position {
    Position::from_notation(notation).unwrap()
}

fn play(engine: &GameEngine, moves: &[&str]) {
    for uci in moves {
        let (from, to) = uci.split_at(2);
        assert!(
            engine.try_make_move(sq(from), sq(to)),
            "{uci} should be legal in {}",
            engine.to_fen()
        );
    }
}

fn engine_from(fen: &str) -> GameEngine {
    let engine = GameEngine::new();
    engine.load_fen(fen).unwrap();
    engine
}

// ============================================================================
// Game endings
// ============================================================================

#[test]
fn test_fools_mate() {
    let engine = GameEngine::new();
    play(&engine, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    let state = engine.snapshot();
    assert!(state.is_checkmate);
    assert_eq!(state.result, GameResult::BlackWins);
    assert_eq!(engine.move_history_notation(), "1. f3 e5 2. g4 Qh4#");
    assert!(!engine.try_make_move(sq("e1"), sq("f2")), "game is over");
}

#[test]
fn test_back_rank_mate() {
    let engine = engine_from("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    play(&engine, &["a1a8"]);

    assert_eq!(engine.result(), GameResult::WhiteWins);
    assert_eq!(engine.last_move().unwrap().to_notation(), "Ra8#");
}

#[test]
fn test_stalemate_after_quiet_queen_move() {
    let engine = engine_from("7k/8/5K2/8/8/8/8/6Q1 w - - 0 1");
    play(&engine, &["g1g6"]);

    let state = engine.snapshot();
    assert!(state.is_stalemate);
    assert!(!state.is_check);
    assert_eq!(state.result, GameResult::Stalemate);
}

#[test]
fn test_fifty_move_draw() {
    let engine = engine_from("4k3/8/8/8/8/8/8/4K2R w - - 99 80");
    play(&engine, &["h1h2"]);

    let state = engine.snapshot();
    assert_eq!(state.half_move_clock, 100);
    assert_eq!(state.result, GameResult::Draw);
}

// ============================================================================
// Special moves
// ============================================================================

#[test]
fn test_kingside_castling_in_play() {
    let engine = GameEngine::new();
    play(&engine, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]);

    let state = engine.snapshot();
    let at = |s: &str| state.board.piece_at(sq(s)).map(|p| p.kind);
    assert_eq!(at("g1"), Some(PieceType::King));
    assert_eq!(at("f1"), Some(PieceType::Rook));
    assert_eq!(at("h1"), None);
    assert!(state.last_move().unwrap().is_castling);
    assert!(state.to_fen().contains(" b kq "));
}

#[test]
fn test_queenside_castling_for_black() {
    let engine = engine_from("r3k3/8/8/8/8/8/8/4K3 b q - 0 1");
    play(&engine, &["e8c8"]);

    let state = engine.snapshot();
    assert_eq!(state.board.piece_at(sq("d8")).map(|p| p.kind), Some(PieceType::Rook));
    assert_eq!(engine.last_move().unwrap().to_notation(), "O-O-O");
}

#[test]
fn test_en_passant_capture_and_expiry() {
    let engine = GameEngine::new();
    play(&engine, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(engine.to_fen().contains(" d6 "));

    play(&engine, &["e5d6"]);
    let state = engine.snapshot();
    let record = state.last_move().unwrap();
    assert!(record.is_en_passant);
    assert_eq!(record.to_notation(), "exd6");
    assert!(state.board.piece_at(sq("d5")).is_none(), "captured pawn removed");

    let engine = GameEngine::new();
    play(&engine, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "a6a5"]);
    assert!(!engine.try_make_move(sq("e5"), sq("d6")), "right expired");
}

#[test]
fn test_promotion_with_capture() {
    let engine = engine_from("1n5k/P7/8/8/8/8/8/4K3 w - - 0 1");
    assert!(engine.try_make_move_with_promotion(sq("a7"), sq("b8"), Some(PieceType::Knight)));
    assert_eq!(engine.last_move().unwrap().to_notation(), "axb8=N");
    assert_eq!(engine.snapshot().half_move_clock, 0);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_two_players_on_separate_threads() {
    //! Each side retries its own moves until accepted; turn order makes the
    //! interleaving deterministic
    let engine = Arc::new(GameEngine::new());
    let side = |moves: &'static [&'static str]| {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for uci in moves {
                let (from, to) = uci.split_at(2);
                while !engine.try_make_move(sq(from), sq(to)) {
                    thread::yield_now();
                }
            }
        })
    };

    let white = side(&["e2e4", "g1f3"]);
    let black = side(&["e7e5", "b8c6"]);
    white.join().unwrap();
    black.join().unwrap();

    assert_eq!(engine.move_history_notation(), "1. e4 e5 2. Nf3 Nc6");
    let colors: Vec<PieceColor> = engine.turn_records().iter().map(|r| r.color).collect();
    assert_eq!(
        colors,
        vec![PieceColor::White, PieceColor::Black, PieceColor::White, PieceColor::Black]
    );
}

#[test]
fn test_event_stream_serializes_to_json() {
    let engine = GameEngine::new();
    let events = engine.subscribe();
    play(&engine, &["e2e4"]);

    let lines: Vec<String> = events
        .try_iter()
        .map(|event| serde_json::to_string(&event).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    let first: GameEvent = serde_json::from_str(&lines[0]).unwrap();
    assert!(matches!(first, GameEvent::MoveMade { version: 1, .. }));
}

// ============================================================================
// External engine
// ============================================================================

/// Speaks UCI text the way a process wrapper would
struct UciScript {
    replies: Vec<&'static str>,
    commands: Vec<String>,
}

impl EngineAdapter for UciScript {
    fn suggest_move(&mut self, fen: &str) -> Result<String, AdapterError> {
        self.commands.push(position_command(fen));
        let line = self
            .replies
            .pop()
            .ok_or_else(|| AdapterError::Unavailable("script exhausted".into()))?;
        parse_bestmove(line)?
            .map(|mv| mv.to_string())
            .ok_or(AdapterError::NoMove)
    }

    fn evaluate(&mut self, _fen: &str) -> Result<Evaluation, AdapterError> {
        Ok(Evaluation::default())
    }
}

#[test]
fn test_engine_adapter_round_trip() {
    let engine = GameEngine::new();
    let mut adapter = UciScript {
        replies: vec!["bestmove (none)", "bestmove e7e5 ponder g1f3"],
        commands: Vec::new(),
    };

    play(&engine, &["e2e4"]);
    assert_eq!(engine.play_engine_move(&mut adapter), Ok(true));
    assert_eq!(
        adapter.commands[0],
        "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    assert_eq!(engine.move_history_notation(), "1. e4 e5");

    assert_eq!(engine.play_engine_move(&mut adapter), Err(AdapterError::NoMove));
    assert!(matches!(
        engine.play_engine_move(&mut adapter),
        Err(AdapterError::Unavailable(_))
    ));
}
