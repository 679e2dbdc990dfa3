//! Test suite for the turn coordinator
//!
//! Drives [`GameEngine`] through its public methods and checks both the
//! committed snapshot and the events a subscriber receives.
//!
//! # Test Organization
//!
//! - `test_engine_*` - Accepted and rejected moves, versions, snapshots
//! - `test_concurrency_*` - Move-in-progress rejection and racing callers
//! - `test_setup_*` - Custom games and FEN loading
//! - `test_promotion_*` - Promotion choice through the coordinator
//! - `test_adapter_*` - External engine seam
//! - `test_events_*` - Event bus behaviour

use super::events::EventBus;
use super::*;
use crate::adapter::{AdapterError, EngineAdapter, Evaluation};
use crate::board::Board;
use crate::error::ChessRulesError;
use crate::piece::Piece;
use crate::types::{GameMode, GameResult, PieceColor, PieceType, Position};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread;

fn sq(notation: &str) -> Position {
    Position::from_notation(notation).unwrap()
}

fn drain(events: &Receiver<GameEvent>) -> Vec<GameEvent> {
    events.try_iter().collect()
}

fn play_all(engine: &GameEngine, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        assert!(engine.try_make_move(sq(from), sq(to)), "{from}{to} should be legal");
    }
}

// ============================================================================
// Accepted and rejected moves
// ============================================================================

#[test]
fn test_engine_accepts_legal_move() {
    //! An accepted move bumps the version and emits MoveMade then StateChanged
    let engine = GameEngine::new();
    let events = engine.subscribe();
    let before = engine.snapshot();

    assert!(engine.try_make_move(sq("e2"), sq("e4")));
    assert_eq!(engine.version(), 1);
    assert_eq!(engine.current_player(), PieceColor::Black);
    assert_eq!(engine.phase(), TurnPhase::Idle);

    let received = drain(&events);
    assert!(matches!(
        received.as_slice(),
        [GameEvent::MoveMade { version: 1, .. }, GameEvent::StateChanged { version: 1 }]
    ));

    // an observer holding the old snapshot still sees the old position
    assert!(before.board.get(sq("e2")).unwrap().is_some());
    assert!(engine.snapshot().board.get(sq("e4")).unwrap().is_some());
}

#[test]
fn test_engine_turn_violation_leaves_state_alone() {
    let engine = GameEngine::new();
    let events = engine.subscribe();
    let before = engine.snapshot();

    assert!(!engine.try_make_move(sq("e7"), sq("e5")), "Black cannot move first");
    assert!(!engine.try_make_move(sq("e4"), sq("e5")), "empty square");

    assert_eq!(engine.version(), 0);
    assert_eq!(*engine.snapshot(), *before);
    let received = drain(&events);
    assert_eq!(received.len(), 2);
    assert!(received
        .iter()
        .all(|event| matches!(event, GameEvent::TurnViolation { .. })));
}

#[test]
fn test_engine_illegal_move_reported_separately() {
    let engine = GameEngine::new();
    let events = engine.subscribe();

    assert!(!engine.try_make_move(sq("e2"), sq("e5")));
    match drain(&events).as_slice() {
        [GameEvent::IllegalMove { from, to, .. }] => {
            assert_eq!((*from, *to), (sq("e2"), sq("e5")));
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert_eq!(engine.version(), 0);
}

#[test]
fn test_engine_checkmate_ends_game() {
    let engine = GameEngine::new();
    let events = engine.subscribe();
    play_all(&engine, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);

    assert_eq!(engine.result(), GameResult::BlackWins);
    assert!(drain(&events).contains(&GameEvent::GameEnded {
        result: GameResult::BlackWins
    }));

    assert!(!engine.try_make_move(sq("a2"), sq("a3")));
    assert!(matches!(
        drain(&events).as_slice(),
        [GameEvent::TurnViolation { .. }]
    ));
}

#[test]
fn test_engine_check_event() {
    let engine = GameEngine::new();
    let events = engine.subscribe();
    play_all(&engine, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);
    assert!(drain(&events).contains(&GameEvent::CheckDetected {
        color: PieceColor::Black
    }));
    assert_eq!(engine.last_move().unwrap().to_notation(), "Qh5+");
}

#[test]
fn test_engine_history_notation_and_records() {
    let engine = GameEngine::new();
    play_all(&engine, &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]);
    assert_eq!(engine.move_history_notation(), "1. e4 e5 2. Nf3");

    let records = engine.turn_records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].ply, 3);
    assert_eq!(records[1].color, PieceColor::Black);
}

#[test]
fn test_engine_legal_move_queries() {
    let engine = GameEngine::new();
    assert_eq!(engine.all_legal_moves().len(), 20);
    let mut knight = engine.get_legal_moves(sq("g1"));
    knight.sort();
    assert_eq!(knight, vec![sq("f3"), sq("h3")]);
    assert!(engine.get_legal_moves(sq("g8")).is_empty(), "Black is not to move");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrency_move_in_progress_is_rejected() {
    //! While the coordinator lock is held, a second request is turned away
    //! immediately instead of waiting
    let engine = GameEngine::new();
    let events = engine.subscribe();

    let guard = engine.core.lock();
    assert_eq!(engine.phase(), TurnPhase::MoveInProgress);
    assert!(!engine.try_make_move(sq("e2"), sq("e4")));
    drop(guard);

    match drain(&events).as_slice() {
        [GameEvent::TurnViolation { reason }] => {
            assert!(reason.contains("already being processed"), "{reason}");
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert!(engine.try_make_move(sq("e2"), sq("e4")));
}

#[test]
fn test_concurrency_racing_callers_commit_once() {
    let engine = Arc::new(GameEngine::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.try_make_move(sq("e2"), sq("e4")))
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|&ok| ok)
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(engine.version(), 1);
    assert_eq!(engine.snapshot().move_history.len(), 1);
}

// ============================================================================
// Setup
// ============================================================================

fn kings_and_rooks() -> Board {
    let mut board = Board::empty();
    for (kind, color, square) in [
        (PieceType::King, PieceColor::White, "e1"),
        (PieceType::Rook, PieceColor::White, "h1"),
        (PieceType::King, PieceColor::Black, "e8"),
        (PieceType::Rook, PieceColor::Black, "a8"),
    ] {
        board.set(sq(square), Some(Piece::new(kind, color))).unwrap();
    }
    board
}

#[test]
fn test_setup_custom_game_flags() {
    let engine = GameEngine::new();
    let events = engine.subscribe();
    engine
        .start_custom_game(kings_and_rooks(), PieceColor::Black, false, true)
        .unwrap();

    let state = engine.snapshot();
    assert_eq!(state.mode, GameMode::Custom);
    assert_eq!(state.current_player, PieceColor::Black);
    assert!(!state.board.allow_castling);
    assert!(state.board.allow_en_passant);
    assert!(matches!(
        drain(&events).first(),
        Some(GameEvent::NewGame {
            mode: GameMode::Custom,
            to_move: PieceColor::Black,
            ..
        })
    ));

    assert!(!engine.try_make_move(sq("e8"), sq("c8")), "castling disabled");
    assert!(engine.try_make_move(sq("e8"), sq("d8")));
    assert!(!engine.try_make_move(sq("e1"), sq("g1")), "castling disabled");
}

#[test]
fn test_setup_invalid_board_keeps_current_game() {
    let engine = GameEngine::new();
    play_all(&engine, &[("e2", "e4")]);
    let version = engine.version();

    let mut board = kings_and_rooks();
    board.set(sq("e8"), None).unwrap();
    let err = engine
        .start_custom_game(board, PieceColor::White, true, true)
        .unwrap_err();
    assert!(matches!(err, ChessRulesError::InvalidSetup { .. }));
    assert_eq!(engine.version(), version);
    assert_eq!(engine.snapshot().move_history.len(), 1);
}

#[test]
fn test_setup_new_game_resets_history() {
    let engine = GameEngine::new();
    play_all(&engine, &[("e2", "e4"), ("e7", "e5")]);
    engine.start_new_game();
    let state = engine.snapshot();
    assert!(state.move_history.is_empty());
    assert_eq!(state.full_move_number, 1);
    assert!(engine.turn_records().is_empty());
}

#[test]
fn test_setup_unimplemented_pieces_are_allowed() {
    let engine = GameEngine::new();
    let mut board = kings_and_rooks();
    board
        .set(sq("d4"), Some(Piece::new(PieceType::Nightrider, PieceColor::White)))
        .unwrap();
    engine
        .start_custom_game(board, PieceColor::White, true, true)
        .unwrap();
    let mut moves = engine.get_legal_moves(sq("d4"));
    moves.sort();
    // falls back to ferz steps
    assert_eq!(moves, vec![sq("c3"), sq("e3"), sq("c5"), sq("e5")]);
}

#[test]
fn test_setup_load_fen() {
    let engine = GameEngine::new();
    engine
        .load_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
        .unwrap();
    assert!(engine.try_make_move(sq("e1"), sq("g1")));
    assert_eq!(engine.last_move().unwrap().to_notation(), "O-O");
    assert!(engine.load_fen("not a fen").is_err());
}

#[test]
fn test_setup_invalid_fen_keeps_current_game() {
    //! Imported positions go through the same king checks as custom boards
    let engine = GameEngine::new();
    play_all(&engine, &[("e2", "e4")]);
    let events = engine.subscribe();
    let before = engine.snapshot();

    for fen in ["8/8/8/8/8/8/8/8 w - - 0 1", "k7/8/8/8/8/8/8/KK6 w - - 0 1"] {
        assert!(matches!(
            engine.load_fen(fen),
            Err(ChessRulesError::InvalidSetup { .. })
        ));
    }

    assert_eq!(engine.version(), 1);
    assert_eq!(*engine.snapshot(), *before);
    assert_eq!(engine.result(), GameResult::InProgress);
    assert!(drain(&events).is_empty());
}

#[test]
fn test_setup_load_state_validates_board() {
    let engine = GameEngine::new();
    let kingless = crate::state::GameState::custom(Board::empty(), PieceColor::White);
    assert!(matches!(
        engine.load_state(kingless),
        Err(ChessRulesError::InvalidSetup { .. })
    ));
    assert_eq!(engine.version(), 0);

    let state = crate::state::GameState::custom(kings_and_rooks(), PieceColor::Black);
    engine.load_state(state).unwrap();
    assert_eq!(engine.current_player(), PieceColor::Black);
    assert_eq!(engine.version(), 1);
}

#[test]
fn test_setup_history_numbering_continues_imported_position() {
    let engine = GameEngine::new();
    engine.load_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 20").unwrap();
    play_all(&engine, &[("e8", "d8"), ("e1", "d1"), ("d8", "c8")]);
    assert_eq!(engine.move_history_notation(), "20... Kd8 21. Kd1 Kc8");
}

#[test]
fn test_engine_move_at_counter_limit() {
    //! The largest full-move number FEN allows still accepts a Black move
    let engine = GameEngine::new();
    engine
        .load_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295")
        .unwrap();
    assert!(engine.try_make_move(sq("e8"), sq("d8")));
    assert_eq!(engine.snapshot().full_move_number, u32::MAX);
    assert_eq!(engine.current_player(), PieceColor::White);
}

// ============================================================================
// Promotion
// ============================================================================

fn promotion_engine() -> GameEngine {
    let engine = GameEngine::new();
    engine
        .load_fen("7k/1P6/8/8/8/8/8/4K3 w - - 0 40")
        .unwrap();
    engine
}

#[test]
fn test_promotion_defaults_to_queen() {
    let engine = promotion_engine();
    assert!(engine.try_make_move(sq("b7"), sq("b8")));
    let record = engine.last_move().unwrap();
    assert_eq!(record.promotion, Some(PieceType::Queen));
    assert_eq!(record.to_notation(), "b8=Q+");
}

#[test]
fn test_promotion_under_promotion_and_fairy_choice() {
    let engine = promotion_engine();
    assert!(engine.try_make_move_with_promotion(sq("b7"), sq("b8"), Some(PieceType::Knight)));
    assert_eq!(
        engine.snapshot().board.get(sq("b8")).unwrap().map(|p| p.kind),
        Some(PieceType::Knight)
    );

    let engine = promotion_engine();
    assert!(engine.try_make_move_with_promotion(sq("b7"), sq("b8"), Some(PieceType::Chancellor)));
    assert_eq!(engine.last_move().unwrap().to_uci(), "b7b8c");
}

#[test]
fn test_promotion_invalid_choice_rejected() {
    let engine = promotion_engine();
    let events = engine.subscribe();
    assert!(!engine.try_make_move_with_promotion(sq("b7"), sq("b8"), Some(PieceType::King)));
    assert!(matches!(
        drain(&events).as_slice(),
        [GameEvent::IllegalMove { .. }]
    ));
    assert_eq!(engine.version(), 1, "only the FEN load committed");
}

// ============================================================================
// External engine
// ============================================================================

/// Adapter that replays canned answers
struct ScriptedAdapter {
    replies: Vec<Result<String, AdapterError>>,
    seen: Vec<String>,
}

impl ScriptedAdapter {
    fn new(replies: Vec<Result<String, AdapterError>>) -> Self {
        ScriptedAdapter {
            replies,
            seen: Vec::new(),
        }
    }
}

impl EngineAdapter for ScriptedAdapter {
    fn suggest_move(&mut self, fen: &str) -> Result<String, AdapterError> {
        self.seen.push(fen.to_string());
        self.replies.remove(0)
    }

    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, AdapterError> {
        self.seen.push(fen.to_string());
        Ok(Evaluation {
            centipawns: 25,
            mate_in: None,
        })
    }
}

#[test]
fn test_adapter_move_goes_through_coordinator() {
    let engine = GameEngine::new();
    let mut adapter = ScriptedAdapter::new(vec![Ok("e2e4".into()), Ok("e2e4".into())]);

    assert_eq!(engine.play_engine_move(&mut adapter), Ok(true));
    assert_eq!(adapter.seen[0], crate::notation::STARTING_FEN);
    assert_eq!(engine.current_player(), PieceColor::Black);

    // same suggestion is now illegal for Black
    assert_eq!(engine.play_engine_move(&mut adapter), Ok(false));
}

#[test]
fn test_adapter_errors_surface() {
    let engine = GameEngine::new();
    let mut adapter = ScriptedAdapter::new(vec![
        Ok("(none)".into()),
        Ok("zz99".into()),
        Err(AdapterError::Timeout { millis: 500 }),
    ]);

    assert_eq!(engine.play_engine_move(&mut adapter), Err(AdapterError::NoMove));
    assert!(matches!(
        engine.play_engine_move(&mut adapter),
        Err(AdapterError::Rules(ChessRulesError::InvalidUciMove { .. }))
    ));
    assert_eq!(
        engine.play_engine_move(&mut adapter),
        Err(AdapterError::Timeout { millis: 500 })
    );
    assert_eq!(engine.version(), 0);
}

#[test]
fn test_adapter_evaluation() {
    let engine = GameEngine::new();
    let mut adapter = ScriptedAdapter::new(Vec::new());
    assert_eq!(engine.evaluate_position(&mut adapter).unwrap().centipawns, 25);
}

// ============================================================================
// Event bus
// ============================================================================

#[test]
fn test_events_disconnected_subscribers_are_pruned() {
    let bus = EventBus::default();
    let kept = bus.subscribe();
    let dropped = bus.subscribe();
    drop(dropped);
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish(GameEvent::StateChanged { version: 7 });
    assert_eq!(bus.subscriber_count(), 1);
    assert_eq!(kept.try_recv().unwrap(), GameEvent::StateChanged { version: 7 });
}

#[test]
fn test_events_and_snapshots_serialize() {
    //! Observers ship events and snapshots as JSON
    let engine = GameEngine::new();
    let events = engine.subscribe();
    play_all(&engine, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);

    for event in drain(&events) {
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    let snapshot = engine.snapshot();
    let json = serde_json::to_string(&*snapshot).unwrap();
    let back: crate::state::GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, *snapshot);
    assert!(back.is_check);
}
