//! Turn coordinator
//!
//! [`GameEngine`] is the only thing that mutates a game. It owns the live
//! [`GameState`] behind a `parking_lot::Mutex`, publishes an immutable
//! `Arc<GameState>` snapshot after every committed change, and fans
//! [`GameEvent`]s out to subscribers.
//!
//! ## Move Pipeline
//!
//! 1. `try_lock` the game; if another move holds it, reject as a turn
//!    violation (requests are never queued)
//! 2. Check that the origin holds a piece of the side to move
//! 3. Validate the move and the promotion choice
//! 4. Execute on a clone of the state and recompute check/result
//! 5. Swap the clone in, publish the snapshot, then send events
//!
//! A rejected or failed move leaves the live state exactly as it was. No
//! error escapes `try_make_move`; callers get `false` and subscribers get an
//! [`GameEvent::IllegalMove`], [`GameEvent::TurnViolation`] or
//! [`GameEvent::Error`] describing why.

use super::events::{EventBus, GameEvent};
use super::turn::{TurnManager, TurnPhase, TurnRecord};
use crate::adapter::{AdapterError, EngineAdapter, Evaluation};
use crate::board::Board;
use crate::error::{ChessRulesError, MoveRejection, RulesResult};
use crate::moves::Move;
use crate::notation::UciMove;
use crate::state::GameState;
use crate::types::{GameMode, GameResult, PieceColor, PieceType, Position};
use crate::validation;
use crossbeam_channel::Receiver;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// State guarded by the coordinator lock
#[derive(Debug)]
pub(super) struct EngineCore {
    pub(super) state: GameState,
    pub(super) turns: TurnManager,
}

#[derive(Debug, Clone)]
struct Snapshot {
    version: u64,
    state: Arc<GameState>,
}

/// Why an accepted request still failed to produce a move
enum MoveFailure {
    Rejected(MoveRejection),
    Internal(ChessRulesError),
}

impl From<MoveRejection> for MoveFailure {
    fn from(rejection: MoveRejection) -> Self {
        MoveFailure::Rejected(rejection)
    }
}

/// Thread-safe coordinator for one game
///
/// # Examples
///
/// ```rust
/// use chess_rules::{GameEngine, GameResult, Position};
///
/// let engine = GameEngine::new();
/// let sq = |s: &str| Position::from_notation(s).unwrap();
///
/// assert!(engine.try_make_move(sq("e2"), sq("e4")));
/// assert!(!engine.try_make_move(sq("e4"), sq("e5")), "not White's turn");
/// assert_eq!(engine.snapshot().result, GameResult::InProgress);
/// ```
#[derive(Debug)]
pub struct GameEngine {
    pub(super) core: Mutex<EngineCore>,
    snapshot: RwLock<Snapshot>,
    events: EventBus,
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine::new()
    }
}

impl GameEngine {
    /// Coordinator holding a standard game
    pub fn new() -> Self {
        GameEngine::with_state(GameState::standard())
    }

    /// Coordinator holding an arbitrary state, e.g. one imported from FEN
    pub fn with_state(state: GameState) -> Self {
        let snapshot = Snapshot {
            version: 0,
            state: Arc::new(state.clone()),
        };
        GameEngine {
            core: Mutex::new(EngineCore {
                turns: TurnManager::new(state.current_player),
                state,
            }),
            snapshot: RwLock::new(snapshot),
            events: EventBus::default(),
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Receive every future [`GameEvent`]
    pub fn subscribe(&self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Latest committed state
    ///
    /// Never blocks on a move in flight beyond the brief snapshot swap.
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.snapshot.read().state)
    }

    /// Number of commits so far; bumps on every accepted move and new game
    pub fn version(&self) -> u64 {
        self.snapshot.read().version
    }

    pub fn current_player(&self) -> PieceColor {
        self.snapshot().current_player
    }

    pub fn result(&self) -> GameResult {
        self.snapshot().result
    }

    /// Current coordinator phase; `MoveInProgress` while the lock is held
    pub fn phase(&self) -> TurnPhase {
        self.core
            .try_lock()
            .map_or(TurnPhase::MoveInProgress, |core| core.turns.phase())
    }

    /// Audit trail of completed moves
    pub fn turn_records(&self) -> Vec<TurnRecord> {
        self.core.lock().turns.records().to_vec()
    }

    /// Legal destinations for the piece on `from`
    ///
    /// Empty when there is no piece of the side to move on `from`.
    pub fn get_legal_moves(&self, from: Position) -> Vec<Position> {
        validation::legal_moves_from(&self.snapshot(), from).into_vec()
    }

    /// Every legal `(from, to)` pair for the side to move
    pub fn all_legal_moves(&self) -> Vec<(Position, Position)> {
        validation::all_legal_moves(&self.snapshot())
    }

    /// Current position as FEN
    pub fn to_fen(&self) -> String {
        self.snapshot().to_fen()
    }

    /// Numbered move list, e.g. `1. e4 e5 2. Nf3`
    ///
    /// Numbering starts from the full-move number the game began at, so a
    /// position imported at move 20 lists `20. ...`. A game that starts with
    /// Black to move opens with `N... `.
    pub fn move_history_notation(&self) -> String {
        let state = self.snapshot();
        let black_moves = state
            .move_history
            .iter()
            .filter(|record| record.piece.color == PieceColor::Black)
            .count();
        let mut parts = Vec::new();
        let mut number = state
            .full_move_number
            .saturating_sub(u32::try_from(black_moves).unwrap_or(u32::MAX))
            .max(1);
        for (index, record) in state.move_history.iter().enumerate() {
            match record.piece.color {
                PieceColor::White => parts.push(format!("{number}. {record}")),
                PieceColor::Black if index == 0 => parts.push(format!("{number}... {record}")),
                PieceColor::Black => parts.push(record.to_string()),
            }
            if record.piece.color == PieceColor::Black {
                number = number.saturating_add(1);
            }
        }
        parts.join(" ")
    }

    // ------------------------------------------------------------------
    // Game setup
    // ------------------------------------------------------------------

    /// Replace the current game with a standard one
    pub fn start_new_game(&self) {
        info!("[GAME] Starting new standard game");
        self.install(GameState::standard());
    }

    /// Replace the current game with a custom setup
    ///
    /// # Errors
    ///
    /// [`ChessRulesError::InvalidSetup`] when the board does not have exactly
    /// one king and at least one piece per side. The current game is left
    /// untouched in that case.
    pub fn start_custom_game(
        &self,
        mut board: Board,
        first_player: PieceColor,
        allow_castling: bool,
        allow_en_passant: bool,
    ) -> RulesResult<()> {
        if let Err(err) = board.validate() {
            warn!("[SETUP] Rejected custom board: {}", err);
            return Err(err);
        }
        board.allow_castling = allow_castling;
        board.allow_en_passant = allow_en_passant;

        info!(
            "[SETUP] Starting custom game: {:?} to move, castling {}, en passant {}",
            first_player,
            if allow_castling { "on" } else { "off" },
            if allow_en_passant { "on" } else { "off" }
        );
        self.install(GameState::custom(board, first_player));
        Ok(())
    }

    /// Replace the current game with a position imported from FEN
    ///
    /// # Errors
    ///
    /// Malformed FEN or a placement without exactly one king per side. The
    /// current game is left untouched in both cases.
    pub fn load_fen(&self, fen: &str) -> RulesResult<()> {
        let state = GameState::from_fen(fen)?;
        self.load_state(state)?;
        info!("[SETUP] Loaded position {}", fen);
        Ok(())
    }

    /// Replace the current game with `state`
    ///
    /// Check and result flags are recomputed, the turn trail is reset, and
    /// subscribers get the same notifications as for a new game.
    ///
    /// # Errors
    ///
    /// [`ChessRulesError::InvalidSetup`] when the board fails
    /// [`Board::validate`]; the current game is left untouched.
    pub fn load_state(&self, state: GameState) -> RulesResult<()> {
        if let Err(err) = state.board.validate() {
            warn!("[SETUP] Rejected imported position: {}", err);
            return Err(err);
        }
        self.install(state);
        Ok(())
    }

    fn install(&self, mut state: GameState) {
        for (square, piece) in state.board.unimplemented_pieces() {
            warn!(
                "[SETUP] {:?} on {} has no movement rules yet and moves as a Ferz",
                piece.kind, square
            );
        }
        validation::refresh_status(&mut state);

        let mut core = self.core.lock();
        core.turns = TurnManager::new(state.current_player);
        let (mode, to_move, result, in_check) =
            (state.mode, state.current_player, state.result, state.is_check);
        core.state = state;
        let version = self.publish(&core.state);

        self.events.publish(GameEvent::NewGame {
            version,
            mode,
            to_move,
        });
        if result.is_over() {
            self.events.publish(GameEvent::GameEnded { result });
        } else if in_check {
            self.events.publish(GameEvent::CheckDetected { color: to_move });
        }
        self.events.publish(GameEvent::StateChanged { version });
    }

    /// Swap in a new snapshot; returns its version
    fn publish(&self, state: &GameState) -> u64 {
        let mut snapshot = self.snapshot.write();
        snapshot.version += 1;
        snapshot.state = Arc::new(state.clone());
        snapshot.version
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Attempt a move, promoting to a Queen if a pawn reaches its last row
    ///
    /// Returns `true` when the move was applied.
    pub fn try_make_move(&self, from: Position, to: Position) -> bool {
        self.try_make_move_with_promotion(from, to, None)
    }

    /// Attempt a move with an explicit promotion choice
    ///
    /// `None` promotes to a Queen. The choice must be an implemented kind
    /// other than King or Pawn, and is ignored for non-promoting moves.
    pub fn try_make_move_with_promotion(
        &self,
        from: Position,
        to: Position,
        promotion: Option<PieceType>,
    ) -> bool {
        let Some(mut core) = self.core.try_lock() else {
            self.reject(from, to, MoveRejection::MoveInProgress);
            return false;
        };

        if let Err(rejection) = Self::check_turn(&core.state, from, to) {
            drop(core);
            self.reject(from, to, rejection);
            return false;
        }

        if !core.turns.begin_move() {
            drop(core);
            self.reject(from, to, MoveRejection::MoveInProgress);
            return false;
        }
        let outcome = Self::execute(&core.state, from, to, promotion);
        core.turns.finish_move();

        let next = match outcome {
            Ok(next) => next,
            Err(MoveFailure::Rejected(rejection)) => {
                drop(core);
                self.reject(from, to, rejection);
                return false;
            }
            Err(MoveFailure::Internal(err)) => {
                drop(core);
                error!("[GAME] Move {}{} failed during execution: {}", from, to, err);
                self.events.publish(GameEvent::Error {
                    message: err.to_string(),
                });
                return false;
            }
        };

        let Some(record) = next.last_move().copied() else {
            error!("[GAME] Move {}{} produced no history entry", from, to);
            return false;
        };

        core.state = next;
        core.turns.record(record);
        let version = self.publish(&core.state);

        let mover = record.piece.color;
        let (result, in_check, to_move) =
            (core.state.result, core.state.is_check, core.state.current_player);
        info!("[GAME] {:?} played {} ({})", mover, record, record.to_uci());

        self.events.publish(GameEvent::MoveMade { version, record });
        if result.is_over() {
            info!("[GAME] Game over: {}", result.message());
            self.events.publish(GameEvent::GameEnded { result });
        } else if in_check {
            info!("[GAME] {:?} is in check", to_move);
            self.events.publish(GameEvent::CheckDetected { color: to_move });
        }

        if let Err(problem) = core.turns.audit() {
            warn!("[TURN] Turn sequence audit failed: {}", problem);
            self.events.publish(GameEvent::Error {
                message: format!("turn audit failed: {problem}"),
            });
        }

        self.events.publish(GameEvent::StateChanged { version });
        true
    }

    /// Ownership checks that run before the coordinator enters
    /// `MoveInProgress`
    fn check_turn(state: &GameState, from: Position, to: Position) -> Result<(), MoveRejection> {
        if state.is_over() {
            return Err(MoveRejection::GameOver);
        }
        for square in [from, to] {
            if !square.is_valid() {
                return Err(MoveRejection::InvalidSquare(square.to_notation()));
            }
        }
        match state.board.piece_at(from) {
            None => Err(MoveRejection::NoPiece { square: from }),
            Some(piece) if piece.color != state.current_player => {
                Err(MoveRejection::NotYourTurn {
                    to_move: state.current_player,
                })
            }
            Some(_) => Ok(()),
        }
    }

    /// Validate and play the move on a clone of `state`
    fn execute(
        state: &GameState,
        from: Position,
        to: Position,
        promotion: Option<PieceType>,
    ) -> Result<GameState, MoveFailure> {
        validation::check_move(state, from, to)?;
        let kind = validation::resolve_promotion(state, from, to, promotion)?;

        let mut next = state.clone();
        next.apply_move(from, to, kind)
            .map_err(MoveFailure::Internal)?;
        validation::refresh_status(&mut next);
        Ok(next)
    }

    fn reject(&self, from: Position, to: Position, rejection: MoveRejection) {
        debug!("[TURN] Rejected {}{}: {}", from, to, rejection);
        let reason = rejection.to_string();
        let event = if rejection.is_turn_violation() {
            GameEvent::TurnViolation { reason }
        } else {
            GameEvent::IllegalMove { from, to, reason }
        };
        self.events.publish(event);
    }

    // ------------------------------------------------------------------
    // External engine
    // ------------------------------------------------------------------

    /// Ask `adapter` for a move and play it
    ///
    /// The position is read from the snapshot, so the coordinator lock is not
    /// held while the adapter thinks. The answer goes through the same path
    /// as [`GameEngine::try_make_move_with_promotion`]; `Ok(false)` means the
    /// suggested move was rejected.
    pub fn play_engine_move(&self, adapter: &mut dyn EngineAdapter) -> Result<bool, AdapterError> {
        let fen = self.to_fen();
        debug!("[ENGINE] Requesting move for {}", fen);
        let text = adapter.suggest_move(&fen)?;
        let text = text.trim();
        if text == "(none)" || text == "0000" {
            return Err(AdapterError::NoMove);
        }

        let suggestion = UciMove::parse(text)?;
        info!("[ENGINE] Engine suggests {}", suggestion);
        Ok(self.try_make_move_with_promotion(suggestion.from, suggestion.to, suggestion.promotion))
    }

    /// Ask `adapter` to score the current position
    pub fn evaluate_position(&self, adapter: &mut dyn EngineAdapter) -> Result<Evaluation, AdapterError> {
        adapter.evaluate(&self.to_fen())
    }

    /// Mode of the current game
    pub fn mode(&self) -> GameMode {
        self.snapshot().mode
    }

    /// Last committed move, if any
    pub fn last_move(&self) -> Option<Move> {
        self.snapshot().last_move().copied()
    }
}
