//! Rules core for standard and fairy chess
//!
//! Decides which moves are legal on an 8x8 board holding the six standard
//! pieces plus fairy pieces (Archbishop, Chancellor, Amazon, Ferz, Wazir,
//! Camel, ...), applies them with all special-move side effects, and tracks
//! check, checkmate, stalemate and the fifty-move draw.
//!
//! ## Layers
//!
//! - [`types`], [`piece`], [`board`] - coordinates, pieces, the grid
//! - [`move_gen`] - pseudo-legal movement per piece kind, attack detection
//! - [`validation`] - full legality (turn, castling, en passant, king safety)
//!   and game status
//! - [`state`] - applying a move to a [`GameState`]
//! - [`notation`] - FEN and UCI text formats
//! - [`api`] - [`GameEngine`], the thread-safe turn coordinator
//! - [`adapter`] - seam for external move-suggestion engines
//!
//! Applications normally only touch [`GameEngine`] and the event stream it
//! publishes.

pub mod adapter;
pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod move_gen;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod state;
pub mod types;
pub mod validation;

pub use adapter::{AdapterError, EngineAdapter, Evaluation};
pub use api::{GameEngine, GameEvent, TurnManager, TurnPhase, TurnRecord};
pub use board::Board;
pub use error::{ChessRulesError, MoveRejection, RulesResult};
pub use move_gen::MoveList;
pub use moves::Move;
pub use notation::{UciMove, STARTING_FEN};
pub use piece::Piece;
pub use state::GameState;
pub use types::{GameMode, GameResult, PieceColor, PieceType, Position};
