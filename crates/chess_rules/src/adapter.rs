//! Seam for external move-suggestion engines
//!
//! The rules core never talks to an engine process itself. An
//! [`EngineAdapter`] implementation owns the process, its protocol and its
//! timeouts; the core only hands it a FEN and applies the answer through the
//! normal move path (see [`crate::GameEngine::play_engine_move`]).

use crate::error::ChessRulesError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine score for a position, from the side to move's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub centipawns: i32,
    /// Moves to mate when the engine sees a forced mate; negative when the
    /// side to move is being mated
    pub mate_in: Option<i32>,
}

/// Errors reported by an engine adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The engine process is not running or closed its pipes
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// No answer within the adapter's time limit
    #[error("Engine timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// The engine answered with something that is not protocol text
    #[error("Unexpected engine output: {0}")]
    Protocol(String),

    /// The engine has no move (the position is finished)
    #[error("Engine returned no move")]
    NoMove,

    /// Engine output parsed but could not be turned into a move
    #[error(transparent)]
    Rules(#[from] ChessRulesError),
}

/// Something that can suggest and evaluate moves for a position
pub trait EngineAdapter {
    /// Best move for the position, as coordinate text such as `e2e4`
    fn suggest_move(&mut self, fen: &str) -> Result<String, AdapterError>;

    /// Score the position
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, AdapterError>;
}
