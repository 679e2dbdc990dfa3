//! Error types for the rules core
//!
//! Two families live here:
//!
//! - [`ChessRulesError`] covers invalid input and broken setups. These are
//!   fatal to the call that produced them and surface as `Err` values.
//! - [`MoveRejection`] describes why a single move request was turned down.
//!   The turn coordinator never returns it to callers; it converts it into a
//!   boolean result plus a notification, so a UI can tell "not your turn"
//!   apart from "that move is not allowed".

use crate::types::{PieceColor, PieceType, Position};
use thiserror::Error;

/// Errors that can occur in the rules core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessRulesError {
    /// Square notation is not a file letter followed by a rank digit
    #[error("Invalid square notation: {notation:?}")]
    InvalidNotation { notation: String },

    /// Board access with a position outside the 8x8 grid
    #[error("Position out of bounds: row {row}, column {column}")]
    OutOfBounds { row: i8, column: i8 },

    /// Tried to move a piece from an empty square
    #[error("No piece at source square {square}")]
    EmptySquare { square: Position },

    /// Malformed position text
    #[error("Invalid FEN: {message}")]
    InvalidFen { message: String },

    /// Malformed coordinate move text
    #[error("Invalid UCI move: {uci:?}")]
    InvalidUciMove { uci: String },

    /// Board fails the one-king-per-side check
    #[error("Invalid board setup: {message}")]
    InvalidSetup { message: String },

    /// Promotion to a piece kind that cannot be promoted to
    #[error("Cannot promote to {kind:?}")]
    InvalidPromotion { kind: PieceType },
}

/// Result type alias for rules operations
pub type RulesResult<T> = Result<T, ChessRulesError>;

/// Why a move request was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// Source square holds nothing
    #[error("There is no piece on {square}")]
    NoPiece { square: Position },

    /// Source square holds a piece of the side not on move
    #[error("It is {to_move:?}'s turn")]
    NotYourTurn { to_move: PieceColor },

    /// Another request is between validation and commit
    #[error("A move is already being processed")]
    MoveInProgress,

    /// Result is no longer InProgress
    #[error("The game is already over")]
    GameOver,

    /// Square outside the board
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    /// Destination not reachable with this piece's movement
    #[error("{kind:?} cannot move from {from} to {to}")]
    Geometry {
        kind: PieceType,
        from: Position,
        to: Position,
    },

    /// Move would leave or put the mover's king under attack
    #[error("Move would leave the {color:?} king in check")]
    LeavesKingInCheck { color: PieceColor },

    /// A castling precondition failed
    #[error("Castling not allowed: {reason}")]
    Castling { reason: &'static str },

    /// An en-passant precondition failed
    #[error("En passant not allowed: {reason}")]
    EnPassant { reason: &'static str },

    /// Requested promotion kind is not available
    #[error("Cannot promote to {kind:?}")]
    Promotion { kind: PieceType },
}

impl MoveRejection {
    /// Turn/ownership problems, as opposed to rule violations
    pub fn is_turn_violation(&self) -> bool {
        matches!(
            self,
            MoveRejection::NoPiece { .. }
                | MoveRejection::NotYourTurn { .. }
                | MoveRejection::MoveInProgress
                | MoveRejection::GameOver
        )
    }
}
