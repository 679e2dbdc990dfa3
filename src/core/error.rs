//! Error types for the application layer
//!
//! Wraps settings persistence failures and rules-core errors so the command
//! handlers can use `?` throughout. Only `main` converts to `anyhow`.

use chess_rules::ChessRulesError;
use thiserror::Error;

/// Errors that can occur outside the rules core
#[derive(Error, Debug)]
pub enum AppError {
    /// Settings file or output stream I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or event serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error reported by the rules core
    #[error(transparent)]
    Rules(#[from] ChessRulesError),

    /// A move given on the command line was not accepted
    #[error("Move {uci} was rejected: {reason}")]
    MoveRejected { uci: String, reason: String },

    /// Logging could not be initialised
    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    /// The event observer thread died
    #[error("Event observer failed: {message}")]
    Observer { message: String },
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
