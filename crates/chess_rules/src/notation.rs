//! Text formats exchanged with external engines
//!
//! - [`fen`]: six-field position text, extended with letters for the fairy
//!   pieces
//! - [`uci`]: coordinate move text plus the few protocol lines the engine
//!   adapter needs

pub mod fen;
pub mod uci;

pub use fen::STARTING_FEN;
pub use uci::{parse_bestmove, position_command, UciMove};
