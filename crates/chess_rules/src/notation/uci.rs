//! Coordinate move text and protocol lines
//!
//! Moves are `<from><to>[promotion]`, e.g. `e2e4` or `e7e8q`. The promotion
//! letter is lowercase; besides `q`, `r`, `b`, `n` the letters of the
//! implemented fairy pieces are accepted so fairy promotions round-trip.

use crate::error::{ChessRulesError, RulesResult};
use crate::types::{PieceType, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A move request in coordinate form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UciMove {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceType>,
}

impl UciMove {
    pub fn new(from: Position, to: Position, promotion: Option<PieceType>) -> Self {
        UciMove {
            from,
            to,
            promotion,
        }
    }

    /// Parse `e2e4` / `e7e8q`
    pub fn parse(text: &str) -> RulesResult<Self> {
        let invalid = || ChessRulesError::InvalidUciMove {
            uci: text.to_string(),
        };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }

        let from = Position::from_notation(&text[0..2]).map_err(|_| invalid())?;
        let to = Position::from_notation(&text[2..4]).map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(letter) if letter.is_ascii_lowercase() => {
                let kind = PieceType::from_letter(letter)
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or_else(invalid)?;
                Some(kind)
            }
            Some(_) => return Err(invalid()),
        };

        Ok(UciMove::new(from, to, promotion))
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for UciMove {
    type Err = ChessRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UciMove::parse(s)
    }
}

/// `position fen <fen>` command for an engine process
pub fn position_command(fen: &str) -> String {
    format!("position fen {fen}")
}

/// Parse an engine's `bestmove <move> [ponder <move>]` reply
///
/// `Ok(None)` when the engine reports `bestmove (none)` or `bestmove 0000`,
/// i.e. it has no move in a finished game.
pub fn parse_bestmove(line: &str) -> RulesResult<Option<UciMove>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return Err(ChessRulesError::InvalidUciMove {
            uci: line.to_string(),
        });
    }
    match tokens.next() {
        Some("(none)") | Some("0000") => Ok(None),
        Some(text) => UciMove::parse(text).map(Some),
        None => Err(ChessRulesError::InvalidUciMove {
            uci: line.to_string(),
        }),
    }
}
