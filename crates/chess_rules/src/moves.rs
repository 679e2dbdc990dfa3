//! Executed move records
//!
//! A [`Move`] describes what happened on the board, and the coordinator builds
//! it only after the move has been validated and applied. A move request is
//! just an origin and destination square until then.

use crate::piece::Piece;
use crate::types::{PieceType, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One completed ply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// The piece as it stood on `from` before moving
    pub piece: Piece,
    /// Piece removed from the board, including a pawn taken en passant
    pub captured: Option<Piece>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    /// Kind the pawn became, when this move promoted
    pub promotion: Option<PieceType>,
    pub is_check: bool,
    pub is_checkmate: bool,
}

impl Move {
    /// Plain move with no flags set
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            is_castling: false,
            is_en_passant: false,
            promotion: None,
            is_check: false,
            is_checkmate: false,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Coordinate form, e.g. `e7e8q`
    pub fn to_uci(&self) -> String {
        let mut text = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            text.push(kind.letter().to_ascii_lowercase());
        }
        text
    }

    /// Algebraic notation for the move list, e.g. `Nf3`, `exd6`, `e8=Q#`
    pub fn to_notation(&self) -> String {
        if self.is_castling {
            return if self.to.column > self.from.column {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let mut notation = String::new();
        let is_pawn = self.piece.kind == PieceType::Pawn;
        if !is_pawn {
            notation.push(self.piece.kind.letter());
        }
        if self.is_capture() {
            if is_pawn {
                notation.push(self.from.file_char());
            }
            notation.push('x');
        }
        notation.push_str(&self.to.to_notation());

        if let Some(kind) = self.promotion {
            notation.push('=');
            notation.push(kind.letter());
        }

        if self.is_checkmate {
            notation.push('#');
        } else if self.is_check {
            notation.push('+');
        }
        notation
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}
