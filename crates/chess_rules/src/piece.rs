//! Piece catalog
//!
//! A [`Piece`] is a small `Copy` value stored directly in a board square. Its
//! movement rules are not methods on the piece itself: [`PieceType::movement`]
//! maps every kind to a static [`Movement`] descriptor, and the functions in
//! [`crate::move_gen`] interpret that descriptor. Adding a piece kind means
//! adding one match arm here, and the compiler points at every place that
//! needs to know about it.

use crate::constants::*;
use crate::types::{PieceColor, PieceType};
use serde::{Deserialize, Serialize};

/// Movement behaviour that cannot be expressed as plain rays and jumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMovement {
    None,
    /// Forward pushes, double step, diagonal captures, en passant
    Pawn,
    /// Single steps plus castling
    King,
}

/// Geometry of a piece kind
///
/// `rays` are slid along until the first occupied square; `leaps` are jumped
/// to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub rays: &'static [(i8, i8)],
    pub leaps: &'static [(i8, i8)],
    pub special: SpecialMovement,
}

impl Movement {
    const fn new(
        rays: &'static [(i8, i8)],
        leaps: &'static [(i8, i8)],
        special: SpecialMovement,
    ) -> Self {
        Movement {
            rays,
            leaps,
            special,
        }
    }
}

const KING: Movement = Movement::new(&NO_OFFSETS, &ALL_DIRECTIONS, SpecialMovement::King);
const QUEEN: Movement = Movement::new(&ALL_DIRECTIONS, &NO_OFFSETS, SpecialMovement::None);
const ROOK: Movement = Movement::new(&ORTHOGONAL, &NO_OFFSETS, SpecialMovement::None);
const BISHOP: Movement = Movement::new(&DIAGONAL, &NO_OFFSETS, SpecialMovement::None);
const KNIGHT: Movement = Movement::new(&NO_OFFSETS, &KNIGHT_JUMPS, SpecialMovement::None);
const PAWN: Movement = Movement::new(&NO_OFFSETS, &NO_OFFSETS, SpecialMovement::Pawn);
const ARCHBISHOP: Movement = Movement::new(&DIAGONAL, &KNIGHT_JUMPS, SpecialMovement::None);
const CHANCELLOR: Movement = Movement::new(&ORTHOGONAL, &KNIGHT_JUMPS, SpecialMovement::None);
const AMAZON: Movement = Movement::new(&ALL_DIRECTIONS, &KNIGHT_JUMPS, SpecialMovement::None);
const FERZ: Movement = Movement::new(&NO_OFFSETS, &DIAGONAL, SpecialMovement::None);
const WAZIR: Movement = Movement::new(&NO_OFFSETS, &ORTHOGONAL, SpecialMovement::None);
const CAMEL: Movement = Movement::new(&NO_OFFSETS, &CAMEL_JUMPS, SpecialMovement::None);

impl PieceType {
    /// Movement geometry for this kind
    ///
    /// Kinds without their own rules yet (see [`PieceType::is_implemented`])
    /// move as a Ferz. This is a placeholder, not their intended movement.
    pub fn movement(self) -> Movement {
        match self {
            PieceType::King => KING,
            PieceType::Queen => QUEEN,
            PieceType::Rook => ROOK,
            PieceType::Bishop => BISHOP,
            PieceType::Knight => KNIGHT,
            PieceType::Pawn => PAWN,
            PieceType::Archbishop => ARCHBISHOP,
            PieceType::Chancellor => CHANCELLOR,
            PieceType::Amazon => AMAZON,
            PieceType::Ferz => FERZ,
            PieceType::Wazir => WAZIR,
            PieceType::Camel => CAMEL,
            PieceType::Zebra
            | PieceType::Unicorn
            | PieceType::Dragon
            | PieceType::Gryphon
            | PieceType::Nightrider
            | PieceType::Grasshopper
            | PieceType::Centaur
            | PieceType::Mann
            | PieceType::Guard => FERZ,
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub color: PieceColor,
    /// Set once the piece has left its starting square
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceType, color: PieceColor) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Same piece with the moved flag set
    pub const fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    pub fn point_value(&self) -> i32 {
        self.kind.point_value()
    }

    pub fn movement(&self) -> Movement {
        self.kind.movement()
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn fen_char(&self) -> char {
        match self.color {
            PieceColor::White => self.kind.letter(),
            PieceColor::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Inverse of [`Piece::fen_char`]; the piece is returned unmoved
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceType::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Piece::new(kind, color))
    }
}
