//! Pseudo-legal move generation
//!
//! Interprets the [`Movement`](crate::piece::Movement) descriptor of the piece
//! on a square. Nothing in this module knows about whose turn it is, the game's
//! en-passant target, or whether a move exposes the mover's king: those are
//! the validator's concerns (see [`crate::validation`]).
//!
//! ## Entry Points
//!
//! - [`possible_moves`]: every destination the piece's geometry allows
//! - [`can_move_to`]: the same contract for a single destination, without
//!   building the list
//! - [`attacks`] / [`is_square_attacked`]: capture geometry, used for check
//!   detection and castling path safety
//!
//! ## Move Lists
//!
//! Results are returned in a [`MoveList`], a `SmallVec` sized so that even an
//! Amazon in the centre of an empty board rarely spills onto the heap.

mod attack;
mod king;
mod leaper;
mod pawn;
mod sliding;


pub use attack::{attacks, is_square_attacked};
pub use king::castling_rook_squares;
pub use pawn::en_passant_row;

use crate::board::Board;
use crate::piece::SpecialMovement;
use crate::types::Position;
use smallvec::SmallVec;

/// Destination squares for one piece
pub type MoveList = SmallVec<[Position; 32]>;

/// All pseudo-legal destinations for the piece on `from`
///
/// Returns an empty list when `from` is off the board or empty.
pub fn possible_moves(board: &Board, from: Position) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    let movement = piece.movement();
    sliding::generate_slides(board, from, piece.color, movement.rays, &mut moves);
    leaper::generate_leaps(board, from, piece.color, movement.leaps, &mut moves);

    match movement.special {
        SpecialMovement::None => {}
        SpecialMovement::Pawn => pawn::generate_pawn_moves(board, from, piece, &mut moves),
        SpecialMovement::King => king::generate_castling(board, from, piece, &mut moves),
    }

    moves
}

/// Whether the piece on `from` may geometrically move to `to`
///
/// Agrees with [`possible_moves`] for every destination.
pub fn can_move_to(board: &Board, from: Position, to: Position) -> bool {
    if from == to || !to.is_valid() {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if board.piece_at(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }

    let movement = piece.movement();
    if sliding::slide_reaches(board, from, to, movement.rays)
        || leaper::leap_reaches(from, to, movement.leaps)
    {
        return true;
    }

    match movement.special {
        SpecialMovement::None => false,
        SpecialMovement::Pawn => pawn::pawn_reaches(board, from, to, piece),
        SpecialMovement::King => king::castling_reaches(board, from, to, piece),
    }
}
