//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square towards the opponent, only onto an empty square
//! - **Double push**: two squares from an unmoved pawn, both squares empty
//! - **Captures**: one square diagonally forward onto an opponent piece
//! - **En passant candidate**: one square diagonally forward onto an empty
//!   square, when an opponent pawn stands beside the mover on the en-passant
//!   row. Whether the capture is actually available depends on the game's
//!   en-passant target, which the validator checks.
//!
//! Promotion is applied when the move is executed, not here.

use super::MoveList;
use crate::board::Board;
use crate::piece::Piece;
use crate::types::{PieceColor, PieceType, Position};

/// Row a pawn of `color` must stand on to capture en passant
pub fn en_passant_row(color: PieceColor) -> i8 {
    color.promotion_row() - 3 * color.forward()
}

fn is_en_passant_candidate(board: &Board, from: Position, to: Position, pawn: Piece) -> bool {
    if from.row != en_passant_row(pawn.color) || board.piece_at(to).is_some() {
        return false;
    }
    board
        .piece_at(Position::new(from.row, to.column))
        .is_some_and(|beside| beside.kind == PieceType::Pawn && beside.color != pawn.color)
}

pub(super) fn generate_pawn_moves(board: &Board, from: Position, pawn: Piece, moves: &mut MoveList) {
    let forward = pawn.color.forward();

    let one_step = from.offset(forward, 0);
    if one_step.is_valid() && board.piece_at(one_step).is_none() {
        moves.push(one_step);

        let two_step = from.offset(2 * forward, 0);
        if !pawn.has_moved && two_step.is_valid() && board.piece_at(two_step).is_none() {
            moves.push(two_step);
        }
    }

    for d_column in [-1, 1] {
        let target = from.offset(forward, d_column);
        if !target.is_valid() {
            continue;
        }
        match board.piece_at(target) {
            Some(occupant) if occupant.color != pawn.color => moves.push(target),
            Some(_) => {}
            None => {
                if is_en_passant_candidate(board, from, target, pawn) {
                    moves.push(target);
                }
            }
        }
    }
}

/// Single-destination form of [`generate_pawn_moves`]
///
/// The caller has already rejected destinations holding an own piece.
pub(super) fn pawn_reaches(board: &Board, from: Position, to: Position, pawn: Piece) -> bool {
    let forward = pawn.color.forward();
    let advance = (to.row - from.row) * forward;
    let sideways = (to.column - from.column).abs();
    let target = board.piece_at(to);

    match (advance, sideways) {
        (1, 0) => target.is_none(),
        (2, 0) => {
            !pawn.has_moved && target.is_none() && board.piece_at(from.offset(forward, 0)).is_none()
        }
        (1, 1) => match target {
            Some(occupant) => occupant.color != pawn.color,
            None => is_en_passant_candidate(board, from, to, pawn),
        },
        _ => false,
    }
}

/// Whether a pawn of `color` on `from` attacks `target`
///
/// Pawns attack their two forward diagonals whatever stands there.
#[inline]
pub(super) fn pawn_attacks(color: PieceColor, from: Position, target: Position) -> bool {
    target.row - from.row == color.forward() && (target.column - from.column).abs() == 1
}
