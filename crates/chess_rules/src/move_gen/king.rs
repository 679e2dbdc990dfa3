//! King castling geometry
//!
//! The king's single steps come from its leap table like any other leaper;
//! this module only adds the two-column castling destinations.
//!
//! ## Castling Candidates
//!
//! A castling destination is offered when:
//! - the king has not moved
//! - a rook of the same colour that has not moved stands in the corner on
//!   that side of the king's row
//! - every square between king and rook is empty
//!
//! Whether the king is in check or would pass through an attacked square is
//! left to the validator.

use super::MoveList;
use crate::board::Board;
use crate::constants::{KINGSIDE_ROOK_COLUMN, QUEENSIDE_ROOK_COLUMN};
use crate::piece::Piece;
use crate::types::{PieceType, Position};

/// Rook origin and destination for a king move of two columns
///
/// Returns `None` for any other king move. The rook lands on the square the
/// king crossed.
pub fn castling_rook_squares(king_from: Position, king_to: Position) -> Option<(Position, Position)> {
    let d_column = king_to.column - king_from.column;
    if king_from.row != king_to.row || d_column.abs() != 2 {
        return None;
    }
    let side = d_column.signum();
    let rook_column = if side > 0 {
        KINGSIDE_ROOK_COLUMN
    } else {
        QUEENSIDE_ROOK_COLUMN
    };
    Some((
        Position::new(king_from.row, rook_column),
        king_from.offset(0, side),
    ))
}

pub(super) fn castling_reaches(board: &Board, from: Position, to: Position, king: Piece) -> bool {
    if king.has_moved || !to.is_valid() || board.piece_at(to).is_some() {
        return false;
    }
    let Some((rook_from, _)) = castling_rook_squares(from, to) else {
        return false;
    };

    let rook_ready = board.piece_at(rook_from).is_some_and(|rook| {
        rook.kind == PieceType::Rook && rook.color == king.color && !rook.has_moved
    });
    if !rook_ready {
        return false;
    }

    let (low, high) = if from.column < rook_from.column {
        (from.column, rook_from.column)
    } else {
        (rook_from.column, from.column)
    };
    (low + 1..high).all(|column| board.piece_at(Position::new(from.row, column)).is_none())
}

pub(super) fn generate_castling(board: &Board, from: Position, king: Piece, moves: &mut MoveList) {
    if king.has_moved {
        return;
    }
    for d_column in [2, -2] {
        let to = from.offset(0, d_column);
        if castling_reaches(board, from, to, king) {
            moves.push(to);
        }
    }
}
