//! Leaper move generation
//!
//! Knights, camels, ferzes, wazirs and the king's single steps jump straight
//! to a fixed offset. Intervening squares are never inspected.

use super::MoveList;
use crate::board::Board;
use crate::types::{PieceColor, Position};

pub(super) fn generate_leaps(
    board: &Board,
    from: Position,
    color: PieceColor,
    leaps: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_column) in leaps {
        let target = from.offset(d_row, d_column);
        if !target.is_valid() {
            continue;
        }
        if board.piece_at(target).map_or(true, |occupant| occupant.color != color) {
            moves.push(target);
        }
    }
}

#[inline]
pub(super) fn leap_reaches(from: Position, to: Position, leaps: &[(i8, i8)]) -> bool {
    leaps.contains(&(to.row - from.row, to.column - from.column))
}
