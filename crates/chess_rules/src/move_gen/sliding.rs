//! Sliding piece move generation
//!
//! Rooks, bishops, queens and the slider half of the composite fairy pieces
//! all walk a set of rays. A ray stops at the first occupied square: the
//! square is included if it holds an opponent piece (capture) and excluded if
//! it holds one of the mover's own pieces.

use super::MoveList;
use crate::board::Board;
use crate::types::{PieceColor, Position};

/// Append every square reachable along `rays`
pub(super) fn generate_slides(
    board: &Board,
    from: Position,
    color: PieceColor,
    rays: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_column) in rays {
        let mut current = from.offset(d_row, d_column);
        while current.is_valid() {
            match board.piece_at(current) {
                None => moves.push(current),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.push(current);
                    }
                    break;
                }
            }
            current = current.offset(d_row, d_column);
        }
    }
}

/// Number of whole steps along `ray` that lead from the origin to a target
/// `(d_row, d_column)` away, if the target lies on the ray at all
#[inline]
fn steps_along(d_row: i8, d_column: i8, (ray_row, ray_column): (i8, i8)) -> Option<i8> {
    let steps = if ray_row != 0 {
        d_row / ray_row
    } else if ray_column != 0 {
        d_column / ray_column
    } else {
        return None;
    };
    (steps >= 1 && ray_row * steps == d_row && ray_column * steps == d_column).then_some(steps)
}

/// Whether `to` lies on one of `rays` with nothing in between
///
/// Occupancy of `to` itself is the caller's business.
pub(super) fn slide_reaches(board: &Board, from: Position, to: Position, rays: &[(i8, i8)]) -> bool {
    let d_row = to.row - from.row;
    let d_column = to.column - from.column;

    rays.iter().any(|&ray| {
        steps_along(d_row, d_column, ray).is_some_and(|steps| {
            (1..steps).all(|step| {
                board
                    .piece_at(from.offset(ray.0 * step, ray.1 * step))
                    .is_none()
            })
        })
    })
}
