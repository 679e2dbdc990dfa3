//! Attack detection
//!
//! A square is attacked by a colour when any of that colour's pieces could
//! capture on it. This reuses the movement geometry from the rest of
//! `move_gen` with two differences:
//! - pawns attack their forward diagonals only, never the squares they push to
//! - kings attack their neighbouring squares only, never via castling
//!
//! The occupant of the target square is ignored, so a defended piece counts
//! as attacked by its defenders' opponents and a protected square stays
//! protected when the king considers capturing onto it.
//!
//! ## Performance
//!
//! [`is_square_attacked`] is O(64 x per-piece cost) and runs once per
//! candidate move during check-avoidance, plus several times per castling
//! check. Neither function allocates.

use super::{leaper, pawn, sliding};
use crate::board::Board;
use crate::piece::SpecialMovement;
use crate::types::{PieceColor, Position};

/// Whether the piece on `from` attacks `target`
pub fn attacks(board: &Board, from: Position, target: Position) -> bool {
    if from == target || !target.is_valid() {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    let movement = piece.movement();
    match movement.special {
        SpecialMovement::Pawn => pawn::pawn_attacks(piece.color, from, target),
        SpecialMovement::King | SpecialMovement::None => {
            leaper::leap_reaches(from, target, movement.leaps)
                || sliding::slide_reaches(board, from, target, movement.rays)
        }
    }
}

/// Whether any piece of `by_color` attacks `square`
///
/// # Examples
///
/// ```rust
/// use chess_rules::{move_gen::is_square_attacked, Board, PieceColor, Position};
///
/// let board = Board::standard();
/// // f3 is covered by White's g2 pawn and g1 knight
/// assert!(is_square_attacked(&board, Position::new(2, 5), PieceColor::White));
/// assert!(!is_square_attacked(&board, Position::new(3, 4), PieceColor::White));
/// ```
pub fn is_square_attacked(board: &Board, square: Position, by_color: PieceColor) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by_color)
        .any(|(from, _)| attacks(board, from, square))
}
