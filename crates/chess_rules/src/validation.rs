//! Move legality
//!
//! Turns the pseudo-legal geometry of [`crate::move_gen`] into fully legal
//! moves. Every function here is a pure query over a [`GameState`] snapshot;
//! nothing is mutated except inside throwaway clones.
//!
//! ## Legality Pipeline
//!
//! 1. A piece of the side to move must stand on the origin square
//! 2. A two-column king move goes through the castling checks
//! 3. A pawn moving diagonally onto an empty square goes through the
//!    en-passant checks
//! 4. Anything else must satisfy the piece's own geometry
//! 5. Check avoidance: the move is played on a cloned board (including the
//!    rook hop or the en-passant removal) and rejected if the mover's king is
//!    attacked afterwards
//!
//! Step 5 always runs, so pins and moves that fail to answer a check are
//! rejected without special handling.


use crate::board::Board;
use crate::error::MoveRejection;
use crate::move_gen::{self, castling_rook_squares, MoveList};
use crate::constants::FIFTY_MOVE_LIMIT;
use crate::state::{play_on_board, GameState};
use crate::types::{GameResult, PieceColor, PieceType, Position};
use tracing::warn;

/// Whether `square` is attacked by any piece of `by_color`
pub fn is_square_under_attack(board: &Board, square: Position, by_color: PieceColor) -> bool {
    move_gen::is_square_attacked(board, square, by_color)
}

/// Whether the king of `color` is attacked
///
/// A board without a king for `color` reports check. That position should be
/// unreachable and treating it as check stops play rather than letting it
/// continue from a broken setup.
pub fn is_check(board: &Board, color: PieceColor) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_under_attack(board, king, color.opponent()),
        None => {
            warn!("[RULES] No {:?} king on the board, treating as check", color);
            true
        }
    }
}

/// Full legality check for the side to move
pub fn check_move(state: &GameState, from: Position, to: Position) -> Result<(), MoveRejection> {
    check_move_for(state, state.current_player, from, to)
}

pub fn is_valid_move(state: &GameState, from: Position, to: Position) -> bool {
    check_move(state, from, to).is_ok()
}

/// Legality check for `color`, whoever is actually to move
fn check_move_for(
    state: &GameState,
    color: PieceColor,
    from: Position,
    to: Position,
) -> Result<(), MoveRejection> {
    for square in [from, to] {
        if !square.is_valid() {
            return Err(MoveRejection::InvalidSquare(square.to_notation()));
        }
    }

    let board = &state.board;
    let piece = board
        .piece_at(from)
        .ok_or(MoveRejection::NoPiece { square: from })?;
    if piece.color != color {
        return Err(MoveRejection::NotYourTurn { to_move: color });
    }

    let geometry = MoveRejection::Geometry {
        kind: piece.kind,
        from,
        to,
    };

    if piece.kind == PieceType::King && castling_rook_squares(from, to).is_some() {
        check_castling(board, color, from, to)?;
    } else if piece.kind == PieceType::Pawn
        && (to.column - from.column).abs() == 1
        && board.piece_at(to).is_none()
    {
        if to.row - from.row != color.forward() {
            return Err(geometry);
        }
        check_en_passant(state, color, from, to)?;
    } else if !move_gen::can_move_to(board, from, to) {
        return Err(geometry);
    }

    let mut trial = board.clone();
    if play_on_board(&mut trial, from, to, state.en_passant_target).is_err()
        || is_check(&trial, color)
    {
        return Err(MoveRejection::LeavesKingInCheck { color });
    }

    Ok(())
}

fn check_castling(
    board: &Board,
    color: PieceColor,
    from: Position,
    to: Position,
) -> Result<(), MoveRejection> {
    let reject = |reason| Err(MoveRejection::Castling { reason });

    if !board.allow_castling {
        return reject("castling is disabled in this game");
    }
    if board.piece_at(from).is_some_and(|king| king.has_moved) {
        return reject("the king has already moved");
    }
    let Some((rook_from, crossed)) = castling_rook_squares(from, to) else {
        return reject("the king must move exactly two columns");
    };
    let rook_ready = board.piece_at(rook_from).is_some_and(|rook| {
        rook.kind == PieceType::Rook && rook.color == color && !rook.has_moved
    });
    if !rook_ready {
        return reject("the rook is missing or has moved");
    }
    if !move_gen::can_move_to(board, from, to) {
        return reject("the path between king and rook is blocked");
    }

    let opponent = color.opponent();
    if is_square_under_attack(board, from, opponent) {
        return reject("the king is in check");
    }
    if [crossed, to]
        .into_iter()
        .any(|square| is_square_under_attack(board, square, opponent))
    {
        return reject("the king would pass through an attacked square");
    }
    Ok(())
}

fn check_en_passant(
    state: &GameState,
    color: PieceColor,
    from: Position,
    to: Position,
) -> Result<(), MoveRejection> {
    let reject = |reason| Err(MoveRejection::EnPassant { reason });

    if !state.board.allow_en_passant {
        return reject("en passant is disabled in this game");
    }
    if state.en_passant_target != Some(to) {
        return reject("a pawn may only move diagonally to capture");
    }
    let victim = Position::new(from.row, to.column);
    let has_victim = state
        .board
        .piece_at(victim)
        .is_some_and(|pawn| pawn.kind == PieceType::Pawn && pawn.color != color);
    if !has_victim {
        return reject("there is no pawn to capture");
    }
    Ok(())
}

/// Whether `from -> to` is a pawn reaching its last row
pub fn is_promotion_move(state: &GameState, from: Position, to: Position) -> bool {
    state
        .board
        .piece_at(from)
        .is_some_and(|piece| piece.kind == PieceType::Pawn && to.row == piece.color.promotion_row())
}

/// Kind a promoting pawn becomes
///
/// `None` means Queen. A choice on a non-promoting move is ignored.
pub fn resolve_promotion(
    state: &GameState,
    from: Position,
    to: Position,
    choice: Option<PieceType>,
) -> Result<PieceType, MoveRejection> {
    let kind = choice.unwrap_or(PieceType::Queen);
    if is_promotion_move(state, from, to) && !kind.is_promotion_target() {
        return Err(MoveRejection::Promotion { kind });
    }
    Ok(kind)
}

/// Legal destinations for the piece on `from`
///
/// Empty when the square is empty or holds a piece of the side not to move.
pub fn legal_moves_from(state: &GameState, from: Position) -> MoveList {
    let mut moves = move_gen::possible_moves(&state.board, from);
    moves.retain(|to| check_move(state, from, *to).is_ok());
    moves
}

/// Every legal `(from, to)` pair for the side to move
pub fn all_legal_moves(state: &GameState) -> Vec<(Position, Position)> {
    state
        .board
        .pieces_of_color(state.current_player)
        .into_iter()
        .flat_map(|(from, _)| {
            legal_moves_from(state, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Whether `color` has at least one legal move, stopping at the first found
pub fn has_any_legal_move(state: &GameState, color: PieceColor) -> bool {
    state.board.pieces_of_color(color).into_iter().any(|(from, _)| {
        move_gen::possible_moves(&state.board, from)
            .into_iter()
            .any(|to| check_move_for(state, color, from, to).is_ok())
    })
}

pub fn is_checkmate(state: &GameState, color: PieceColor) -> bool {
    is_check(&state.board, color) && !has_any_legal_move(state, color)
}

pub fn is_stalemate(state: &GameState, color: PieceColor) -> bool {
    !is_check(&state.board, color) && !has_any_legal_move(state, color)
}

/// Recompute check flags and the result for the side to move
///
/// Checkmate takes precedence over stalemate, which takes precedence over the
/// fifty-move draw. The last history entry gets its check flags filled in.
pub fn refresh_status(state: &mut GameState) -> GameResult {
    let color = state.current_player;
    let in_check = is_check(&state.board, color);
    let can_move = has_any_legal_move(state, color);

    state.is_check = in_check;
    state.is_checkmate = in_check && !can_move;
    state.is_stalemate = !in_check && !can_move;

    state.result = if state.is_checkmate {
        GameResult::win_for(color.opponent())
    } else if state.is_stalemate {
        GameResult::Stalemate
    } else if state.half_move_clock >= FIFTY_MOVE_LIMIT {
        GameResult::Draw
    } else {
        GameResult::InProgress
    };

    if let Some(last) = state.move_history.last_mut() {
        last.is_check = in_check;
        last.is_checkmate = state.is_checkmate;
    }
    state.result
}
