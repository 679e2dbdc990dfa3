//! Game state and move execution
//!
//! [`GameState`] is the complete snapshot of one game: board, side to move,
//! history, counters and result. It is plain data and cheap enough to clone
//! that both the validator (for hypothetical moves) and the coordinator (for
//! commit-by-swap) do so freely.
//!
//! Execution here performs no legality checks. Callers validate first with
//! [`crate::validation::check_move`].

use crate::board::Board;
use crate::error::{ChessRulesError, RulesResult};
use crate::move_gen::castling_rook_squares;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{GameMode, GameResult, PieceColor, PieceType, Position};
use serde::{Deserialize, Serialize};

/// Full mutable game snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: PieceColor,
    /// Completed moves, oldest first
    pub move_history: Vec<Move>,
    pub mode: GameMode,
    pub result: GameResult,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    /// Half-moves since the last capture or pawn move
    pub half_move_clock: u32,
    /// Starts at 1, incremented after each Black move
    pub full_move_number: u32,
    /// Square a pawn skipped with its double step on the previous ply
    pub en_passant_target: Option<Position>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::standard()
    }
}

/// Board-level side effects of one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoardEffects {
    pub captured: Option<Piece>,
    pub is_castling: bool,
    pub is_en_passant: bool,
}

/// Move a piece and apply the castling rook hop or en-passant removal
///
/// Shared by real execution and by the validator's check-avoidance test so
/// both see exactly the same resulting board.
pub(crate) fn play_on_board(
    board: &mut Board,
    from: Position,
    to: Position,
    en_passant_target: Option<Position>,
) -> RulesResult<BoardEffects> {
    let piece = board
        .get(from)?
        .ok_or(ChessRulesError::EmptySquare { square: from })?;
    let mut effects = BoardEffects {
        captured: board.get(to)?,
        is_castling: false,
        is_en_passant: false,
    };

    match piece.kind {
        PieceType::King => {
            if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                board.move_piece(rook_from, rook_to)?;
                effects.is_castling = true;
            }
        }
        PieceType::Pawn
            if from.column != to.column
                && effects.captured.is_none()
                && en_passant_target == Some(to) =>
        {
            let victim = Position::new(from.row, to.column);
            effects.captured = board.get(victim)?;
            board.set(victim, None)?;
            effects.is_en_passant = true;
        }
        _ => {}
    }

    board.move_piece(from, to)?;
    Ok(effects)
}

impl GameState {
    /// Standard starting position, White to move
    pub fn standard() -> Self {
        GameState::with_board(Board::standard(), PieceColor::White, GameMode::Standard)
    }

    /// Fresh game on an arbitrary board
    ///
    /// The board is not validated here; see [`Board::validate`].
    pub fn custom(board: Board, first_player: PieceColor) -> Self {
        GameState::with_board(board, first_player, GameMode::Custom)
    }

    fn with_board(board: Board, current_player: PieceColor, mode: GameMode) -> Self {
        GameState {
            board,
            current_player,
            move_history: Vec::new(),
            mode,
            result: GameResult::InProgress,
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            half_move_clock: 0,
            full_move_number: 1,
            en_passant_target: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last()
    }

    /// Execute a move that has already been validated
    ///
    /// Applies special-move side effects, promotion (to `promotion` when a
    /// pawn reaches its last row), history, side to move and both counters.
    /// Check and result flags are left untouched; the caller recomputes them
    /// with [`crate::validation::refresh_status`].
    ///
    /// # Errors
    ///
    /// Fails only on programming errors (empty or off-board `from`). Callers
    /// that need all-or-nothing behaviour run this on a clone.
    pub fn apply_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: PieceType,
    ) -> RulesResult<Move> {
        let piece = self
            .board
            .get(from)?
            .ok_or(ChessRulesError::EmptySquare { square: from })?;

        let effects = play_on_board(&mut self.board, from, to, self.en_passant_target)?;

        let is_pawn = piece.kind == PieceType::Pawn;
        self.en_passant_target = if is_pawn && (to.row - from.row).abs() == 2 {
            Some(from.offset(piece.color.forward(), 0))
        } else {
            None
        };

        let mut record = Move::new(from, to, piece);
        record.captured = effects.captured;
        record.is_castling = effects.is_castling;
        record.is_en_passant = effects.is_en_passant;

        if is_pawn && to.row == piece.color.promotion_row() {
            self.board
                .set(to, Some(Piece::new(promotion, piece.color).moved()))?;
            record.promotion = Some(promotion);
        }

        // counters come from FEN text and may already sit at u32::MAX
        if is_pawn || record.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock = self.half_move_clock.saturating_add(1);
        }
        if piece.color == PieceColor::Black {
            self.full_move_number = self.full_move_number.saturating_add(1);
        }

        self.current_player = piece.color.opponent();
        self.move_history.push(record);
        Ok(record)
    }
}
