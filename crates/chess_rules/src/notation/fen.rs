//! Position text import and export
//!
//! ## Format
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1
//! ```
//!
//! 1. Placement, rank 8 first, digits for runs of empty squares
//! 2. Side to move, `w` or `b`
//! 3. Castling rights from `KQkq`, or `-`
//! 4. En-passant target square, or `-`
//! 5. Half-move clock (optional on import, default 0)
//! 6. Full-move number (optional on import, default 1)
//!
//! Fairy pieces use the letters from [`PieceType::letter`], so a board that
//! only holds the six standard kinds produces ordinary FEN.
//!
//! ## Moved Flags
//!
//! FEN has no per-piece history, so import reconstructs the flags the rules
//! care about: pawns away from their starting row are marked moved, and
//! kings and rooks are marked moved unless a castling right keeps them
//! unmoved.

use crate::board::Board;
use crate::constants::{KINGSIDE_ROOK_COLUMN, QUEENSIDE_ROOK_COLUMN};
use crate::error::{ChessRulesError, RulesResult};
use crate::piece::Piece;
use crate::state::GameState;
use crate::types::{GameMode, PieceColor, PieceType, Position, BOARD_SIZE};
use crate::validation;

/// The standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn invalid(message: impl Into<String>) -> ChessRulesError {
    ChessRulesError::InvalidFen {
        message: message.into(),
    }
}

/// Castling right letters, in FEN order
const CASTLING_RIGHTS: [(char, PieceColor, i8); 4] = [
    ('K', PieceColor::White, KINGSIDE_ROOK_COLUMN),
    ('Q', PieceColor::White, QUEENSIDE_ROOK_COLUMN),
    ('k', PieceColor::Black, KINGSIDE_ROOK_COLUMN),
    ('q', PieceColor::Black, QUEENSIDE_ROOK_COLUMN),
];

/// Whether `color` still has an unmoved king on its home row and an unmoved
/// rook in the given corner
fn has_castling_right(board: &Board, color: PieceColor, rook_column: i8) -> bool {
    let row = color.home_row();
    let king_ready = board
        .find_by_type(PieceType::King, Some(color))
        .iter()
        .any(|(square, king)| square.row == row && !king.has_moved);
    let rook_ready = board
        .piece_at(Position::new(row, rook_column))
        .is_some_and(|rook| rook.kind == PieceType::Rook && rook.color == color && !rook.has_moved);
    king_ready && rook_ready
}

fn placement_to_fen(board: &Board) -> String {
    let mut text = String::new();
    for row in (0..BOARD_SIZE).rev() {
        let mut empty: u8 = 0;
        for column in 0..BOARD_SIZE {
            match board.piece_at(Position::new(row, column)) {
                Some(piece) => {
                    if empty > 0 {
                        text.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    text.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            text.push(char::from(b'0' + empty));
        }
        if row > 0 {
            text.push('/');
        }
    }
    text
}

fn placement_from_fen(placement: &str) -> RulesResult<Board> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = Board::empty();
    for (index, rank) in ranks.iter().enumerate() {
        let row = BOARD_SIZE - 1 - index as i8;
        let mut column: i8 = 0;
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(invalid(format!("bad empty-square count '{c}'")));
                }
                column += run as i8;
            } else {
                let mut piece =
                    Piece::from_fen_char(c).ok_or_else(|| invalid(format!("unknown piece '{c}'")))?;
                if column >= BOARD_SIZE {
                    return Err(invalid(format!("rank {} is too long", row + 1)));
                }
                piece.has_moved = match piece.kind {
                    PieceType::Pawn => row != piece.color.home_row() + piece.color.forward(),
                    PieceType::King | PieceType::Rook => true,
                    _ => false,
                };
                board.set(Position::new(row, column), Some(piece))?;
                column += 1;
            }
            if column > BOARD_SIZE {
                return Err(invalid(format!("rank {} is too long", row + 1)));
            }
        }
        if column != BOARD_SIZE {
            return Err(invalid(format!("rank {} has {column} squares", row + 1)));
        }
    }
    Ok(board)
}

fn apply_castling_rights(board: &mut Board, rights: &str) -> RulesResult<()> {
    if rights == "-" {
        return Ok(());
    }
    for c in rights.chars() {
        let &(_, color, rook_column) = CASTLING_RIGHTS
            .iter()
            .find(|(letter, _, _)| *letter == c)
            .ok_or_else(|| invalid(format!("unknown castling right '{c}'")))?;

        let row = color.home_row();
        let (king_square, king) = board
            .find_by_type(PieceType::King, Some(color))
            .into_iter()
            .find(|(square, _)| square.row == row)
            .ok_or_else(|| invalid(format!("castling right '{c}' without a king on its home row")))?;
        let rook_square = Position::new(row, rook_column);
        let rook = board
            .piece_at(rook_square)
            .filter(|rook| rook.kind == PieceType::Rook && rook.color == color)
            .ok_or_else(|| invalid(format!("castling right '{c}' without a rook in the corner")))?;

        board.set(king_square, Some(Piece { has_moved: false, ..king }))?;
        board.set(rook_square, Some(Piece { has_moved: false, ..rook }))?;
    }
    Ok(())
}

impl GameState {
    /// Export the position as FEN
    pub fn to_fen(&self) -> String {
        let active = match self.current_player {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        };

        let mut castling: String = if self.board.allow_castling {
            CASTLING_RIGHTS
                .iter()
                .filter(|(_, color, column)| has_castling_right(&self.board, *color, *column))
                .map(|(letter, _, _)| *letter)
                .collect()
        } else {
            String::new()
        };
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |square| square.to_notation());

        format!(
            "{} {} {} {} {} {}",
            placement_to_fen(&self.board),
            active,
            castling,
            en_passant,
            self.half_move_clock,
            self.full_move_number
        )
    }

    /// Import a position from FEN
    ///
    /// The game mode is `Standard` when the placement and rights match the
    /// starting position, `Custom` otherwise. Check and result flags are
    /// computed for the side to move.
    ///
    /// # Errors
    ///
    /// [`ChessRulesError::InvalidFen`] for malformed text and
    /// [`ChessRulesError::InvalidSetup`] when the placement fails
    /// [`Board::validate`].
    pub fn from_fen(text: &str) -> RulesResult<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(invalid(format!("expected 4 to 6 fields, found {}", fields.len())));
        }

        let mut board = placement_from_fen(fields[0])?;
        apply_castling_rights(&mut board, fields[2])?;
        board.validate()?;

        let current_player = match fields[1] {
            "w" => PieceColor::White,
            "b" => PieceColor::Black,
            other => return Err(invalid(format!("bad side to move '{other}'"))),
        };

        let en_passant_target = match fields[3] {
            "-" => None,
            square => Some(
                Position::from_notation(square)
                    .map_err(|_| invalid(format!("bad en-passant square '{square}'")))?,
            ),
        };

        let half_move_clock = match fields.get(4) {
            Some(value) => value
                .parse()
                .map_err(|_| invalid(format!("bad half-move clock '{value}'")))?,
            None => 0,
        };
        let full_move_number = match fields.get(5) {
            Some(value) => value
                .parse()
                .map_err(|_| invalid(format!("bad full-move number '{value}'")))?,
            None => 1,
        };

        let mode = if board == Board::standard() {
            GameMode::Standard
        } else {
            GameMode::Custom
        };

        let mut state = GameState::custom(board, current_player);
        state.mode = mode;
        state.en_passant_target = en_passant_target;
        state.half_move_clock = half_move_clock;
        state.full_move_number = full_move_number;
        validation::refresh_status(&mut state);
        Ok(state)
    }
}
