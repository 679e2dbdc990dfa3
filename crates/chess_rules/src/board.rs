//! Board representation
//!
//! An 8x8 grid of optional pieces indexed `[row][column]`, plus the two
//! per-match rule switches (castling and en passant) that custom games can
//! turn off.
//!
//! The fallible accessors ([`Board::get`], [`Board::set`], [`Board::is_empty`],
//! [`Board::move_piece`]) reject off-board positions with
//! [`ChessRulesError::OutOfBounds`]. Move generation works on positions it has
//! already bounds-checked and uses the infallible [`Board::piece_at`] instead.

use crate::error::{ChessRulesError, RulesResult};
use crate::piece::Piece;
use crate::types::{PieceColor, PieceType, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The playing surface
///
/// Cloning is a full copy: pieces are plain values, so the clone shares
/// nothing with its source and keeps every moved flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pub allow_castling: bool,
    pub allow_en_passant: bool,
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl Board {
    /// Board with no pieces and both special moves enabled
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            allow_castling: true,
            allow_en_passant: true,
        }
    }

    /// Standard starting position
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (column, kind) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][column] = Some(Piece::new(kind, PieceColor::White));
            board.squares[1][column] = Some(Piece::new(PieceType::Pawn, PieceColor::White));
            board.squares[6][column] = Some(Piece::new(PieceType::Pawn, PieceColor::Black));
            board.squares[7][column] = Some(Piece::new(kind, PieceColor::Black));
        }
        board
    }

    fn check_bounds(position: Position) -> RulesResult<(usize, usize)> {
        if position.is_valid() {
            Ok((position.row as usize, position.column as usize))
        } else {
            Err(ChessRulesError::OutOfBounds {
                row: position.row,
                column: position.column,
            })
        }
    }

    /// Occupant of a square
    pub fn get(&self, position: Position) -> RulesResult<Option<Piece>> {
        let (row, column) = Self::check_bounds(position)?;
        Ok(self.squares[row][column])
    }

    /// Place a piece on a square or clear it
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> RulesResult<()> {
        let (row, column) = Self::check_bounds(position)?;
        self.squares[row][column] = piece;
        Ok(())
    }

    pub fn is_empty(&self, position: Position) -> RulesResult<bool> {
        Ok(self.get(position)?.is_none())
    }

    /// Occupant of a square, `None` when empty or off the board
    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        if position.is_valid() {
            self.squares[position.row as usize][position.column as usize]
        } else {
            None
        }
    }

    /// Relocate the occupant of `from` to `to` and mark it moved
    ///
    /// No legality checks. Whatever stood on `to` is removed from the board
    /// and returned.
    pub fn move_piece(&mut self, from: Position, to: Position) -> RulesResult<Option<Piece>> {
        let (from_row, from_column) = Self::check_bounds(from)?;
        let (to_row, to_column) = Self::check_bounds(to)?;

        let piece = self.squares[from_row][from_column]
            .take()
            .ok_or(ChessRulesError::EmptySquare { square: from })?;
        let captured = self.squares[to_row][to_column].replace(piece.moved());
        Ok(captured)
    }

    /// Every occupied square, rank 1 first
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter().enumerate().filter_map(move |(column, square)| {
                square.map(|piece| (Position::new(row as i8, column as i8), piece))
            })
        })
    }

    /// Square of the first king of `color`, scanning from a1
    pub fn find_king(&self, color: PieceColor) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceType::King && piece.color == color)
            .map(|(position, _)| position)
    }

    pub fn pieces_of_color(&self, color: PieceColor) -> Vec<(Position, Piece)> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// Pieces of one kind, optionally restricted to one side
    pub fn find_by_type(
        &self,
        kind: PieceType,
        color: Option<PieceColor>,
    ) -> Vec<(Position, Piece)> {
        self.pieces()
            .filter(|(_, piece)| piece.kind == kind && color.map_or(true, |c| piece.color == c))
            .collect()
    }

    /// Sum of point values for one side
    pub fn material_value(&self, color: PieceColor) -> i32 {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(_, piece)| piece.point_value())
            .sum()
    }

    /// Number of pieces of each kind for one side
    pub fn piece_counts(&self, color: PieceColor) -> HashMap<PieceType, usize> {
        let mut counts = HashMap::new();
        for (_, piece) in self.pieces().filter(|(_, piece)| piece.color == color) {
            *counts.entry(piece.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Pieces whose kind still moves with the Ferz placeholder
    pub fn unimplemented_pieces(&self) -> Vec<(Position, Piece)> {
        self.pieces()
            .filter(|(_, piece)| !piece.kind.is_implemented())
            .collect()
    }

    /// Check that the position is playable
    ///
    /// Requires exactly one king per side and at least one piece per side.
    /// All problems are collected into a single `InvalidSetup` message.
    pub fn validate(&self) -> RulesResult<()> {
        let mut problems = Vec::new();

        for color in [PieceColor::White, PieceColor::Black] {
            let kings = self.find_by_type(PieceType::King, Some(color)).len();
            match kings {
                1 => {}
                0 => problems.push(format!("{color:?} must have a king")),
                n => problems.push(format!("{color:?} has {n} kings, only one is allowed")),
            }
            if self.pieces().all(|(_, piece)| piece.color != color) {
                problems.push(format!("{color:?} has no pieces"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ChessRulesError::InvalidSetup {
                message: problems.join("; "),
            })
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for column in 0..BOARD_SIZE {
                let symbol = self
                    .piece_at(Position::new(row, column))
                    .map_or('.', |piece| piece.fen_char());
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for column in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + column as u8) as char)?;
        }
        writeln!(f)
    }
}
