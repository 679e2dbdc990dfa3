//! Core value types for the rules engine
//!
//! Small `Copy` types shared by every other module: board coordinates,
//! piece colour and kind, and the game-level result and mode tags.

use crate::error::{ChessRulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board size along both axes
pub const BOARD_SIZE: i8 = 8;

/// A square on the 8x8 grid as `(row, column)`
///
/// Row 0 is rank 1 (White's back rank) and column 0 is file 'a'. Both
/// coordinates are signed so offset arithmetic can step off the board; such a
/// position is representable but [`Position::is_valid`] reports `false` and the
/// board refuses to index with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    /// Create a position from row and column indices
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chess_rules::Position;
    /// let e4 = Position::new(3, 4);
    /// assert_eq!(e4.to_notation(), "e4");
    /// ```
    pub const fn new(row: i8, column: i8) -> Self {
        Position { row, column }
    }

    /// Parse algebraic notation such as `"e4"`
    ///
    /// Anything other than exactly a file letter `a..h` followed by a rank
    /// digit `1..8` is rejected with [`ChessRulesError::InvalidNotation`].
    pub fn from_notation(notation: &str) -> RulesResult<Self> {
        let invalid = || ChessRulesError::InvalidNotation {
            notation: notation.to_string(),
        };

        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }

        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }

        Ok(Position::new((rank - b'1') as i8, (file - b'a') as i8))
    }

    /// Whether both coordinates fall inside the board
    #[inline]
    pub fn is_valid(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.column)
    }

    /// Algebraic notation (`"a1"`..`"h8"`)
    ///
    /// Only meaningful for valid positions; invalid ones render as
    /// `"(row,column)"` so they are never mistaken for a real square.
    pub fn to_notation(self) -> String {
        if self.is_valid() {
            format!(
                "{}{}",
                (b'a' + self.column as u8) as char,
                (b'1' + self.row as u8) as char
            )
        } else {
            format!("({},{})", self.row, self.column)
        }
    }

    /// Position shifted by a row/column delta; may be off the board
    #[inline]
    pub fn offset(self, d_row: i8, d_column: i8) -> Self {
        Position::new(self.row.saturating_add(d_row), self.column.saturating_add(d_column))
    }

    /// Flat index `row * 8 + column`, `None` when off the board
    #[inline]
    pub fn index(self) -> Option<usize> {
        self.is_valid()
            .then(|| self.row as usize * BOARD_SIZE as usize + self.column as usize)
    }

    /// File character for valid positions
    pub fn file_char(self) -> char {
        (b'a' + self.column.clamp(0, BOARD_SIZE - 1) as u8) as char
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl FromStr for Position {
    type Err = ChessRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_notation(s)
    }
}

/// Side owning a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Row delta for this side's pawns
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => -1,
        }
    }

    /// Back rank row (where the king starts)
    #[inline]
    pub fn home_row(self) -> i8 {
        match self {
            PieceColor::White => 0,
            PieceColor::Black => BOARD_SIZE - 1,
        }
    }

    /// Farthest row, where pawns promote
    #[inline]
    pub fn promotion_row(self) -> i8 {
        self.opponent().home_row()
    }
}

/// Every kind of piece the engine knows about
///
/// The first six are the standard pieces. The fairy kinds from `Archbishop`
/// through `Camel` have full movement rules; the remaining ones are declared
/// but not yet implemented and move like a Ferz (see
/// [`PieceType::is_implemented`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    /// Bishop + knight
    Archbishop,
    /// Rook + knight
    Chancellor,
    /// Queen + knight
    Amazon,
    /// One step diagonally
    Ferz,
    /// One step orthogonally
    Wazir,
    /// (3,1) leaper
    Camel,
    Zebra,
    Unicorn,
    Dragon,
    Gryphon,
    Nightrider,
    Grasshopper,
    Centaur,
    Mann,
    Guard,
}

impl PieceType {
    /// All kinds, standard first
    pub const ALL: [PieceType; 21] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
        PieceType::Archbishop,
        PieceType::Chancellor,
        PieceType::Amazon,
        PieceType::Ferz,
        PieceType::Wazir,
        PieceType::Camel,
        PieceType::Zebra,
        PieceType::Unicorn,
        PieceType::Dragon,
        PieceType::Gryphon,
        PieceType::Nightrider,
        PieceType::Grasshopper,
        PieceType::Centaur,
        PieceType::Mann,
        PieceType::Guard,
    ];

    /// Material value in pawns
    ///
    /// Unimplemented fairy kinds are valued like the Ferz they currently
    /// move as.
    pub fn point_value(self) -> i32 {
        match self {
            PieceType::King => 0,
            PieceType::Queen => 9,
            PieceType::Rook => 5,
            PieceType::Bishop | PieceType::Knight => 3,
            PieceType::Pawn => 1,
            PieceType::Archbishop | PieceType::Chancellor => 8,
            PieceType::Amazon => 12,
            _ => 2,
        }
    }

    /// Uppercase letter used in FEN and move notation
    pub fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
            PieceType::Archbishop => 'A',
            PieceType::Chancellor => 'C',
            PieceType::Amazon => 'M',
            PieceType::Ferz => 'F',
            PieceType::Wazir => 'W',
            PieceType::Camel => 'L',
            PieceType::Zebra => 'Z',
            PieceType::Unicorn => 'Y',
            PieceType::Dragon => 'D',
            PieceType::Gryphon => 'G',
            PieceType::Nightrider => 'I',
            PieceType::Grasshopper => 'H',
            PieceType::Centaur => 'U',
            PieceType::Mann => 'X',
            PieceType::Guard => 'T',
        }
    }

    /// Inverse of [`PieceType::letter`], case-insensitive
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        PieceType::ALL.into_iter().find(|kind| kind.letter() == upper)
    }

    /// Whether the kind has its own movement rules
    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            PieceType::Zebra
                | PieceType::Unicorn
                | PieceType::Dragon
                | PieceType::Gryphon
                | PieceType::Nightrider
                | PieceType::Grasshopper
                | PieceType::Centaur
                | PieceType::Mann
                | PieceType::Guard
        )
    }

    /// One of the six orthodox pieces
    pub fn is_standard(self) -> bool {
        matches!(
            self,
            PieceType::King
                | PieceType::Queen
                | PieceType::Rook
                | PieceType::Bishop
                | PieceType::Knight
                | PieceType::Pawn
        )
    }

    /// Whether a pawn may promote into this kind
    pub fn is_promotion_target(self) -> bool {
        self.is_implemented() && !matches!(self, PieceType::King | PieceType::Pawn)
    }
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    InProgress,
    WhiteWins,
    BlackWins,
    /// Fifty-move rule
    Draw,
    Stalemate,
}

impl GameResult {
    /// Checkmate win for `winner`
    pub fn win_for(winner: PieceColor) -> Self {
        match winner {
            PieceColor::White => GameResult::WhiteWins,
            PieceColor::Black => GameResult::BlackWins,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }

    /// Short human-readable summary
    pub fn message(self) -> &'static str {
        match self {
            GameResult::InProgress => "Game in progress",
            GameResult::WhiteWins => "White wins by checkmate",
            GameResult::BlackWins => "Black wins by checkmate",
            GameResult::Draw => "Draw by the fifty-move rule",
            GameResult::Stalemate => "Draw by stalemate",
        }
    }
}

/// How the match was set up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Standard,
    Custom,
}
