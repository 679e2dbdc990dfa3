//! # Movement Constants - Direction Tables & Game Limits
//!
//! ## Overview
//!
//! Every piece in the catalog is described by a handful of `(row, column)` offset tables.
//! Sliding pieces walk a direction until blocked; leapers jump straight to a fixed offset
//! regardless of what sits in between. Keeping the tables here lets the piece catalog stay a
//! pure mapping from kind to geometry (see [`crate::piece::Movement`]).
//!
//! ## Coordinate Convention
//!
//! Offsets are `(d_row, d_column)` with row 0 being White's back rank:
//!
//! - **North**: `(1, 0)` (towards Black)
//! - **South**: `(-1, 0)`
//! - **East**: `(0, 1)` (towards the h-file)
//! - **West**: `(0, -1)`
//!
//! ## Leaper Notation
//!
//! Fairy-chess literature names leapers by their offset: the knight is a (2,1) leaper, the
//! camel a (3,1) leaper, the zebra a (3,2) leaper. Each table lists all eight symmetric
//! variants of the offset.

/// Rook directions
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Queen directions, also the king's single steps
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// (2,1) leaper
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// (3,1) leaper
pub const CAMEL_JUMPS: [(i8, i8); 8] = [
    (3, 1),
    (3, -1),
    (-3, 1),
    (-3, -1),
    (1, 3),
    (1, -3),
    (-1, 3),
    (-1, -3),
];

/// Empty table for pieces without that kind of movement
pub const NO_OFFSETS: [(i8, i8); 0] = [];

/// Home columns of the castling rooks
pub const KINGSIDE_ROOK_COLUMN: i8 = 7;
pub const QUEENSIDE_ROOK_COLUMN: i8 = 0;

/// Half-moves without capture or pawn move before the game is drawn
pub const FIFTY_MOVE_LIMIT: u32 = 100;
