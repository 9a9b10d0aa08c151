//! Padded 10x12 board geometry.
//!
//! The playing surface is embedded in a 120-cell array with a two-row apron
//! on top and bottom and a one-column apron on each side. Direction walks can
//! probe any neighbor of a playable cell without a range check because every
//! off-board cell holds a sentinel.

use crate::board::chess_types::Piece;

/// Total cell count of the padded board.
pub const BOARD_CELLS: usize = 120;

/// Mailbox index of the a1 corner.
pub const A1: usize = 91;
/// Mailbox index of the h1 corner.
pub const H1: usize = 98;
/// Mailbox index of the a8 corner.
pub const A8: usize = 21;
/// Mailbox index of the h8 corner.
pub const H8: usize = 28;

/// One step toward rank 8.
pub const NORTH: i16 = -10;
/// One step toward the h-file.
pub const EAST: i16 = 1;
/// One step toward rank 1.
pub const SOUTH: i16 = 10;
/// One step toward the a-file.
pub const WEST: i16 = -1;

/// Contents of one mailbox cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Sentinel apron outside the playing surface.
    Off,
    Empty,
    Piece(Piece),
}

impl Cell {
    /// Occupying piece, if this cell holds one.
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Piece(piece) => Some(piece),
            _ => None,
        }
    }
}

/// Whether `index` addresses one of the 64 playable cells.
#[inline]
pub const fn is_on_board(index: i16) -> bool {
    if index < 0 || index >= BOARD_CELLS as i16 {
        return false;
    }
    let row = index / 10;
    let col = index % 10;
    2 <= row && row <= 9 && 1 <= col && col <= 8
}

/// Mailbox index for a (file, rank) pair, both `0..=7`.
#[inline]
pub const fn index_of(file: u8, rank: u8) -> usize {
    21 + (7 - rank as usize) * 10 + file as usize
}

/// File (`0..=7`) of a playable mailbox index.
#[inline]
pub const fn file_of(index: usize) -> u8 {
    (index % 10 - 1) as u8
}

/// Rank (`0..=7`) of a playable mailbox index.
#[inline]
pub const fn rank_of(index: usize) -> u8 {
    (9 - index / 10) as u8
}

/// 180-degree reflection used to mirror piece-square lookups for black.
#[inline]
pub const fn mirror(index: usize) -> usize {
    119 - index
}
