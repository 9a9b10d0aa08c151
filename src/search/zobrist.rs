//! Zobrist signature support for transposition and killer-move lookups.
//!
//! A signature covers piece placement, the side to move, the castling mask,
//! and the en-passant file, so two states that differ in any of those never
//! share a key by construction. Key material comes from a fixed splitmix64
//! seed, which makes every run map a given state to the same signature.

use std::sync::OnceLock;

use crate::board::chess_types::{CastlingRights, Color, Piece, Square};
use crate::board::position::Position;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = SplitMix64(0x9E37_79B9_7F4A_7C15);
    ZobristTables {
        piece_square: std::array::from_fn(|_| {
            std::array::from_fn(|_| std::array::from_fn(|_| rng.next()))
        }),
        side_to_move: rng.next(),
        castling: std::array::from_fn(|_| rng.next()),
        en_passant_file: std::array::from_fn(|_| rng.next()),
    }
}

/// splitmix64 over a running state word.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut word = self.0;
        word = (word ^ (word >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        word = (word ^ (word >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        word ^ (word >> 31)
    }
}

#[inline]
fn square_ordinal(square: Square) -> usize {
    square.rank() as usize * 8 + square.file() as usize
}

/// Key for `piece` occupying `square`.
#[inline]
pub fn piece_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square_ordinal(square)]
}

/// Key folded in for the current castling mask.
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

/// Key contribution for an en-passant target; `None` contributes nothing.
#[inline]
pub fn en_passant_key(target: Option<Square>) -> u64 {
    match target {
        Some(square) => tables().en_passant_file[square.file() as usize],
        None => 0,
    }
}

/// Side-to-move toggle key (xor in when black is to move).
#[inline]
pub fn side_key() -> u64 {
    tables().side_to_move
}

/// Compute the full signature from the complete position state.
pub fn compute_signature(position: &Position) -> u64 {
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for (square, piece) in position.pieces_of(color) {
            key ^= piece_key(piece, square);
        }
    }

    if position.side_to_move == Color::Black {
        key ^= side_key();
    }

    key ^= castling_key(position.castling_rights);
    key ^= en_passant_key(position.en_passant_target);

    key
}
