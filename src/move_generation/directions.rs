//! Direction offset tables for every piece kind on the padded board.

use crate::board::mailbox::{EAST, NORTH, SOUTH, WEST};

/// Knight jump offsets.
pub const KNIGHT_DIRECTIONS: [i16; 8] = [
    NORTH + NORTH + EAST,
    EAST + NORTH + EAST,
    EAST + SOUTH + EAST,
    SOUTH + SOUTH + EAST,
    SOUTH + SOUTH + WEST,
    WEST + SOUTH + WEST,
    WEST + NORTH + WEST,
    NORTH + NORTH + WEST,
];

/// Bishop ray offsets.
pub const BISHOP_DIRECTIONS: [i16; 4] = [
    NORTH + EAST,
    SOUTH + EAST,
    SOUTH + WEST,
    NORTH + WEST,
];

/// Rook ray offsets.
pub const ROOK_DIRECTIONS: [i16; 4] = [NORTH, EAST, SOUTH, WEST];

/// Queen and king offsets: every straight and diagonal neighbor.
pub const ROYAL_DIRECTIONS: [i16; 8] = [
    NORTH,
    EAST,
    SOUTH,
    WEST,
    NORTH + EAST,
    SOUTH + EAST,
    SOUTH + WEST,
    NORTH + WEST,
];
