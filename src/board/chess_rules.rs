//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals such as the standard
//! starting position FEN used to initialize and validate position setup.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rank index (`0..=7`) white pawns start on.
pub const WHITE_PAWN_START_RANK: u8 = 1;

/// Rank index (`0..=7`) black pawns start on.
pub const BLACK_PAWN_START_RANK: u8 = 6;

/// Rank index (`0..=7`) a white pawn promotes on.
pub const WHITE_PROMOTION_RANK: u8 = 7;

/// Rank index (`0..=7`) a black pawn promotes on.
pub const BLACK_PROMOTION_RANK: u8 = 0;
