//! Pseudo-legal move generation entry point.

use crate::board::chess_types::*;
use crate::board::position::Position;
use crate::move_generation::king_moves::generate_king_moves;
use crate::move_generation::knight_moves::generate_knight_moves;
use crate::move_generation::pawn_moves::generate_pawn_moves;
use crate::move_generation::sliding_moves::generate_sliding_moves;

/// Every pseudo-legal move for the side to move.
///
/// Moves obey piece movement rules but may still leave the mover's own king
/// attacked; [`legality`](crate::move_generation::legality) owns that
/// judgment.
pub fn generate_pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(128);
    for (square, piece) in position.pieces_of(position.side_to_move) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(position, square, &mut out),
            PieceKind::Knight => generate_knight_moves(position, square, &mut out),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                generate_sliding_moves(position, square, piece.kind, &mut out)
            }
            PieceKind::King => generate_king_moves(position, square, &mut out),
        }
    }
    out
}
