//! Square attack queries shared by legality filtering, castling, and search.

use crate::board::chess_types::*;
use crate::board::mailbox::{Cell, EAST, NORTH, SOUTH, WEST};
use crate::board::position::Position;
use crate::move_generation::directions::{
    BISHOP_DIRECTIONS, KNIGHT_DIRECTIONS, ROOK_DIRECTIONS, ROYAL_DIRECTIONS,
};

/// Square of `color`'s king, if one is on the board.
pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    position
        .pieces_of(color)
        .find_map(|(square, piece)| (piece.kind == PieceKind::King).then_some(square))
}

/// Whether `color`'s king is attacked. A missing king reads as attacked, so
/// lines where the king was captured are rejected like any other illegal
/// continuation.
pub fn is_king_attacked(position: &Position, color: Color) -> bool {
    match king_square(position, color) {
        Some(square) => is_square_attacked(position, square, color.opposite()),
        None => true,
    }
}

/// Whether any piece of `by` attacks `square` on the current board.
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    let origin = square.mailbox() as i16;

    for step in ROOK_DIRECTIONS {
        if ray_hits_slider(position, origin, step, by, PieceKind::Rook) {
            return true;
        }
    }
    for step in BISHOP_DIRECTIONS {
        if ray_hits_slider(position, origin, step, by, PieceKind::Bishop) {
            return true;
        }
    }
    for step in KNIGHT_DIRECTIONS {
        if piece_of_kind_at(position, origin + step, by, PieceKind::Knight) {
            return true;
        }
    }

    // Pawns attack diagonally forward, so the probe looks backward from
    // the target square toward the attacker's side.
    let pawn_steps = match by {
        Color::White => [SOUTH + WEST, SOUTH + EAST],
        Color::Black => [NORTH + WEST, NORTH + EAST],
    };
    for step in pawn_steps {
        if piece_of_kind_at(position, origin + step, by, PieceKind::Pawn) {
            return true;
        }
    }

    for step in ROYAL_DIRECTIONS {
        if piece_of_kind_at(position, origin + step, by, PieceKind::King) {
            return true;
        }
    }

    false
}

/// Walk one ray looking for `slider` or a queen of `by`; any other piece
/// blocks the ray.
fn ray_hits_slider(
    position: &Position,
    origin: i16,
    step: i16,
    by: Color,
    slider: PieceKind,
) -> bool {
    let mut target = origin + step;
    loop {
        match position.cell(target) {
            Cell::Empty => target += step,
            Cell::Piece(piece) => {
                return piece.color == by
                    && (piece.kind == slider || piece.kind == PieceKind::Queen);
            }
            Cell::Off => return false,
        }
    }
}

fn piece_of_kind_at(position: &Position, index: i16, by: Color, kind: PieceKind) -> bool {
    matches!(
        position.cell(index),
        Cell::Piece(piece) if piece.color == by && piece.kind == kind
    )
}
