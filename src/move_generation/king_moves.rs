//! King pseudo-legal move generation, including castling.
//!
//! Castling is emitted only when the right is still held, the king and rook
//! stand on their home squares, every square between them is empty, and the
//! king neither starts from nor passes through an attacked square. The
//! landing square is left to the legality filter like any other move.

use crate::board::chess_types::*;
use crate::board::mailbox::{Cell, EAST, WEST};
use crate::board::position::Position;
use crate::move_generation::attack_checks::is_square_attacked;
use crate::move_generation::directions::ROYAL_DIRECTIONS;

pub fn generate_king_moves(position: &Position, from: Square, out: &mut Vec<Move>) {
    let us = position.side_to_move;
    let origin = from.mailbox() as i16;
    for step in ROYAL_DIRECTIONS {
        let target = origin + step;
        let landable = match position.cell(target) {
            Cell::Empty => true,
            Cell::Piece(piece) => piece.color != us,
            Cell::Off => false,
        };
        if landable {
            if let Some(to) = Square::from_mailbox(target) {
                out.push(Move::new(from, to));
            }
        }
    }
    generate_castling_moves(position, from, out);
}

fn generate_castling_moves(position: &Position, from: Square, out: &mut Vec<Move>) {
    let us = position.side_to_move;
    let (kingside_right, queenside_right, home_rank) = match us {
        Color::White => (CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE, 0),
        Color::Black => (CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, 7),
    };
    if from.file() != 4 || from.rank() != home_rank {
        return;
    }
    let them = us.opposite();
    // Castling out of check is never available.
    if is_square_attacked(position, from, them) {
        return;
    }
    let origin = from.mailbox() as i16;

    if position.castling_rights & kingside_right != 0
        && own_rook_at(position, us, origin + 3 * EAST)
        && path_is_empty(position, &[origin + EAST, origin + 2 * EAST])
        && transit_is_safe(position, origin + EAST, them)
    {
        if let Some(to) = Square::from_mailbox(origin + 2 * EAST) {
            out.push(Move::new(from, to));
        }
    }

    if position.castling_rights & queenside_right != 0
        && own_rook_at(position, us, origin + 4 * WEST)
        && path_is_empty(position, &[origin + WEST, origin + 2 * WEST, origin + 3 * WEST])
        && transit_is_safe(position, origin + WEST, them)
    {
        if let Some(to) = Square::from_mailbox(origin + 2 * WEST) {
            out.push(Move::new(from, to));
        }
    }
}

fn own_rook_at(position: &Position, us: Color, index: i16) -> bool {
    matches!(
        position.cell(index),
        Cell::Piece(piece) if piece == Piece::new(us, PieceKind::Rook)
    )
}

fn path_is_empty(position: &Position, indices: &[i16]) -> bool {
    indices
        .iter()
        .all(|&index| position.cell(index) == Cell::Empty)
}

fn transit_is_safe(position: &Position, index: i16, them: Color) -> bool {
    match Square::from_mailbox(index) {
        Some(square) => !is_square_attacked(position, square, them),
        None => false,
    }
}
