//! Knight pseudo-legal move generation.

use crate::board::chess_types::*;
use crate::board::mailbox::Cell;
use crate::board::position::Position;
use crate::move_generation::directions::KNIGHT_DIRECTIONS;

pub fn generate_knight_moves(position: &Position, from: Square, out: &mut Vec<Move>) {
    let us = position.side_to_move;
    let origin = from.mailbox() as i16;
    for step in KNIGHT_DIRECTIONS {
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
}
