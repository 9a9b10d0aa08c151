//! Pawn pseudo-legal move generation.
//!
//! Pushes require empty squares, the double push only leaves the pawn's
//! start rank, and diagonal steps require an enemy piece or the en-passant
//! target. Any arrival on the last rank fans out into the four promotion
//! kinds.

use crate::board::chess_rules::{
    BLACK_PAWN_START_RANK, BLACK_PROMOTION_RANK, WHITE_PAWN_START_RANK, WHITE_PROMOTION_RANK,
};
use crate::board::chess_types::*;
use crate::board::mailbox::{Cell, EAST, NORTH, SOUTH, WEST};
use crate::board::position::Position;

pub fn generate_pawn_moves(position: &Position, from: Square, out: &mut Vec<Move>) {
    let us = position.side_to_move;
    let (forward, start_rank) = match us {
        Color::White => (NORTH, WHITE_PAWN_START_RANK),
        Color::Black => (SOUTH, BLACK_PAWN_START_RANK),
    };
    let origin = from.mailbox() as i16;

    // Single push, and the double push while both squares are empty.
    if let Some(to) = empty_square(position, origin + forward) {
        push_with_promotions(us, from, to, out);
        if from.rank() == start_rank {
            if let Some(to_double) = empty_square(position, origin + 2 * forward) {
                out.push(Move::new(from, to_double));
            }
        }
    }

    // Diagonal captures, including the en-passant taking of an empty target.
    for side in [WEST, EAST] {
        let target = origin + forward + side;
        match position.cell(target) {
            Cell::Piece(piece) if piece.color != us => {
                if let Some(to) = Square::from_mailbox(target) {
                    push_with_promotions(us, from, to, out);
                }
            }
            Cell::Empty => {
                if let Some(to) = Square::from_mailbox(target) {
                    if position.en_passant_target == Some(to) {
                        out.push(Move::new(from, to));
                    }
                }
            }
            _ => {}
        }
    }
}

fn empty_square(position: &Position, index: i16) -> Option<Square> {
    match position.cell(index) {
        Cell::Empty => Square::from_mailbox(index),
        _ => None,
    }
}

fn push_with_promotions(us: Color, from: Square, to: Square, out: &mut Vec<Move>) {
    let promotion_rank = match us {
        Color::White => WHITE_PROMOTION_RANK,
        Color::Black => BLACK_PROMOTION_RANK,
    };
    if to.rank() == promotion_rank {
        for kind in PROMOTION_KINDS {
            out.push(Move::promoting(from, to, kind));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::fen_parser::parse_fen;

    fn pawn_moves_from(fen: &str, square: &str) -> Vec<String> {
        let position = parse_fen(fen).expect("FEN should parse");
        let from = Square::from_algebraic(square).expect("square should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&position, from, &mut out);
        out.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn an_unmoved_pawn_may_push_one_or_two_squares() {
        let moves = pawn_moves_from(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2",
        );
        assert_eq!(moves, vec!["e2e3", "e2e4"]);
    }

    #[test]
    fn a_blocked_pawn_cannot_push_at_all() {
        let moves = pawn_moves_from("4k3/8/8/8/4p3/4P3/8/4K3 w - - 0 1", "e3");
        assert!(moves.is_empty());
    }

    #[test]
    fn the_double_push_needs_both_squares_empty() {
        let moves = pawn_moves_from("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
        let moves = pawn_moves_from("4k3/8/8/8/4p3/8/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(moves, vec!["e2e3"]);
    }

    #[test]
    fn diagonals_only_capture_enemy_pieces() {
        let moves = pawn_moves_from("4k3/8/8/8/3p1N2/4P3/8/4K3 w - - 0 1", "e3");
        assert_eq!(moves, vec!["e3e4", "e3d4"]);
    }

    #[test]
    fn black_pawns_move_toward_rank_one() {
        let moves = pawn_moves_from(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
            "d7",
        );
        assert_eq!(moves, vec!["d7d6", "d7d5"]);
    }

    #[test]
    fn the_en_passant_target_is_capturable() {
        let moves = pawn_moves_from(
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3",
            "d4",
        );
        assert_eq!(moves, vec!["d4d3", "d4e3"]);
    }

    #[test]
    fn reaching_the_last_rank_offers_four_promotions() {
        let moves = pawn_moves_from("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7");
        assert_eq!(moves, vec!["a7a8n", "a7a8b", "a7a8r", "a7a8q"]);
    }

    #[test]
    fn promotion_captures_fan_out_too() {
        let moves = pawn_moves_from("1n5k/P7/8/8/8/8/8/K7 w - - 0 1", "a7");
        assert_eq!(
            moves,
            vec![
                "a7a8n", "a7a8b", "a7a8r", "a7a8q", "a7b8n", "a7b8b", "a7b8r", "a7b8q"
            ]
        );
    }
}
