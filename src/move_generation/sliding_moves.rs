//! Sliding pseudo-legal move generation for bishops, rooks, and queens.

use crate::board::chess_types::*;
use crate::board::mailbox::Cell;
use crate::board::position::Position;
use crate::move_generation::directions::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS, ROYAL_DIRECTIONS};

/// Walk each ray until a blocker or the apron; a capture ends the ray.
pub fn generate_sliding_moves(
    position: &Position,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    let directions: &[i16] = match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        _ => &ROYAL_DIRECTIONS,
    };
    let us = position.side_to_move;
    for &step in directions {
        let mut target = from.mailbox() as i16 + step;
        loop {
            match position.cell(target) {
                Cell::Empty => {
                    if let Some(to) = Square::from_mailbox(target) {
                        out.push(Move::new(from, to));
                    }
                    target += step;
                }
                Cell::Piece(piece) => {
                    if piece.color != us {
                        if let Some(to) = Square::from_mailbox(target) {
                            out.push(Move::new(from, to));
                        }
                    }
                    break;
                }
                Cell::Off => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::fen_parser::parse_fen;

    fn sliding_moves_from(fen: &str, square: &str, kind: PieceKind) -> Vec<String> {
        let position = parse_fen(fen).expect("FEN should parse");
        let from = Square::from_algebraic(square).expect("square should parse");
        let mut out = Vec::new();
        generate_sliding_moves(&position, from, kind, &mut out);
        let mut texts: Vec<String> = out.iter().map(|mv| mv.to_string()).collect();
        texts.sort();
        texts
    }

    #[test]
    fn a_rook_on_an_open_board_sees_fourteen_squares() {
        let moves = sliding_moves_from("4k3/8/8/8/3R4/8/8/4K3 w - - 0 1", "d4", PieceKind::Rook);
        assert_eq!(moves.len(), 14);
        assert!(moves.contains(&"d4d8".to_owned()));
        assert!(moves.contains(&"d4a4".to_owned()));
        assert!(moves.contains(&"d4h4".to_owned()));
        assert!(moves.contains(&"d4d1".to_owned()));
    }

    #[test]
    fn rays_stop_at_the_first_blocker() {
        let moves = sliding_moves_from(
            "4k3/3p4/8/8/3R1P2/8/8/4K3 w - - 0 1",
            "d4",
            PieceKind::Rook,
        );
        // North runs to the enemy pawn on d7 inclusive, east stops before f4.
        assert!(moves.contains(&"d4d7".to_owned()));
        assert!(!moves.contains(&"d4d8".to_owned()));
        assert!(moves.contains(&"d4e4".to_owned()));
        assert!(!moves.contains(&"d4f4".to_owned()));
    }

    #[test]
    fn bishops_stay_on_their_diagonals() {
        let moves = sliding_moves_from("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1", "d4", PieceKind::Bishop);
        assert_eq!(moves.len(), 13);
        assert!(moves.contains(&"d4a1".to_owned()));
        assert!(moves.contains(&"d4h8".to_owned()));
        assert!(moves.contains(&"d4a7".to_owned()));
        assert!(!moves.contains(&"d4d5".to_owned()));
    }

    #[test]
    fn a_queen_combines_both_ray_sets() {
        let moves = sliding_moves_from("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1", "d4", PieceKind::Queen);
        assert_eq!(moves.len(), 27);
    }
}
