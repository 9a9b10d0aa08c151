//! Legal-move filtering and terminal classification.
//!
//! Legality is judged lazily: a pseudo-legal move is applied, the mover's
//! king safety is checked on the resulting board, and the move is reverted.
//! The same probe distinguishes checkmate from stalemate once the legal
//! list comes back empty.

use crate::board::chess_types::Move;
use crate::board::position::Position;
use crate::move_generation::attack_checks::is_king_attacked;
use crate::move_generation::generator::generate_pseudo_legal_moves;

/// Standing of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Stalemate,
}

/// Moves that do not leave the mover's own king attacked.
pub fn legal_moves(position: &mut Position) -> Vec<Move> {
    let mover = position.side_to_move;
    let pseudo = generate_pseudo_legal_moves(position);
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        let keeps_king_safe = position
            .with_move(mv, |next| !is_king_attacked(next, mover))
            .unwrap_or(false);
        if keeps_king_safe {
            legal.push(mv);
        }
    }
    legal
}

/// Classify the side to move's standing.
pub fn game_status(position: &mut Position) -> GameStatus {
    if !legal_moves(position).is_empty() {
        GameStatus::InProgress
    } else if is_king_attacked(position, position.side_to_move) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::fen_parser::parse_fen;

    fn legal_move_texts(fen: &str) -> Vec<String> {
        let mut position = parse_fen(fen).expect("FEN should parse");
        let mut texts: Vec<String> = legal_moves(&mut position)
            .iter()
            .map(|mv| mv.to_string())
            .collect();
        texts.sort();
        texts
    }

    #[test]
    fn the_starting_position_has_twenty_legal_moves() {
        let mut position = Position::new_game();
        assert_eq!(legal_moves(&mut position).len(), 20);
    }

    #[test]
    fn a_pinned_knight_may_not_move() {
        let moves = legal_move_texts("4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|text| !text.starts_with("e2")));
    }

    #[test]
    fn while_in_check_only_resolving_moves_are_legal() {
        // The e-file rook gives check; white may block on e2 or e3, or step
        // the king off the file.
        let moves = legal_move_texts("4k3/8/8/8/4r3/8/3Q4/4K3 w - - 0 1");
        assert_eq!(moves, vec!["d2e2", "d2e3", "e1d1", "e1f1", "e1f2"]);
    }

    #[test]
    fn the_king_avoids_every_attacked_neighbor() {
        let moves = legal_move_texts("8/8/8/6N1/1B6/8/1K2k3/8 b - - 3 2");
        assert_eq!(moves, vec!["e2d1", "e2d3", "e2e3", "e2f1", "e2f2"]);
    }

    #[test]
    fn a_back_rank_mate_is_checkmate() {
        let mut position = parse_fen("1k2Q3/8/1K6/8/8/8/8/8 b - - 13 7").expect("FEN should parse");
        assert!(legal_moves(&mut position).is_empty());
        assert_eq!(game_status(&mut position), GameStatus::Checkmate);
    }

    #[test]
    fn a_smothered_corner_is_stalemate() {
        let mut position = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(legal_moves(&mut position).is_empty());
        assert_eq!(game_status(&mut position), GameStatus::Stalemate);
    }

    #[test]
    fn an_ordinary_position_is_in_progress() {
        let mut position = Position::new_game();
        assert_eq!(game_status(&mut position), GameStatus::InProgress);
    }

    #[test]
    fn castling_through_check_never_reaches_the_legal_list() {
        let moves = legal_move_texts("r3k2r/pppp1ppp/8/8/8/5r2/PPPP2PP/R3K2R w KQkq - 0 1");
        assert!(!moves.contains(&"e1g1".to_owned()));
        assert!(moves.contains(&"e1c1".to_owned()));
    }
}
