//! Legal-move-tree node counting for generator validation.
//!
//! Counts are classified at the leaves so the totals can be compared against
//! the published perft tables for standard test positions.

use crate::board::chess_types::*;
use crate::board::position::Position;
use crate::move_generation::attack_checks::is_king_attacked;
use crate::move_generation::legality::legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Walk the legal tree to `depth`, counting and classifying leaf moves.
pub fn perft(position: &mut Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(position) {
        if depth == 1 {
            total.merge(classify_leaf(position, mv));
        } else if let Some(subtree) = position.with_move(mv, |next| perft(next, depth - 1)) {
            total.merge(subtree);
        }
    }
    total
}

fn classify_leaf(position: &mut Position, mv: Move) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    let mover = position.side_to_move;
    let moved_kind = position.piece_at(mv.from).map(|piece| piece.kind);

    let is_en_passant = moved_kind == Some(PieceKind::Pawn)
        && position.en_passant_target == Some(mv.to)
        && mv.from.file() != mv.to.file()
        && position.piece_at(mv.to).is_none();
    if is_en_passant {
        counts.en_passant += 1;
        counts.captures += 1;
    } else if position.piece_at(mv.to).is_some() {
        counts.captures += 1;
    }

    if moved_kind == Some(PieceKind::King) && mv.from.file().abs_diff(mv.to.file()) == 2 {
        counts.castles += 1;
    }
    if mv.promotion.is_some() {
        counts.promotions += 1;
    }

    let gives_check = position
        .with_move(mv, |next| is_king_attacked(next, mover.opposite()))
        .unwrap_or(false);
    if gives_check {
        counts.checks += 1;
    }

    counts
}
