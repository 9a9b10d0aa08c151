//! Material and piece-square evaluation with exact per-move deltas.
//!
//! Every piece kind has a material value and a 64-entry positional table
//! written from white's point of view with rank 8 first. At first use the
//! two are folded into one padded 120-entry table per kind so lookups are
//! plain mailbox reads; black reads the same tables through the 180-degree
//! index reflection. The full-board total is computed once per position
//! load, after which [`move_delta`] keeps it current move by move.

use std::sync::OnceLock;

use crate::board::chess_types::{Color, Move, Piece, PieceKind};
use crate::board::mailbox;
use crate::board::position::Position;

/// Material value per piece kind, pawn through king.
pub const PIECE_VALUES: [i32; 6] = [100, 280, 320, 479, 929, 60000];

/// Smallest score magnitude still recognized as a forced mate: the king
/// value minus ten queens.
pub const MATE_LOWER: i32 = PIECE_VALUES[5] - 10 * PIECE_VALUES[4];

/// Largest score magnitude the search can produce: the king value plus ten
/// queens.
pub const MATE_UPPER: i32 = PIECE_VALUES[5] + 10 * PIECE_VALUES[4];

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     78,  83,  86,  73, 102,  82,  85,  90,
      7,  29,  21,  44,  40,  31,  44,   7,
    -17,  16,  -2,  15,  14,   0,  15, -13,
    -26,   3,  10,   9,   6,   1,   0, -23,
    -22,   9,   5, -11, -10,  -2,   3, -19,
    -31,   8,  -7, -37, -36, -14,   3, -31,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -66, -53, -75, -75, -10, -55, -58, -70,
     -3,  -6, 100, -36,   4,  62,  -4, -14,
     10,  67,   1,  74,  73,  27,  62,  -2,
     24,  24,  45,  37,  33,  41,  25,  17,
     -1,   5,  31,  21,  22,  35,   2,   0,
    -18,  10,  13,  22,  18,  15,  11, -14,
    -23, -15,   2,   0,   2,   0, -23, -20,
    -74, -23, -26, -24, -19, -35, -22, -69,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -59, -78, -82, -76, -23, -107, -37, -50,
    -11,  20,  35, -42, -39,   31,   2, -22,
     -9,  39, -32,  41,  52,  -10,  28, -14,
     25,  17,  20,  34,  26,   25,  15,  10,
     13,  10,  17,  23,  17,   16,   0,   7,
     14,  25,  24,  15,   8,   25,  20,  15,
     19,  20,  11,   6,   7,    6,  20,  16,
     -7,   2, -15, -12, -14,  -15, -10, -10,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     35,  29,  33,   4,  37,  33,  56,  50,
     55,  29,  56,  67,  55,  62,  34,  60,
     19,  35,  28,  33,  45,  27,  25,  15,
      0,   5,  16,  13,  18,  -4,  -9,  -6,
    -28, -35, -16, -21, -13, -29, -46, -30,
    -42, -28, -42, -25, -25, -35, -26, -46,
    -53, -38, -31, -26, -29, -43, -44, -53,
    -30, -24, -18,   5,  -2, -18, -31, -32,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
      6,   1,  -8, -104,  69,  24,  88,  26,
     14,  32,  60,  -10,  20,  76,  57,  24,
     -2,  43,  32,   60,  72,  63,  43,   2,
      1, -16,  22,   17,  25,  20, -13,  -6,
    -14, -15,  -2,   -5,  -1, -10, -20, -22,
    -30,  -6, -13,  -11, -16, -11, -16, -27,
    -36, -18,   0,  -19, -15, -15, -21, -38,
    -39, -30, -31,  -13, -31, -36, -34, -42,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
      4,  54,  47, -99, -99,  60,  83, -62,
    -32,  10,  55,  56,  56,  55,  10,   3,
    -62,  12, -57,  44, -67,  28,  37, -31,
    -55,  50,  11,  -4, -19,  13,   0, -49,
    -55, -43, -52, -28, -51, -47,  -8, -50,
    -47, -42, -43, -79, -64, -32, -29, -32,
     -4,   3, -14, -50, -57, -18,  13,   4,
     17,  30,  -3, -14,   6,  -1,  40,  18,
];

/// Material plus positional value per padded mailbox cell, one table per
/// piece kind, indexed for a white piece.
fn padded_tables() -> &'static [[i32; 120]; 6] {
    static TABLES: OnceLock<[[i32; 120]; 6]> = OnceLock::new();
    TABLES.get_or_init(|| {
        let sources = [
            &PAWN_TABLE,
            &KNIGHT_TABLE,
            &BISHOP_TABLE,
            &ROOK_TABLE,
            &QUEEN_TABLE,
            &KING_TABLE,
        ];
        let mut tables = [[0i32; 120]; 6];
        for (kind, source) in sources.iter().enumerate() {
            for row in 0..8 {
                for col in 0..8 {
                    tables[kind][21 + row * 10 + col] = source[row * 8 + col] + PIECE_VALUES[kind];
                }
            }
        }
        tables
    })
}

/// Value of `piece` standing on the cell at `index`, always positive.
///
/// Black pieces read the table through the point reflection, matching the
/// white-view table layout.
#[inline]
fn table_value(piece: Piece, index: usize) -> i32 {
    let table = &padded_tables()[piece.kind.index()];
    match piece.color {
        Color::White => table[index],
        Color::Black => table[mailbox::mirror(index)],
    }
}

/// Full-board white-relative score; used once per position load.
pub fn board_score(position: &Position) -> i32 {
    let mut total = 0;
    for (square, piece) in position.pieces_of(Color::White) {
        total += table_value(piece, square.mailbox());
    }
    for (square, piece) in position.pieces_of(Color::Black) {
        total -= table_value(piece, square.mailbox());
    }
    total
}

/// Exact evaluation change of `mv` from the mover's point of view, computed
/// against the pre-move board. Returns zero when the origin is empty.
///
/// Covers the capture value (including en passant), the promotion upgrade,
/// and the rook relocation of a castling move, so applying the delta keeps
/// the running total equal to a fresh [`board_score`].
pub fn move_delta(position: &Position, mv: Move) -> i32 {
    let mover = match position.piece_at(mv.from) {
        Some(piece) => piece,
        None => return 0,
    };
    let us = mover.color;
    let from = mv.from.mailbox();
    let to = mv.to.mailbox();

    let mut delta = table_value(mover, to) - table_value(mover, from);

    if let Some(victim) = position.piece_at(mv.to) {
        delta += table_value(victim, to);
    }

    if mover.kind == PieceKind::Pawn {
        if let Some(kind) = mv.promotion {
            delta += table_value(Piece::new(us, kind), to) - table_value(mover, to);
        }
        if position.en_passant_target == Some(mv.to)
            && mv.from.file() != mv.to.file()
            && position.piece_at(mv.to).is_none()
        {
            let back = match us {
                Color::White => mailbox::SOUTH,
                Color::Black => mailbox::NORTH,
            };
            let behind = (to as i16 + back) as usize;
            delta += table_value(Piece::new(us.opposite(), PieceKind::Pawn), behind);
        }
    }

    if mover.kind == PieceKind::King {
        let shift = to as i16 - from as i16;
        let rook = Piece::new(us, PieceKind::Rook);
        if shift == 2 * mailbox::EAST {
            let corner = (to as i16 + mailbox::EAST) as usize;
            let landing = (to as i16 + mailbox::WEST) as usize;
            delta += table_value(rook, landing) - table_value(rook, corner);
        } else if shift == 2 * mailbox::WEST {
            let corner = (to as i16 + 2 * mailbox::WEST) as usize;
            let landing = (to as i16 + mailbox::EAST) as usize;
            delta += table_value(rook, landing) - table_value(rook, corner);
        }
    }

    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::fen_parser::parse_fen;
    use crate::utils::long_algebraic::parse_coordinate_move;

    #[test]
    fn mate_band_constants_bracket_the_king_value() {
        assert_eq!(MATE_LOWER, 50_710);
        assert_eq!(MATE_UPPER, 69_290);
        assert!(MATE_LOWER < PIECE_VALUES[5]);
        assert!(MATE_UPPER > PIECE_VALUES[5]);
    }

    #[test]
    fn the_starting_position_is_balanced() {
        let position = Position::new_game();
        assert_eq!(board_score(&position), 0);
        assert_eq!(position.evaluation(), 0);
    }

    #[test]
    fn point_reflected_positions_negate_the_score() {
        // The second FEN is the first with every piece recolored and moved
        // through the 180-degree reflection, the same mapping the black
        // table lookup uses.
        let white_up = parse_fen("4k3/8/8/8/8/8/8/QQ2K3 w - - 0 1").expect("FEN should parse");
        let black_up = parse_fen("3k2qq/8/8/8/8/8/8/3K4 b - - 0 1").expect("FEN should parse");
        assert_eq!(board_score(&white_up), -board_score(&black_up));
        // Both sides see their own advantage as positive.
        assert_eq!(white_up.evaluation(), black_up.evaluation());
        assert!(white_up.evaluation() > 0);
    }

    #[test]
    fn advancing_the_king_pawn_gains_ground() {
        let position = Position::new_game();
        let push = parse_coordinate_move("e2e4").expect("move text should parse");
        assert_eq!(move_delta(&position, push), 42);
    }

    #[test]
    fn delta_matches_a_fresh_board_score_after_any_make() {
        let samples = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "g1f3"),
            ("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3", "d4e3"),
            ("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1", "e1c1"),
            ("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8n"),
            ("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2", "e4d5"),
        ];
        for (fen, text) in samples {
            let mut position = parse_fen(fen).expect("FEN should parse");
            let mv = parse_coordinate_move(text).expect("move text should parse");
            let before = board_score(&position);
            let delta = move_delta(&position, mv);
            let signed = match position.side_to_move {
                Color::White => delta,
                Color::Black => -delta,
            };
            position.make_move(mv).expect("move should apply");
            assert_eq!(board_score(&position), before + signed, "delta drifted for {text}");
        }
    }

    #[test]
    fn move_delta_from_an_empty_origin_is_zero() {
        let position = Position::new_game();
        let ghost = parse_coordinate_move("e4e5").expect("move text should parse");
        assert_eq!(move_delta(&position, ghost), 0);
    }
}
