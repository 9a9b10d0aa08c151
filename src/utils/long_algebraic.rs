//! Coordinate-move text handling ("e2e4", "a7a8q").
//!
//! [`Move`] already renders itself in this notation via `Display`; this
//! module covers the reverse direction and the legality-checked variant
//! used by the trainer shell.

use crate::board::chess_types::{Move, PieceKind, Square};
use crate::board::position::Position;
use crate::errors::{ChessError, ChessResult};
use crate::move_generation::legality::legal_moves;

/// Parse coordinate notation into a [`Move`] without consulting a board.
pub fn parse_coordinate_move(text: &str) -> ChessResult<Move> {
    if !text.is_ascii() || !(text.len() == 4 || text.len() == 5) {
        return Err(ChessError::InvalidMove {
            text: text.to_owned(),
            reason: "expected four or five characters like e2e4 or a7a8q".to_owned(),
        });
    }

    let from = Square::from_algebraic(&text[0..2])?;
    let to = Square::from_algebraic(&text[2..4])?;

    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(letter) => Some(promotion_kind(*letter as char).ok_or_else(|| {
            ChessError::InvalidMove {
                text: text.to_owned(),
                reason: format!("unknown promotion piece '{}'", *letter as char),
            }
        })?),
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

/// Parse coordinate notation and require the move to be legal in
/// `position`. A pawn reaching the back rank must carry its promotion
/// letter, otherwise no legal move matches.
pub fn parse_legal_move(position: &mut Position, text: &str) -> ChessResult<Move> {
    let parsed = parse_coordinate_move(text)?;
    if legal_moves(position).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ChessError::IllegalMove(text.to_owned()))
    }
}

fn promotion_kind(letter: char) -> Option<PieceKind> {
    match letter.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
