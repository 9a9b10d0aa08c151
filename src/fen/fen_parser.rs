//! FEN-to-Position parser.
//!
//! Builds fully-populated incremental state from a Forsyth-Edwards Notation
//! string, including piece placement, rights, clocks, and the cached
//! evaluation and signature totals. All six fields are required; a
//! malformed string reports a distinct error instead of falling back to the
//! starting position.

use thiserror::Error;

use crate::board::chess_types::*;
use crate::board::position::Position;

/// Failure kinds for FEN parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing field {0:?}")]
    TrailingField(String),

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not sum to 8 files")]
    FileCount { rank: u8 },

    #[error("invalid empty-square count {0:?}")]
    EmptyRun(char),

    #[error("invalid piece character {0:?} in board layout")]
    UnknownPiece(char),

    #[error("invalid side-to-move field: {0}")]
    SideToMove(String),

    #[error("invalid castling rights character: {0}")]
    CastlingRights(char),

    #[error("invalid en-passant field: {0}")]
    EnPassant(String),

    #[error("invalid {name}: {value}")]
    Counter { name: &'static str, value: String },
}

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts
        .next()
        .ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts
        .next()
        .ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts
        .next()
        .ok_or(FenError::MissingField("fullmove number"))?;

    if let Some(extra) = parts.next() {
        return Err(FenError::TrailingField(extra.to_owned()));
    }

    let mut position = Position::empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_target = parse_en_passant_square(en_passant_part)?;
    position.halfmove_clock = parse_counter(halfmove_part, "halfmove clock")?;
    position.fullmove_number = parse_counter(fullmove_part, "fullmove number")?;

    position.refresh_caches();

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::EmptyRun(ch));
                }
                file = file.saturating_add(empty_count as u8);
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(FenError::UnknownPiece(ch))?;
            let square =
                Square::new(file, rank).ok_or(FenError::FileCount { rank: rank + 1 })?;
            position.set_piece(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::FileCount { rank: rank + 1 });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(FenError::CastlingRights(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Square::from_algebraic(en_passant_part)
        .map(Some)
        .map_err(|_| FenError::EnPassant(en_passant_part.to_owned()))
}

fn parse_counter(part: &str, name: &'static str) -> Result<u16, FenError> {
    part.parse::<u16>().map_err(|_| FenError::Counter {
        name,
        value: part.to_owned(),
    })
}
