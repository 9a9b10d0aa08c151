//! Crate-level error types.

use thiserror::Error;

use crate::fen::fen_parser::FenError;

/// Errors surfaced by parsing and facade-level operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid position string: {0}")]
    Fen(#[from] FenError),

    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),

    #[error("invalid coordinate move {text:?}: {reason}")]
    InvalidMove { text: String, reason: String },

    #[error("move {0} is not legal in this position")]
    IllegalMove(String),
}

/// Shorthand result alias for crate operations.
pub type ChessResult<T> = Result<T, ChessError>;
