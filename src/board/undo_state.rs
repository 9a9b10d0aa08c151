use crate::board::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, Copy)]
pub struct UndoRecord {
    pub mv: Move,
    pub moved: Piece,
    /// Captured piece and the square it stood on, which differs from the
    /// destination for en passant.
    pub captured: Option<(Square, Piece)>,
    /// Corner and landing square of the rook when the move castled.
    pub castled_rook: Option<(Square, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_signature: u64,

    /// White-relative evaluation change applied by the move.
    pub score_delta: i32,
}

/// Undo record for a null move, which only passes the turn.
#[derive(Debug, Clone, Copy)]
pub struct NullUndo {
    pub prev_en_passant_target: Option<Square>,
    pub prev_signature: u64,
}
