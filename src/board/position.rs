//! Mutable position state with incremental make/unmake.
//!
//! `Position` is the single board representation shared by move generation,
//! legality checks, evaluation, and search. Moves are applied in place and
//! reverted from an [`UndoRecord`]; the running evaluation total and the
//! transposition signature are maintained incrementally by the same code
//! paths that mutate the board.

use crate::board::chess_rules::STARTING_POSITION_FEN;
use crate::board::chess_types::{
    CastlingRights, Color, Move, Piece, PieceKind, Square, CASTLE_BLACK_KINGSIDE,
    CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::board::mailbox::{self, Cell};
use crate::board::undo_state::{NullUndo, UndoRecord};
use crate::fen::fen_parser;
use crate::search::evaluation;
use crate::search::zobrist;

/// Complete state of the game at one ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Cell; mailbox::BOARD_CELLS],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    /// White-relative material plus piece-square total.
    score: i32,
    /// Full-state transposition signature.
    signature: u64,
}

impl Position {
    /// Board with no pieces and setup-default fields.
    pub fn empty() -> Self {
        let mut board = [Cell::Off; mailbox::BOARD_CELLS];
        for (index, cell) in board.iter_mut().enumerate() {
            if mailbox::is_on_board(index as i16) {
                *cell = Cell::Empty;
            }
        }
        let mut position = Self {
            board,
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            score: 0,
            signature: 0,
        };
        position.refresh_caches();
        position
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        fen_parser::parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    /// Cell at a raw mailbox index; anything outside the array reads as the
    /// apron sentinel.
    #[inline]
    pub fn cell(&self, index: i16) -> Cell {
        if !(0..mailbox::BOARD_CELLS as i16).contains(&index) {
            return Cell::Off;
        }
        self.board[index as usize]
    }

    /// Piece occupying `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.mailbox()].piece()
    }

    /// Place `piece` on `square` during position setup.
    ///
    /// Callers finish setup with [`refresh_caches`](Self::refresh_caches).
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        self.board[square.mailbox()] = Cell::Piece(piece);
    }

    /// Occupied squares of `color` in mailbox order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (mailbox::A8..=mailbox::H1).filter_map(move |index| {
            let piece = self.board[index].piece()?;
            if piece.color != color {
                return None;
            }
            Square::from_mailbox(index as i16).map(|square| (square, piece))
        })
    }

    /// Static evaluation from the side to move's perspective.
    #[inline]
    pub fn evaluation(&self) -> i32 {
        match self.side_to_move {
            Color::White => self.score,
            Color::Black => -self.score,
        }
    }

    /// White-relative evaluation total.
    #[inline]
    pub fn score_for_white(&self) -> i32 {
        self.score
    }

    /// Full-state transposition signature.
    #[inline]
    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// Recompute the evaluation total and signature from scratch.
    ///
    /// Used after setup; make/unmake keep both current incrementally.
    pub fn refresh_caches(&mut self) {
        self.score = evaluation::board_score(self);
        self.signature = zobrist::compute_signature(self);
    }

    /// Apply `mv`, returning the record needed to revert it.
    ///
    /// Returns `None` and leaves the position untouched when the origin
    /// square does not hold a piece of the side to move. Anything beyond
    /// that, such as king safety, is the legality filter's judgment.
    pub fn make_move(&mut self, mv: Move) -> Option<UndoRecord> {
        let us = self.side_to_move;
        let moved = match self.piece_at(mv.from) {
            Some(piece) if piece.color == us => piece,
            _ => return None,
        };

        let mover_delta = evaluation::move_delta(self, mv);
        let mut undo = UndoRecord {
            mv,
            moved,
            captured: None,
            castled_rook: None,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_target: self.en_passant_target,
            prev_halfmove_clock: self.halfmove_clock,
            prev_signature: self.signature,
            score_delta: 0,
        };

        // Resolve the captured piece, which stands behind the destination
        // when the capture is en passant.
        if let Some(victim) = self.piece_at(mv.to) {
            undo.captured = Some((mv.to, victim));
        } else if moved.kind == PieceKind::Pawn
            && self.en_passant_target == Some(mv.to)
            && mv.from.file() != mv.to.file()
        {
            let back = match us {
                Color::White => mailbox::SOUTH,
                Color::Black => mailbox::NORTH,
            };
            if let Some(behind) = Square::from_mailbox(mv.to.mailbox() as i16 + back) {
                if let Some(victim) = self.piece_at(behind) {
                    undo.captured = Some((behind, victim));
                }
            }
        }

        if let Some((square, _)) = undo.captured {
            self.board[square.mailbox()] = Cell::Empty;
        }

        let placed = match mv.promotion {
            Some(kind) => Piece::new(us, kind),
            None => moved,
        };
        self.board[mv.from.mailbox()] = Cell::Empty;
        self.board[mv.to.mailbox()] = Cell::Piece(placed);

        // A two-file king shift is castling; the rook jumps over the king.
        if moved.kind == PieceKind::King {
            let shift = mv.to.mailbox() as i16 - mv.from.mailbox() as i16;
            if shift == 2 * mailbox::EAST {
                undo.castled_rook = self.relocate_rook(us, mv.to, mailbox::EAST, mailbox::WEST);
            } else if shift == 2 * mailbox::WEST {
                undo.castled_rook = self.relocate_rook(us, mv.to, 2 * mailbox::WEST, mailbox::EAST);
            }
        }

        self.castling_rights &= !rights_cleared_at(mv.from);
        if let Some((square, _)) = undo.captured {
            self.castling_rights &= !rights_cleared_at(square);
        }
        if moved.kind == PieceKind::King {
            self.castling_rights &= match us {
                Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
                Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
            };
        }

        self.en_passant_target = None;
        if moved.kind == PieceKind::Pawn {
            let shift = mv.to.mailbox() as i16 - mv.from.mailbox() as i16;
            if shift == 2 * mailbox::NORTH || shift == 2 * mailbox::SOUTH {
                self.en_passant_target =
                    Square::from_mailbox(mv.from.mailbox() as i16 + shift / 2);
            }
        }

        if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = us.opposite();

        undo.score_delta = match us {
            Color::White => mover_delta,
            Color::Black => -mover_delta,
        };
        self.score += undo.score_delta;

        let mut signature = undo.prev_signature;
        signature ^= zobrist::piece_key(moved, mv.from);
        if let Some((square, victim)) = undo.captured {
            signature ^= zobrist::piece_key(victim, square);
        }
        signature ^= zobrist::piece_key(placed, mv.to);
        if let Some((corner, landing)) = undo.castled_rook {
            let rook = Piece::new(us, PieceKind::Rook);
            signature ^= zobrist::piece_key(rook, corner);
            signature ^= zobrist::piece_key(rook, landing);
        }
        signature ^= zobrist::castling_key(undo.prev_castling_rights);
        signature ^= zobrist::castling_key(self.castling_rights);
        signature ^= zobrist::en_passant_key(undo.prev_en_passant_target);
        signature ^= zobrist::en_passant_key(self.en_passant_target);
        signature ^= zobrist::side_key();
        self.signature = signature;

        Some(undo)
    }

    /// Revert the most recent [`make_move`](Self::make_move) from its record.
    pub fn unmake_move(&mut self, undo: UndoRecord) {
        let mover = undo.moved.color;

        self.side_to_move = mover;
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.en_passant_target = undo.prev_en_passant_target;
        self.castling_rights = undo.prev_castling_rights;
        self.signature = undo.prev_signature;
        self.score -= undo.score_delta;

        self.board[undo.mv.to.mailbox()] = Cell::Empty;
        self.board[undo.mv.from.mailbox()] = Cell::Piece(undo.moved);
        if let Some((corner, landing)) = undo.castled_rook {
            self.board[landing.mailbox()] = Cell::Empty;
            self.board[corner.mailbox()] = Cell::Piece(Piece::new(mover, PieceKind::Rook));
        }
        if let Some((square, victim)) = undo.captured {
            self.board[square.mailbox()] = Cell::Piece(victim);
        }
    }

    /// Apply `mv`, run `action`, then revert. The unmake runs on every path
    /// out of `action`, so callers cannot leak a mutated position.
    pub fn with_move<T>(
        &mut self,
        mv: Move,
        action: impl FnOnce(&mut Position) -> T,
    ) -> Option<T> {
        let undo = self.make_move(mv)?;
        let outcome = action(self);
        self.unmake_move(undo);
        Some(outcome)
    }

    /// Pass the turn without moving a piece; used by null-move pruning.
    pub fn make_null_move(&mut self) -> NullUndo {
        let undo = NullUndo {
            prev_en_passant_target: self.en_passant_target,
            prev_signature: self.signature,
        };
        let mut signature = self.signature;
        signature ^= zobrist::en_passant_key(self.en_passant_target);
        signature ^= zobrist::side_key();
        self.en_passant_target = None;
        self.side_to_move = self.side_to_move.opposite();
        self.signature = signature;
        undo
    }

    /// Revert the most recent [`make_null_move`](Self::make_null_move).
    pub fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side_to_move = self.side_to_move.opposite();
        self.en_passant_target = undo.prev_en_passant_target;
        self.signature = undo.prev_signature;
    }

    fn relocate_rook(
        &mut self,
        color: Color,
        king_to: Square,
        corner_step: i16,
        landing_step: i16,
    ) -> Option<(Square, Square)> {
        let corner = Square::from_mailbox(king_to.mailbox() as i16 + corner_step)?;
        let landing = Square::from_mailbox(king_to.mailbox() as i16 + landing_step)?;
        self.board[corner.mailbox()] = Cell::Empty;
        self.board[landing.mailbox()] = Cell::Piece(Piece::new(color, PieceKind::Rook));
        Some((corner, landing))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

/// Rights lost when a move touches `square`, by origin or capture.
fn rights_cleared_at(square: Square) -> CastlingRights {
    match square.mailbox() {
        mailbox::A1 => CASTLE_WHITE_QUEENSIDE,
        mailbox::H1 => CASTLE_WHITE_KINGSIDE,
        mailbox::A8 => CASTLE_BLACK_QUEENSIDE,
        mailbox::H8 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::fen_generator::generate_fen;
    use crate::fen::fen_parser::parse_fen;
    use crate::move_generation::legality;
    use crate::utils::long_algebraic::parse_coordinate_move;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn apply(position: &mut Position, text: &str) -> UndoRecord {
        let mv = parse_coordinate_move(text).expect("move text should parse");
        position.make_move(mv).expect("move should apply")
    }

    fn assert_caches_consistent(position: &mut Position) {
        let score = position.score_for_white();
        let signature = position.signature();
        position.refresh_caches();
        assert_eq!(position.score_for_white(), score, "incremental score drifted");
        assert_eq!(position.signature(), signature, "incremental signature drifted");
    }

    #[test]
    fn make_then_unmake_restores_the_starting_position() {
        let mut position = Position::new_game();
        let before = position.clone();

        let undo = apply(&mut position, "e2e4");
        assert_ne!(position, before);
        position.unmake_move(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn double_pawn_push_sets_the_en_passant_target() {
        let mut position = Position::new_game();
        apply(&mut position, "e2e4");
        let target = position.en_passant_target.expect("e4 should open e3");
        assert_eq!(target.to_string(), "e3");
        assert_eq!(position.side_to_move, Color::Black);
        assert_eq!(position.halfmove_clock, 0);

        apply(&mut position, "g8f6");
        assert_eq!(position.en_passant_target, None);
        assert_eq!(position.halfmove_clock, 1);
        assert_eq!(position.fullmove_number, 2);
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut position = parse_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3")
            .expect("FEN should parse");
        let before = position.clone();

        let undo = apply(&mut position, "d4e3");
        let captured_square = Square::from_algebraic("e4").expect("e4 should parse");
        assert_eq!(position.piece_at(captured_square), None);
        let landing = Square::from_algebraic("e3").expect("e3 should parse");
        assert_eq!(
            position.piece_at(landing),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_caches_consistent(&mut position);

        position.unmake_move(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn kingside_castling_moves_the_rook_too() {
        let mut position =
            parse_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let before = position.clone();

        let undo = apply(&mut position, "e1g1");
        let rook_landing = Square::from_algebraic("f1").expect("f1 should parse");
        let corner = Square::from_algebraic("h1").expect("h1 should parse");
        assert_eq!(
            position.piece_at(rook_landing),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(position.piece_at(corner), None);
        assert_eq!(
            position.castling_rights & (CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            0
        );
        assert_caches_consistent(&mut position);

        position.unmake_move(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn queenside_castling_moves_the_rook_too() {
        let mut position =
            parse_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1").expect("FEN should parse");
        let before = position.clone();

        let undo = apply(&mut position, "e8c8");
        let rook_landing = Square::from_algebraic("d8").expect("d8 should parse");
        assert_eq!(
            position.piece_at(rook_landing),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(
            position.castling_rights & (CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
            0
        );
        assert_caches_consistent(&mut position);

        position.unmake_move(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn promotion_replaces_the_pawn_with_the_chosen_kind() {
        let mut position = parse_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let before = position.clone();

        let undo = apply(&mut position, "a7a8q");
        let landing = Square::from_algebraic("a8").expect("a8 should parse");
        assert_eq!(
            position.piece_at(landing),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_caches_consistent(&mut position);

        position.unmake_move(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn capturing_a_corner_rook_clears_that_right() {
        let mut position =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        apply(&mut position, "a1a8");
        assert_eq!(position.castling_rights & CASTLE_BLACK_QUEENSIDE, 0);
        assert_ne!(position.castling_rights & CASTLE_BLACK_KINGSIDE, 0);
        // Moving the a1 rook away also dropped white's queenside right.
        assert_eq!(position.castling_rights & CASTLE_WHITE_QUEENSIDE, 0);
    }

    #[test]
    fn make_move_rejects_an_empty_or_enemy_origin() {
        let mut position = Position::new_game();
        let before = position.clone();

        let empty_origin = parse_coordinate_move("e4e5").expect("move text should parse");
        assert!(position.make_move(empty_origin).is_none());
        let enemy_origin = parse_coordinate_move("e7e5").expect("move text should parse");
        assert!(position.make_move(enemy_origin).is_none());
        assert_eq!(position, before);
    }

    #[test]
    fn null_move_round_trips_and_flips_the_signature() {
        let mut position = parse_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3")
            .expect("FEN should parse");
        let before = position.clone();

        let undo = position.make_null_move();
        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.en_passant_target, None);
        assert_ne!(position.signature(), before.signature());
        assert_caches_consistent(&mut position);

        position.unmake_null_move(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn random_walk_keeps_caches_incremental_and_unwinds_cleanly() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut position = Position::new_game();
        let start = position.clone();
        let mut trail = Vec::new();

        for _ in 0..60 {
            let moves = legality::legal_moves(&mut position);
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            let undo = position.make_move(mv).expect("legal move should apply");
            trail.push(undo);
            assert_caches_consistent(&mut position);
        }

        while let Some(undo) = trail.pop() {
            position.unmake_move(undo);
        }
        assert_eq!(position, start);
    }

    #[test]
    fn round_trip_through_fen_preserves_every_field() {
        let mut position = Position::new_game();
        apply(&mut position, "e2e4");
        apply(&mut position, "c7c5");
        apply(&mut position, "g1f3");

        let fen = generate_fen(&position);
        let reparsed = parse_fen(&fen).expect("generated FEN should parse");
        assert_eq!(reparsed, position);
    }
}
