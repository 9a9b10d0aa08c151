//! Blindfold-training facade over the engine core.
//!
//! A host application drives one [`TrainerEngine`] per coaching session:
//! it loads positions as FEN, asks for an engine reply within a wall-clock
//! budget, and validates human moves against the legal list before playing
//! them. All richer UI state (spoken prompts, clocks, scoresheets) stays on
//! the host side.

use std::time::Duration;

use crate::board::chess_types::Move;
use crate::board::position::Position;
use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{ChessError, ChessResult};
use crate::fen::fen_generator::generate_fen;
use crate::fen::fen_parser::{parse_fen, FenError};
use crate::move_generation::legality::{self, GameStatus};
use crate::search::iterative_deepening::MAX_SEARCH_DEPTH;
use crate::utils::long_algebraic::parse_coordinate_move;
use crate::utils::render_board::render_position;

pub struct TrainerEngine {
    position: Position,
    engine: IterativeEngine,
}

impl TrainerEngine {
    pub fn new() -> Self {
        Self {
            position: Position::new_game(),
            engine: IterativeEngine::new(MAX_SEARCH_DEPTH),
        }
    }

    /// Replace the current position. A malformed FEN leaves the previous
    /// position in place.
    pub fn set_position_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.position = parse_fen(fen)?;
        Ok(())
    }

    pub fn current_fen(&self) -> String {
        generate_fen(&self.position)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// All legal moves for the side to play. Empty exactly when the game
    /// is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut probe = self.position.clone();
        legality::legal_moves(&mut probe)
    }

    pub fn status(&self) -> GameStatus {
        let mut probe = self.position.clone();
        legality::game_status(&mut probe)
    }

    /// Search the current position within `budget` and report the chosen
    /// move as coordinate text. `None` means the position is terminal.
    pub fn search_best_move(&mut self, budget: Duration) -> Option<String> {
        let params = GoParams {
            depth: None,
            movetime_ms: Some(budget_millis(budget)),
        };
        self.engine
            .choose_move(&self.position, &params)
            .best_move
            .map(|mv| mv.to_string())
    }

    /// Apply `mv` to the trainer's position after checking legality.
    pub fn play_move(&mut self, mv: Move) -> ChessResult<()> {
        if !self.legal_moves().contains(&mv) {
            return Err(ChessError::IllegalMove(mv.to_string()));
        }
        self.position
            .make_move(mv)
            .ok_or_else(|| ChessError::IllegalMove(mv.to_string()))?;
        Ok(())
    }

    /// Parse coordinate text and apply it, returning the played move.
    pub fn play_coordinate_move(&mut self, text: &str) -> ChessResult<Move> {
        let mv = parse_coordinate_move(text)?;
        self.play_move(mv)?;
        Ok(mv)
    }

    pub fn render(&self) -> String {
        render_position(&self.position)
    }
}

impl Default for TrainerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole milliseconds of `budget`, saturating at `u64::MAX` for durations
/// too large to carry in the search config.
fn budget_millis(budget: Duration) -> u64 {
    u64::try_from(budget.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn a_rejected_fen_keeps_the_previous_position() {
        let mut trainer = TrainerEngine::new();
        assert!(trainer.set_position_from_fen("not a fen").is_err());
        assert_eq!(trainer.current_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn search_returns_none_for_a_checkmated_position() {
        let mut trainer = TrainerEngine::new();
        trainer
            .set_position_from_fen("1k2Q3/8/1K6/8/8/8/8/8 b - - 13 7")
            .expect("FEN should parse");
        assert!(trainer.legal_moves().is_empty());
        assert_eq!(trainer.status(), GameStatus::Checkmate);
        assert_eq!(trainer.search_best_move(Duration::from_millis(100)), None);
    }

    #[test]
    fn search_returns_the_forced_move() {
        let mut trainer = TrainerEngine::new();
        trainer
            .set_position_from_fen("8/8/8/8/8/2K5/1Q6/1k6 b - - 14 9")
            .expect("FEN should parse");
        let best = trainer
            .search_best_move(Duration::from_millis(200))
            .expect("a legal move exists");
        assert_eq!(best, "b1b2");
    }

    #[test]
    fn search_respects_king_safety() {
        let mut trainer = TrainerEngine::new();
        trainer
            .set_position_from_fen("8/8/8/6N1/1B6/8/1K2k3/8 b - - 3 2")
            .expect("FEN should parse");
        let legal_texts: Vec<String> = trainer
            .legal_moves()
            .iter()
            .map(Move::to_string)
            .collect();
        let best = trainer
            .search_best_move(Duration::from_millis(100))
            .expect("a legal move exists");
        assert!(legal_texts.contains(&best));
    }

    #[test]
    fn stalemate_is_classified_apart_from_checkmate() {
        let mut trainer = TrainerEngine::new();
        trainer
            .set_position_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("FEN should parse");
        assert!(trainer.legal_moves().is_empty());
        assert_eq!(trainer.status(), GameStatus::Stalemate);
        assert_eq!(trainer.search_best_move(Duration::from_millis(50)), None);
    }

    #[test]
    fn played_moves_advance_the_fen() {
        let mut trainer = TrainerEngine::new();
        let mv = trainer
            .play_coordinate_move("e2e4")
            .expect("e2e4 is legal");
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(
            trainer.current_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert!(trainer.play_coordinate_move("e2e4").is_err());
    }

    #[test]
    fn search_terminates_close_to_the_budget() {
        let mut trainer = TrainerEngine::new();
        let started = std::time::Instant::now();
        let best = trainer.search_best_move(Duration::from_millis(300));
        assert!(best.is_some());
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[test]
    fn oversized_budgets_saturate_instead_of_wrapping() {
        assert_eq!(budget_millis(Duration::from_millis(300)), 300);
        assert_eq!(budget_millis(Duration::from_secs(3)), 3_000);
        assert_eq!(budget_millis(Duration::MAX), u64::MAX);
    }
}
