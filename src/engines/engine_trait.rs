//! Engine abstraction layer shared by the trainer shell and the match
//! harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::board::chess_types::Move;
use crate::board::position::Position;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;
    fn new_game(&mut self) {}

    /// Pick a move for the side to play in `position`. `best_move` is
    /// `None` exactly when the position has no legal move.
    fn choose_move(&mut self, position: &Position, params: &GoParams) -> EngineOutput;
}
