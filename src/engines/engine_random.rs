//! Uniform random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for harness
//! baselines, integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;

use crate::board::position::Position;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::move_generation::legality::legal_moves;

pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "CouchChess Random"
    }

    fn choose_move(&mut self, position: &Position, params: &GoParams) -> EngineOutput {
        let mut scratch = position.clone();
        let moves = legal_moves(&mut scratch);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines.push(format!(
                "info string random_engine ignoring_go_depth {depth}"
            ));
        }

        let mut rng = rand::rng();
        out.best_move = moves.as_slice().choose(&mut rng).copied();
        out
    }
}
