//! Engine wrapper around the iterative deepening searcher.
//!
//! Translates [`GoParams`] into search limits: an explicit movetime wins,
//! a bare depth request searches without a clock, and a bare `go` falls
//! back to the searcher's default time budget.

use crate::board::position::Position;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::search::iterative_deepening::{SearchConfig, Searcher, MAX_SEARCH_DEPTH};

pub struct IterativeEngine {
    default_depth: u8,
    searcher: Searcher,
}

impl IterativeEngine {
    pub fn new(default_depth: u8) -> Self {
        Self {
            default_depth,
            searcher: Searcher::new(),
        }
    }

    pub fn new_with_mb(default_depth: u8, table_mb: usize) -> Self {
        Self {
            default_depth,
            searcher: Searcher::new_with_mb(table_mb),
        }
    }

    fn resolve_config(&self, params: &GoParams) -> SearchConfig {
        let max_depth = params
            .depth
            .unwrap_or(self.default_depth)
            .clamp(1, MAX_SEARCH_DEPTH);
        let movetime_ms = if params.movetime_ms.is_some() {
            params.movetime_ms
        } else if params.depth.is_some() {
            None
        } else {
            SearchConfig::default().movetime_ms
        };
        SearchConfig {
            max_depth,
            movetime_ms,
        }
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "CouchChess Iterative"
    }

    fn choose_move(&mut self, position: &Position, params: &GoParams) -> EngineOutput {
        let config = self.resolve_config(params);
        let mut scratch = position.clone();
        let result = self.searcher.search(&mut scratch, &config);

        let mut out = EngineOutput::default();
        out.best_move = result.best_move;
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {} time {} nps {}",
            result.reached_depth, result.best_score, result.nodes, result.elapsed_ms, result.nps
        ));
        out.info_lines.push(format!(
            "info string iterative_engine default_depth {}",
            self.default_depth
        ));
        out
    }
}
