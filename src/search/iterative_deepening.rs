//! Iterative deepening search with fail-soft negamax bound probing.
//!
//! The driver repeats a zero-window `bound` probe at increasing depth and
//! reads the chosen move back from the killer-move cache. Time is checked
//! only between iterations, so an iteration in progress always completes
//! and the reported move is always the product of a finished depth.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::board::chess_types::Move;
use crate::board::position::Position;
use crate::move_generation::attack_checks::is_king_attacked;
use crate::move_generation::generator::generate_pseudo_legal_moves;
use crate::move_generation::legality::legal_moves;
use crate::search::evaluation::{self, MATE_LOWER, MATE_UPPER};
use crate::search::transposition_table::{
    ScoreBounds, TTStats, TranspositionTable, DEFAULT_TABLE_MB,
};

/// Hard ceiling on iterative-deepening depth.
pub const MAX_SEARCH_DEPTH: u8 = 100;

const NULL_MOVE_MIN_DEPTH: i32 = 3;
const NULL_MOVE_REDUCTION: i32 = 3;
const NULL_MOVE_EVAL_WINDOW: i32 = 500;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SEARCH_DEPTH,
            movetime_ms: Some(1_000),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub tt_stats: TTStats,
}

/// Single-owner search state: the transposition table, the killer-move
/// cache, and the node counter. Both caches are cleared at the start of
/// every root search, so a result depends only on the position and limits.
#[derive(Debug)]
pub struct Searcher {
    table: TranspositionTable,
    killer_moves: HashMap<u64, Move>,
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::new_with_mb(DEFAULT_TABLE_MB)
    }

    pub fn new_with_mb(size_mb: usize) -> Self {
        Self {
            table: TranspositionTable::new_with_mb(size_mb),
            killer_moves: HashMap::new(),
            nodes: 0,
        }
    }

    /// Search `position` by iterative deepening within `config`'s limits.
    ///
    /// The position is mutated while searching and fully restored before
    /// returning. A terminal position yields no move and the terminal
    /// score: the mated side reports `-MATE_LOWER`, stalemate reports zero.
    pub fn search(&mut self, position: &mut Position, config: &SearchConfig) -> SearchResult {
        let started_at = Instant::now();
        self.table.clear();
        self.killer_moves.clear();
        self.nodes = 0;

        if legal_moves(position).is_empty() {
            let best_score = if is_king_attacked(position, position.side_to_move) {
                -MATE_LOWER
            } else {
                0
            };
            return SearchResult {
                best_move: None,
                best_score,
                reached_depth: 0,
                nodes: self.nodes,
                elapsed_ms: started_at.elapsed().as_millis() as u64,
                nps: 0,
                tt_stats: self.table.stats(),
            };
        }

        let deadline = config
            .movetime_ms
            .map(|ms| started_at + Duration::from_millis(ms.max(1)));
        let max_depth = config.max_depth.clamp(1, MAX_SEARCH_DEPTH);

        let mut best_move = None;
        let mut best_score = 0;
        let mut reached_depth = 0;

        for depth in 1..=max_depth {
            best_score = self.bound(position, 0, i32::from(depth), true);
            reached_depth = depth;
            if let Some(cached) = self.killer_moves.get(&position.signature()) {
                best_move = Some(*cached);
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    break;
                }
            }
        }

        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        let nps = if elapsed_ms > 0 {
            self.nodes * 1_000 / elapsed_ms
        } else {
            0
        };
        SearchResult {
            best_move,
            best_score,
            reached_depth,
            nodes: self.nodes,
            elapsed_ms,
            nps,
            tt_stats: self.table.stats(),
        }
    }

    /// Fail-soft probe of `gamma`: the returned score `s` proves the true
    /// score is at least `s` when `s >= gamma`, and at most `s` otherwise.
    fn bound(&mut self, position: &mut Position, gamma: i32, depth: i32, is_root: bool) -> i32 {
        self.nodes += 1;
        let depth = depth.max(0);

        if depth == 0 {
            return position.evaluation();
        }

        let signature = position.signature();
        let entry = self.table.probe(signature, depth as u8);
        if entry.lower >= gamma {
            return entry.lower;
        }
        if entry.upper < gamma {
            return entry.upper;
        }

        // Passing the turn is only sound away from zugzwang territory, so
        // the probe is limited to near-balanced interior nodes.
        if !is_root
            && depth >= NULL_MOVE_MIN_DEPTH
            && position.evaluation().abs() < NULL_MOVE_EVAL_WINDOW
        {
            let undo = position.make_null_move();
            let null_score = -self.bound(position, 1 - gamma, depth - NULL_MOVE_REDUCTION, false);
            position.unmake_null_move(undo);
            if null_score >= gamma {
                self.table.store(
                    signature,
                    depth as u8,
                    ScoreBounds {
                        lower: null_score,
                        upper: entry.upper,
                    },
                );
                return null_score;
            }
        }

        let mover = position.side_to_move;
        let killer = self.killer_moves.get(&signature).copied();
        let mut moves = generate_pseudo_legal_moves(position);
        moves.sort_by_key(|mv| -evaluation::move_delta(position, *mv));

        let mut best = -MATE_UPPER;
        let mut best_move = None;
        let mut found_legal = false;

        let ordered = killer
            .into_iter()
            .chain(moves.into_iter().filter(|mv| Some(*mv) != killer));
        for mv in ordered {
            // Lazy legality: apply the move, reject it if the mover's own
            // king is left attacked, recurse otherwise.
            let outcome = position.with_move(mv, |next| {
                if is_king_attacked(next, mover) {
                    None
                } else {
                    Some(-self.bound(next, 1 - gamma, depth - 1, false))
                }
            });
            let score = match outcome.flatten() {
                Some(score) => score,
                None => continue,
            };
            found_legal = true;
            if score > best || best_move.is_none() {
                best = score;
                best_move = Some(mv);
                if best >= gamma {
                    break;
                }
            }
        }

        // No legal continuation: checkmate or stalemate, judged here so
        // terminal scores flow through the same fail-soft bookkeeping.
        if !found_legal {
            best = if is_king_attacked(position, mover) {
                -MATE_LOWER
            } else {
                0
            };
        }

        if let Some(mv) = best_move {
            self.killer_moves.insert(signature, mv);
        }

        let bounds = if best >= gamma {
            ScoreBounds {
                lower: best,
                upper: entry.upper,
            }
        } else {
            ScoreBounds {
                lower: entry.lower,
                upper: best,
            }
        };
        self.table.store(signature, depth as u8, bounds);

        best
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}
