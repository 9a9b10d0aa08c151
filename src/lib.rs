//! Crate root module declarations for the Couch Chess engine core.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, engines, FEN handling, and utility helpers) so binaries, tests,
//! and external tooling can import stable module paths.

pub mod board {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod mailbox;
    pub mod position;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod attack_checks;
    pub mod directions;
    pub mod generator;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod legality;
    pub mod pawn_moves;
    pub mod perft;
    pub mod sliding_moves;
}

pub mod search {
    pub mod evaluation;
    pub mod iterative_deepening;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod fen {
    pub mod fen_generator;
    pub mod fen_parser;
}

pub mod utils {
    pub mod long_algebraic;
    pub mod match_harness;
    pub mod render_board;
}

pub mod errors;
pub mod trainer;
