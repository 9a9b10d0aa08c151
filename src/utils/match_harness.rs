//! Head-to-head engine match harness.
//!
//! Runs two [`Engine`] implementations against each other without any I/O
//! protocol, with a seeded random opening prefix so repeated series do not
//! replay one deterministic game.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use crate::board::chess_types::Color;
use crate::board::position::Position;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::fen::fen_generator::generate_fen;
use crate::move_generation::legality::{game_status, legal_moves, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 2,
            opening_max_plies: 8,
            go_params: GoParams {
                depth: Some(3),
                movetime_ms: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_fen: String,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 8,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<MatchOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the starting position.
pub fn play_match(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, String> {
    engine_white.new_game();
    engine_black.new_game();

    let mut position = Position::new_game();
    let opening_moves = apply_seeded_random_opening(
        &mut position,
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    );

    let mut played_moves = Vec::<String>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    let mut outcome = MatchOutcome::DrawMaxPlies;
    for _ in 0..config.max_plies {
        match game_status(&mut position) {
            GameStatus::Checkmate => {
                outcome = match position.side_to_move {
                    Color::White => MatchOutcome::BlackWinCheckmate,
                    Color::Black => MatchOutcome::WhiteWinCheckmate,
                };
                break;
            }
            GameStatus::Stalemate => {
                outcome = MatchOutcome::DrawStalemate;
                break;
            }
            GameStatus::InProgress => {}
        }

        let mover = position.side_to_move;
        let started = Instant::now();
        let out = if mover == Color::White {
            engine_white.choose_move(&position, &config.go_params)
        } else {
            engine_black.choose_move(&position, &config.go_params)
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out
            .best_move
            .ok_or("engine returned no move in a live position")?;
        if !legal_moves(&mut position).contains(&chosen) {
            return Err(format!("engine returned illegal move {chosen}"));
        }

        played_moves.push(chosen.to_string());
        position
            .make_move(chosen)
            .ok_or_else(|| format!("legal move {chosen} failed to apply"))?;
    }

    Ok(MatchResult {
        outcome,
        final_fen: generate_fen(&position),
        opening_moves,
        played_moves,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Colors alternate each game: player 1 is White in even-numbered games
/// (counting from zero), so an even `games` count hands both players the
/// same number of White games.
pub fn play_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_is_white = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (white, black) = if player1_is_white {
                ("player1", "player2")
            } else {
                ("player2", "player1")
            };
            println!(
                "[series] game {}/{} seed={} white={} black={}",
                i + 1,
                config.games,
                seed,
                white,
                black
            );
        }

        let result = if player1_is_white {
            play_match(
                player1_factory(),
                player2_factory(),
                seed,
                &config.per_game,
            )?
        } else {
            play_match(
                player2_factory(),
                player1_factory(),
                seed,
                &config.per_game,
            )?
        };

        let (p1_moves, p2_moves, p1_time, p2_time) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_time);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_time);

        match result.outcome {
            MatchOutcome::WhiteWinCheckmate => {
                if player1_is_white {
                    stats.player1_wins += 1;
                } else {
                    stats.player2_wins += 1;
                }
            }
            MatchOutcome::BlackWinCheckmate => {
                if player1_is_white {
                    stats.player2_wins += 1;
                } else {
                    stats.player1_wins += 1;
                }
            }
            MatchOutcome::DrawStalemate | MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
            }
        }
        stats.outcomes.push(result.outcome);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} p1_wins={} p2_wins={} draws={}\n",
                i + 1,
                config.games,
                result.outcome,
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    position: &mut Position,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let moves = legal_moves(position);
        if moves.is_empty() {
            break;
        }
        let chosen = moves[rng.random_range(0..moves.len())];
        opening_moves.push(chosen.to_string());
        if position.make_move(chosen).is_none() {
            break;
        }
    }

    opening_moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_iterative::IterativeEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::fen::fen_parser::parse_fen;

    fn short_config() -> MatchConfig {
        MatchConfig {
            max_plies: 40,
            opening_min_plies: 2,
            opening_max_plies: 6,
            go_params: GoParams {
                depth: Some(1),
                movetime_ms: None,
            },
        }
    }

    #[test]
    fn match_harness_runs_random_vs_iterative() {
        let white = Box::new(RandomEngine::new());
        let black = Box::new(IterativeEngine::new(1));
        let result =
            play_match(white, black, 42, &short_config()).expect("match should run");

        assert!(!result.opening_moves.is_empty());
        assert!(result.white_move_count + result.black_move_count > 0);
        assert!(parse_fen(&result.final_fen).is_ok());
    }

    #[test]
    fn matches_with_the_same_seed_replay_identically() {
        let run = || {
            play_match(
                Box::new(IterativeEngine::new(1)),
                Box::new(IterativeEngine::new(1)),
                7,
                &MatchConfig {
                    max_plies: 20,
                    ..short_config()
                },
            )
            .expect("match should run")
        };
        let first = run();
        let second = run();
        assert_eq!(first.opening_moves, second.opening_moves);
        assert_eq!(first.played_moves, second.played_moves);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.final_fen, second.final_fen);
    }

    #[test]
    fn series_aggregates_per_player_stats() {
        let stats = play_series(
            || Box::new(RandomEngine::new()),
            || Box::new(RandomEngine::new()),
            &MatchSeriesConfig {
                games: 2,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 12,
                    ..short_config()
                },
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 2);
        assert_eq!(stats.outcomes.len(), 2);
        assert!(stats.player1_moves + stats.player2_moves > 0);
        assert!(stats.player1_avg_move_time_ms >= 0.0);
        assert!(stats.player2_avg_move_time_ms >= 0.0);
        assert!(!stats.report().is_empty());
    }
}
