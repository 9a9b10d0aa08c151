//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match`
//! `cargo run --release --bin engine_match -- 10 1234 3 --verbose`
//!
//! Positional arguments: games, base seed, iterative depth.

use couch_chess::engines::engine_iterative::IterativeEngine;
use couch_chess::engines::engine_random::RandomEngine;
use couch_chess::engines::engine_trait::{Engine, GoParams};
use couch_chess::utils::match_harness::{play_series, MatchConfig, MatchSeriesConfig};

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    let games: u16 = parse_arg(&positional, 0, 8)?;
    let base_seed: u64 = parse_arg(&positional, 1, 1234)?;
    let depth: u8 = parse_arg(&positional, 2, 3)?;

    let player1 = move || Box::new(IterativeEngine::new(depth)) as Box<dyn Engine>;
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    println!(
        "[engine_match] {} games={} seed={} iterative(depth {}) vs random",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        games,
        base_seed,
        depth
    );

    let stats = play_series(
        player1,
        player2,
        &MatchSeriesConfig {
            games,
            base_seed,
            per_game: MatchConfig {
                max_plies: 200,
                opening_min_plies: 2,
                opening_max_plies: 6,
                go_params: GoParams {
                    depth: Some(depth),
                    movetime_ms: None,
                },
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(
    positional: &[&String],
    index: usize,
    default: T,
) -> Result<T, String> {
    match positional.get(index) {
        None => Ok(default),
        Some(text) => text
            .parse::<T>()
            .map_err(|_| format!("invalid argument '{text}' at position {index}")),
    }
}
