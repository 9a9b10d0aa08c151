//! Line-oriented trainer shell.
//!
//! Reads commands from stdin and maps them straight onto the
//! [`TrainerEngine`] facade. Search is synchronous and time-bounded, so a
//! plain blocking read loop is enough; there is no mid-search cancellation
//! channel to service.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use couch_chess::board::chess_rules::STARTING_POSITION_FEN;
use couch_chess::move_generation::legality::GameStatus;
use couch_chess::trainer::TrainerEngine;

fn main() {
    let stdin = io::stdin();
    let mut trainer = TrainerEngine::new();

    println!("CouchChess trainer shell. Type 'help' for commands.");
    io::stdout().flush().ok();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = tokens.first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "position" => handle_position(&mut trainer, &tokens[1..]),
            "go" => handle_go(&mut trainer, tokens.get(1).copied()),
            "legal" => handle_legal(&trainer),
            "play" => handle_play(&mut trainer, tokens.get(1).copied()),
            "board" => println!("{}", trainer.render()),
            "fen" => println!("{}", trainer.current_fen()),
            "status" => println!("{}", status_text(trainer.status())),
            _ => println!("unknown command '{command}', type 'help'"),
        }
        io::stdout().flush().ok();
    }
}

fn print_help() {
    println!("position startpos          reset to the starting position");
    println!("position fen <fen>         load a FEN position");
    println!("go [seconds]               search within a time budget (default 1)");
    println!("legal                      list legal moves");
    println!("play <move>                play a coordinate move like e2e4");
    println!("board                      render the board");
    println!("fen                        print the current position as FEN");
    println!("status                     in progress / checkmate / stalemate");
    println!("quit                       leave the shell");
}

fn handle_position(trainer: &mut TrainerEngine, args: &[&str]) {
    match args.first().copied() {
        Some("startpos") => {
            if let Err(err) = trainer.set_position_from_fen(STARTING_POSITION_FEN) {
                println!("error: {err}");
            }
        }
        Some("fen") if args.len() > 1 => {
            let fen = args[1..].join(" ");
            match trainer.set_position_from_fen(&fen) {
                Ok(()) => {}
                Err(err) => println!("error: {err}"),
            }
        }
        _ => println!("usage: position startpos | position fen <fen>"),
    }
}

fn handle_go(trainer: &mut TrainerEngine, budget_arg: Option<&str>) {
    let budget = match budget_arg {
        None => Duration::from_secs(1),
        Some(text) => match parse_go_budget(text) {
            Some(budget) => budget,
            None => {
                println!("error: invalid time budget '{text}'");
                return;
            }
        },
    };
    match trainer.search_best_move(budget) {
        Some(best) => println!("bestmove {best}"),
        None => println!("bestmove none ({})", status_text(trainer.status())),
    }
}

/// Seconds text to a search budget. Rejects everything a `Duration` cannot
/// hold: non-numbers, negatives, NaN, infinities, and values past
/// `Duration::MAX`.
fn parse_go_budget(text: &str) -> Option<Duration> {
    let seconds = text.parse::<f64>().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

fn handle_legal(trainer: &TrainerEngine) {
    let moves = trainer.legal_moves();
    if moves.is_empty() {
        println!("(no legal moves, {})", status_text(trainer.status()));
        return;
    }
    let texts: Vec<String> = moves.iter().map(ToString::to_string).collect();
    println!("{}", texts.join(" "));
}

fn handle_play(trainer: &mut TrainerEngine, move_arg: Option<&str>) {
    let Some(text) = move_arg else {
        println!("usage: play <move>");
        return;
    };
    match trainer.play_coordinate_move(text) {
        Ok(mv) => println!("played {mv}"),
        Err(err) => println!("error: {err}"),
    }
}

fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "in progress",
        GameStatus::Checkmate => "checkmate",
        GameStatus::Stalemate => "stalemate",
    }
}
