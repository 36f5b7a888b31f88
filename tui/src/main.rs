mod args;
mod board;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use board::SharedBoard;
use cagrid_lib::{Automaton, Surface};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{error::Error, process};

/// Prints the first `generations` generations, one after another.
fn run_without_tui(
    mut automaton: Automaton,
    board: SharedBoard,
    generations: u64,
) -> Result<(), Box<dyn Error>> {
    println!("Generation 0:\n{}", board.borrow());
    let display = board.clone();
    automaton.on_generation_change(move |generation| {
        println!("Generation {}:\n{}", generation, display.borrow())
    });
    for _ in 0..generations {
        automaton.step()?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = &args.config;
    let board = SharedBoard::new(config.rows, config.cols, config.states()?);
    let automaton = config.automaton(&Surface::new("terminal"), board.clone())?;

    #[cfg(feature = "tui")]
    {
        if !args.no_tui {
            return tui::run_with_tui(automaton, board, config);
        }
    }

    run_without_tui(automaton, board, args.generations)
}

fn main() {
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Could not set up logging: {}", e);
    }
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
