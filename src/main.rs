mod apple;
mod clock;
mod draw;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::clock::Clock;
use crate::game::SnakeGame;
use crate::term::TermManager;

/// Pixel coordinates of a cell's top-left corner.
pub type Position = (i32, i32);

const LOG_FILE: &str = "snake.log";

fn main() -> Result<()> {
    // Still on a cooked terminal here, so stderr is readable
    if let Err(err) = init_logging() {
        eprintln!("Running without logs: {:#}", err);
    }
    info!("Starting snake");

    let mut term = TermManager::new();
    let result = term.setup().and_then(|_| {
        let mut game = SnakeGame::new(rand::thread_rng());
        game.run(&mut term, &mut Clock::new())
    });

    // The terminal has to be usable again whatever happened above
    let restored = term.restore();
    info!("Stopped snake");

    result.and(restored)
}

// Raw mode owns the terminal, so logs go to a file
fn init_logging() -> Result<()> {
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    let file = File::create(LOG_FILE).with_context(|| format!("Error creating {}", LOG_FILE))?;
    WriteLogger::init(level, Config::default(), file).context("Error initializing logger")
}
