//! Escape Blocks headless runner
//!
//! Plays one session in demo mode with the autopilot steering, logs the
//! interesting events and prints the final frame as JSON.
//!
//! Usage: `escape-blocks [SEED] [MAX_TICKS]`

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use escape_blocks::consts::SIM_DT;
use escape_blocks::sim::{GameEvent, choose_move};
use escape_blocks::{Command, Game, Phase};

/// Ten minutes of play at the fixed cadence
const DEFAULT_MAX_TICKS: u64 = 20_000;

#[derive(Parser, Debug)]
#[command(name = "escape-blocks")]
#[command(about = "Headless Escape Blocks run steered by the autopilot")]
struct Cli {
    /// Run seed; defaults to the current time in milliseconds
    seed: Option<u64>,
    /// Stop after this many simulation ticks if the game is still running
    #[arg(
        default_value_t = DEFAULT_MAX_TICKS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_ticks: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    let max_ticks = cli.max_ticks;

    log::info!("Escape Blocks (headless) starting with seed {}", seed);

    let mut game = Game::new(seed);
    game.handle(Command::Start)?;

    for _ in 0..max_ticks {
        if let Some(direction) = game.session().and_then(choose_move) {
            game.handle(Command::Move(direction))?;
        }

        for event in game.update(SIM_DT).events {
            match event {
                GameEvent::LifeLost { remaining } => {
                    log::info!("Hit! {} lives left", remaining);
                }
                GameEvent::LevelChanged(tier) => {
                    log::info!("{}", tier.announcement());
                }
                GameEvent::GameOver { final_score, level } => {
                    log::info!("GAME OVER - score {} (level {})", final_score, level);
                }
                _ => {}
            }
        }

        if game.phase() == Phase::GameOver {
            break;
        }
    }

    if game.phase() == Phase::Playing {
        log::info!("Tick limit reached, stopping");
    }

    println!("{}", serde_json::to_string_pretty(&game.view())?);

    game.handle(Command::Quit)?;
    Ok(())
}
