use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing_subscriber::EnvFilter;

use ringrace::{
    persist::{save_log, GameLog},
    GameConfig, TurnController, TurnPhase,
};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Ringrace random-playout simulator")]
struct Args {
    /// Master seed; omitted means one is drawn from OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of players (2..=4).
    #[arg(long, default_value_t = 4)]
    players: u8,

    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Safety cap on drawn cards per game.
    #[arg(long, default_value_t = 10_000)]
    max_draws: u32,

    /// Write the last game's move log here.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn play_one(config: GameConfig, pick_seed: u64, max_draws: u32) -> Result<TurnController, String> {
    let mut controller =
        TurnController::new(config).map_err(|e| format!("failed to start game: {e}"))?;
    let mut picker = Pcg64::seed_from_u64(pick_seed);

    for _ in 0..max_draws {
        if controller.phase() == TurnPhase::GameOver {
            break;
        }
        controller
            .draw_card()
            .map_err(|e| format!("draw failed: {e}"))?;
        let plays = controller.legal_plays().to_vec();
        if plays.is_empty() {
            controller
                .skip_turn()
                .map_err(|e| format!("skip failed: {e}"))?;
        } else {
            let pick = picker.gen_range(0..plays.len());
            controller
                .apply_play(&plays[pick])
                .map_err(|e| format!("apply failed: {e}"))?;
        }
    }
    Ok(controller)
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::rngs::OsRng.gen());
    println!("seed: {seed:#018x}  players: {}  games: {}", args.players, args.games);

    let mut finished = 0u32;
    let mut wins = [0u32; 4];
    let mut last: Option<TurnController> = None;

    for game in 0..args.games {
        let config = GameConfig::new(args.players, seed.wrapping_add(game as u64));
        let controller = play_one(config, seed ^ 0xA11C_E5ED ^ game as u64, args.max_draws)?;
        if let Some(winner) = controller.state().winner() {
            finished += 1;
            wins[winner.index()] += 1;
        }
        last = Some(controller);
    }

    println!("finished: {finished}/{}", args.games);
    for (seat, count) in wins.iter().enumerate().take(args.players as usize) {
        println!("  seat {seat}: {count} wins");
    }

    if let (Some(path), Some(controller)) = (args.log, last) {
        let log = GameLog::from_controller(&controller);
        save_log(&path, &log).map_err(|e| format!("failed to save log: {e}"))?;
        println!("log written to {}", path.display());
    }
    Ok(())
}
