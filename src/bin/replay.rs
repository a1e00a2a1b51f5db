use std::path::PathBuf;

use clap::Parser;
use serde_json::json;

use ringrace::{load_log, replay, state_fingerprint};

#[derive(Debug, Parser)]
#[command(name = "replay", about = "Ringrace move-log replay verifier")]
struct Args {
    /// Log file produced by the simulator or another engine host.
    log: PathBuf,

    /// Print the reconstructed final state as JSON.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let log = load_log(&args.log).map_err(|e| format!("load failed: {e}"))?;
    let controller = replay(&log).map_err(|e| format!("replay failed: {e}"))?;

    let state = controller.state();
    let summary = json!({
        "players": log.header.config.players,
        "seed": log.header.config.seed,
        "actions": log.actions.len(),
        "turns": state.turn,
        "winner": state.winner().map(|s| s.index()),
        "fingerprint": format!("{:#034x}", state_fingerprint(state)),
    });
    println!("{}", serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?);

    if args.dump {
        println!("{}", serde_json::to_string_pretty(state).map_err(|e| e.to_string())?);
    }
    Ok(())
}
