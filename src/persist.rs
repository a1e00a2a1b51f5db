use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RulesError;
use crate::hash::state_fingerprint;
use crate::state::GameConfig;
use crate::turn::{TurnAction, TurnController, TurnPhase};

pub const FORMAT_VERSION: u32 = 1;

/// Everything a collaborator needs to reconstruct a game: the config
/// (draws are deterministic from its seed) and the recorded turn decisions.
/// The fingerprint pins the final board state so a diverging replay is
/// detected instead of silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogHeader {
    pub version: u32,
    pub config: GameConfig,
    pub fingerprint: u128,
    // Intentionally no timestamp: logs stay byte-for-byte deterministic.
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    pub header: LogHeader,
    pub actions: Vec<TurnAction>,
}

impl GameLog {
    /// Snapshot the controller's recorded game.
    pub fn from_controller(controller: &TurnController) -> Self {
        Self {
            header: LogHeader {
                version: FORMAT_VERSION,
                config: controller.config(),
                fingerprint: state_fingerprint(controller.state()),
            },
            actions: controller.actions().to_vec(),
        }
    }
}

/// Save a log as a single bincode blob.
pub fn save_log<P: AsRef<Path>>(path: P, log: &GameLog) -> Result<(), RulesError> {
    let bytes = bincode::serialize(log)?;
    fs::write(path.as_ref(), bytes).map_err(|source| RulesError::LogWrite {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

/// Load a log written by `save_log`.
pub fn load_log<P: AsRef<Path>>(path: P) -> Result<GameLog, RulesError> {
    let bytes = fs::read(path.as_ref()).map_err(|source| RulesError::LogRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let log: GameLog = bincode::deserialize(&bytes)?;
    if log.header.version != FORMAT_VERSION {
        return Err(RulesError::VersionMismatch {
            found: log.header.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(log)
}

/// Rebuild a game by re-running a log against a fresh controller and verify
/// the final state fingerprint. Returns the reconstructed controller (its
/// phase matches wherever the recording stopped).
pub fn replay(log: &GameLog) -> Result<TurnController, RulesError> {
    let mut controller = TurnController::new(log.header.config)?;
    for (index, action) in log.actions.iter().enumerate() {
        controller.draw_card()?;
        let result = match action {
            TurnAction::Skip => controller.skip_turn(),
            TurnAction::Play(play) => controller.apply_play(play).map(|_| ()),
        };
        result.map_err(|_| RulesError::ReplayIllegalAction { index })?;
        if controller.phase() == TurnPhase::GameOver && index + 1 < log.actions.len() {
            return Err(RulesError::ReplayIllegalAction { index: index + 1 });
        }
    }
    let replayed = state_fingerprint(controller.state());
    if replayed != log.header.fingerprint {
        return Err(RulesError::FingerprintMismatch {
            replayed,
            recorded: log.header.fingerprint,
        });
    }
    Ok(controller)
}
