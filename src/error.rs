use std::path::PathBuf;

use crate::turn::TurnPhase;

/// Errors surfaced to engine callers. Nothing in the rule core is fatal:
/// deck exhaustion and inconsistent token flags are recovered internally and
/// never appear here.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("selected move is not in the current legal-move set")]
    IllegalMove,

    #[error("operation requires phase {expected:?}, controller is in {actual:?}")]
    NotInPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    #[error("game is already over")]
    GameOver,

    #[error("player count {0} out of range (2..=4)")]
    PlayerCount(u8),

    #[error("failed to read log {path}: {source}")]
    LogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write log {path}: {source}")]
    LogWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("log codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("log format version {found} unsupported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("replay diverged: fingerprint {replayed:#034x} != recorded {recorded:#034x}")]
    FingerprintMismatch { replayed: u128, recorded: u128 },

    #[error("replayed action {index} is illegal in the reconstructed game")]
    ReplayIllegalAction { index: usize },
}
