#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod graph;
pub mod cards;
pub mod token;
pub mod state;
pub mod movegen;
pub mod turn;
pub mod events;
pub mod error;
pub mod rng;
pub mod hash;
pub mod persist;

pub mod engine {
    pub mod apply;
    pub mod capture;
}

// Re-exports: stable minimal API surface for external callers
pub use crate::cards::{Card, Deck, Rank};
pub use crate::engine::apply::MoveOutcome;
pub use crate::error::RulesError;
pub use crate::events::EngineObserver;
pub use crate::graph::HoleGraph;
pub use crate::hash::state_fingerprint;
pub use crate::movegen::{legal_plays, Move, MoveFlavor, Play};
pub use crate::persist::{load_log, replay, save_log, GameLog};
pub use crate::state::{GameConfig, GameState};
pub use crate::token::{Player, Token, TokenPhase};
pub use crate::turn::{TurnAction, TurnController, TurnPhase};
pub use crate::types::{Direction, HoleId, HoleKind, Seat};
