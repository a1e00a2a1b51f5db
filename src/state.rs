use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::graph::HoleGraph;
use crate::token::{Player, TokenPhase};
use crate::types::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Occupied seats, in turn order from seat 0. Range 2..=4.
    pub players: u8,
    /// Master seed; every per-seat deck shuffle derives from it.
    pub seed: u64,
}

impl GameConfig {
    #[inline]
    pub fn new(players: u8, seed: u64) -> Self {
        Self { players, seed }
    }
}

/// Whole-board mutable state: one `Player` record per occupied seat plus the
/// static topology. All occupancy questions go through the queries here so
/// the single-occupancy invariant has one enforcement point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(skip, default)]
    pub graph: HoleGraph,
    pub players: Vec<Player>,
    pub active: Seat,
    /// Monotonic turn counter, bumped on every draw.
    pub turn: u32,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, RulesError> {
        if !(2..=4).contains(&config.players) {
            return Err(RulesError::PlayerCount(config.players));
        }
        let graph = HoleGraph::new();
        let players = (0..config.players)
            .map(|i| {
                let seat = Seat::new(i).expect("seat within section count");
                let home = graph.home_of(seat);
                Player::new(seat, config.seed, home)
            })
            .collect();
        Ok(Self {
            graph,
            players,
            active: Seat::new(0).expect("seat 0 exists"),
            turn: 0,
        })
    }

    #[inline]
    pub fn player_count(&self) -> u8 {
        self.players.len() as u8
    }

    #[inline]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// Occupant of a walk hole, if any: (owner, token index). Ring
    /// traversers occupy their corner hole like any other walk occupant.
    pub fn occupant_of_walk(&self, hole: u8) -> Option<(Seat, u8)> {
        for player in &self.players {
            for (i, token) in player.tokens.iter().enumerate() {
                if token.walk_hole() == Some(hole) {
                    return Some((player.seat, i as u8));
                }
            }
        }
        None
    }

    /// Whether the given seat has one of its own tokens in the bullseye.
    /// Opposing tokens share the bullseye freely and never block it.
    pub fn center_occupied_by(&self, seat: Seat) -> bool {
        self.player(seat)
            .tokens
            .iter()
            .any(|t| matches!(t.phase, TokenPhase::InCenter))
    }

    /// Whether the victim's owner can physically receive a capture: a free
    /// holding slot, or an empty own Home hole as fallback.
    pub fn can_receive_capture(&self, owner: Seat) -> bool {
        if self.player(owner).free_holding_slot().is_some() {
            return true;
        }
        self.occupant_of_walk(self.graph.home_of(owner)).is_none()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.players.iter().find(|p| p.won).map(|p| p.seat)
    }

    /// Defensive repair of inconsistent token flags, run before move
    /// generation. Corrections are reported on the diagnostic channel and
    /// the game stays playable; nothing here is an error.
    pub fn repair_flags(&mut self) -> usize {
        let mut corrections = 0;
        for player in &mut self.players {
            for (i, token) in player.tokens.iter_mut().enumerate() {
                if token.locked_to_stretch && !token.eligible_for_stretch {
                    tracing::warn!(
                        seat = player.seat.index(),
                        token = i,
                        "locked_to_stretch without eligibility; restoring eligibility"
                    );
                    token.eligible_for_stretch = true;
                    corrections += 1;
                }
                if token.must_leave_shortcut && !token.is_on_shortcut() {
                    tracing::warn!(
                        seat = player.seat.index(),
                        token = i,
                        "must_leave_shortcut on a token not on the ring; clearing"
                    );
                    token.must_leave_shortcut = false;
                    corrections += 1;
                }
                if matches!(token.phase, TokenPhase::InStretch { .. })
                    && !token.locked_to_stretch
                {
                    tracing::warn!(
                        seat = player.seat.index(),
                        token = i,
                        "stretch resident without lock; restoring lock"
                    );
                    token.locked_to_stretch = true;
                    token.eligible_for_stretch = true;
                    corrections += 1;
                }
            }
        }
        corrections
    }
}
