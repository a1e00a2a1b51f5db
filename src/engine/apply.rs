use serde::{Deserialize, Serialize};

use crate::engine::capture::relocate_captured;
use crate::movegen::{Move, MoveFlavor, Play};
use crate::state::GameState;
use crate::token::TokenPhase;
use crate::types::{HoleId, Seat};

/// What applying a play did, for callers and commentary collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Captured opposing tokens as (owner, token index), in leg order.
    pub captured: Vec<(Seat, u8)>,
    pub won: Option<Seat>,
    pub entered_center: bool,
    pub exited_center: bool,
    pub entered_shortcut: bool,
    pub left_shortcut: bool,
}

/// Apply a generator-approved play to the board as one transaction. Split
/// plays apply their legs first-then-second. The caller (the turn
/// controller) has already validated the selection against the current
/// legal set; this function only performs the mutation.
pub fn apply_play(state: &mut GameState, play: &Play) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    for leg in play.legs() {
        apply_leg(state, &leg, &mut outcome);
    }
    outcome
}

fn apply_leg(state: &mut GameState, mv: &Move, outcome: &mut MoveOutcome) {
    // Capture first: an opposing occupant of a walk-level landing hole is
    // relocated before the mover arrives. Stretch and Center landings never
    // capture.
    if let HoleId::Walk(w) = mv.dest {
        if let Some((owner, victim)) = state.occupant_of_walk(w) {
            if owner != mv.seat {
                relocate_captured(state, owner, victim);
                outcome.captured.push((owner, victim));
            }
        }
    }

    let token = &mut state.player_mut(mv.seat).tokens[mv.token as usize];
    let was_on_ring = token.is_on_shortcut();

    match mv.flavor {
        MoveFlavor::Step | MoveFlavor::EnterFromHolding => {
            token.phase = TokenPhase::OnWalk { hole: walk_index(mv.dest) };
        }
        MoveFlavor::BackStep => {
            token.phase = TokenPhase::OnWalk { hole: walk_index(mv.dest) };
            // Backward repositioning before the entrance releases the lock
            // but keeps the earned eligibility.
            token.locked_to_stretch = false;
        }
        MoveFlavor::EnterShortcut => {
            token.phase = TokenPhase::OnShortcut { corner: walk_index(mv.dest) };
            token.eligible_for_stretch = true;
            outcome.entered_shortcut = true;
        }
        MoveFlavor::RingAdvance => {
            token.phase = TokenPhase::OnShortcut { corner: walk_index(mv.dest) };
        }
        MoveFlavor::RingExitVoluntary | MoveFlavor::RingExitSplit { .. } => match mv.dest {
            HoleId::Stretch { slot, .. } => {
                token.phase = TokenPhase::InStretch { slot };
                token.locked_to_stretch = true;
            }
            _ => {
                token.phase = TokenPhase::OnWalk { hole: walk_index(mv.dest) };
            }
        },
        MoveFlavor::RingExitTraversal => {
            token.phase = TokenPhase::OnWalk { hole: walk_index(mv.dest) };
            token.locked_to_stretch = true;
        }
        MoveFlavor::EnterCenterPenultimate | MoveFlavor::EnterCenterDirect => {
            token.phase = TokenPhase::InCenter;
            outcome.entered_center = true;
        }
        MoveFlavor::ExitCenter => {
            token.phase = TokenPhase::OnWalk { hole: walk_index(mv.dest) };
            token.has_left_center = true;
            token.eligible_for_stretch = true;
            outcome.exited_center = true;
        }
        MoveFlavor::EnterStretch | MoveFlavor::StretchAdvance => {
            if let HoleId::Stretch { slot, .. } = mv.dest {
                token.phase = TokenPhase::InStretch { slot };
                token.locked_to_stretch = true;
                token.eligible_for_stretch = true;
            }
        }
        MoveFlavor::HomeFinish => {
            token.phase = TokenPhase::Completed;
            outcome.won = Some(mv.seat);
        }
    }

    if outcome.won == Some(mv.seat) {
        state.player_mut(mv.seat).won = true;
    }
    // Ring status never outlives the ring, whatever hole the exit reached
    // (perimeter, stretch or Home).
    if was_on_ring && !state.player(mv.seat).tokens[mv.token as usize].is_on_shortcut() {
        state.player_mut(mv.seat).tokens[mv.token as usize].must_leave_shortcut = false;
        outcome.left_shortcut = true;
    }
}

#[inline]
fn walk_index(hole: HoleId) -> u8 {
    match hole {
        HoleId::Walk(w) => w,
        // Generator invariant: walk-flavored destinations are walk holes.
        _ => unreachable!("walk-flavored move with off-walk destination"),
    }
}
