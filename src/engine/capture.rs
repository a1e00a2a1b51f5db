use crate::state::GameState;
use crate::token::TokenPhase;
use crate::types::{HoleId, Seat};

/// Relocate a captured token: first empty holding slot in fixed order, Home
/// when holding is full. All transient flags are cleared in one transition;
/// a token parked on Home this way remains movable and capturable.
///
/// Returns the hole the token was sent to.
pub fn relocate_captured(state: &mut GameState, owner: Seat, token: u8) -> HoleId {
    let home = state.graph.home_of(owner);
    let player = state.player_mut(owner);
    match player.free_holding_slot() {
        Some(slot) => {
            player.tokens[token as usize].reset_for_capture(TokenPhase::Holding { slot });
            HoleId::Holding { seat: owner, slot }
        }
        None => {
            tracing::debug!(
                seat = owner.index(),
                token,
                "holding full; captured token relocated to Home"
            );
            player.tokens[token as usize].reset_for_capture(TokenPhase::OnWalk { hole: home });
            HoleId::Walk(home)
        }
    }
}
