use crate::rng::splitmix64;
use crate::state::GameState;
use crate::token::{Token, TokenPhase};

// Domain tags (arbitrary but fixed)
const DOM_HOLDING: u64 = 0x51DE_CA11_0000_0001;
const DOM_WALK: u64 = 0x51DE_CA11_0000_0002;
const DOM_RING: u64 = 0x51DE_CA11_0000_0003;
const DOM_CENTER: u64 = 0x51DE_CA11_0000_0004;
const DOM_STRETCH: u64 = 0x51DE_CA11_0000_0005;
const DOM_DONE: u64 = 0x51DE_CA11_0000_0006;
const DOM_FLAGS: u64 = 0x51DE_CA11_0000_0007;
const DOM_ACTIVE: u64 = 0x51DE_CA11_0000_00A0;
const DOM_TURN: u64 = 0x51DE_CA11_0000_00B0;

#[inline]
fn token128_from_seed(seed: u64) -> u128 {
    let lo = splitmix64(seed ^ 0xC0FF_EE00_D15E_CAFE);
    let hi = splitmix64(seed ^ 0xDEAD_BEEF_F00D_FACE ^ lo.rotate_left(17));
    ((hi as u128) << 64) | (lo as u128)
}

#[inline]
fn token_word(token: &Token) -> u64 {
    let (dom, pos) = match token.phase {
        TokenPhase::Holding { slot } => (DOM_HOLDING, slot as u64),
        TokenPhase::OnWalk { hole } => (DOM_WALK, hole as u64),
        TokenPhase::OnShortcut { corner } => (DOM_RING, corner as u64),
        TokenPhase::InCenter => (DOM_CENTER, 0),
        TokenPhase::InStretch { slot } => (DOM_STRETCH, slot as u64),
        TokenPhase::Completed => (DOM_DONE, 0),
    };
    let flags = (token.eligible_for_stretch as u64)
        | ((token.locked_to_stretch as u64) << 1)
        | ((token.has_left_center as u64) << 2)
        | ((token.must_leave_shortcut as u64) << 3);
    dom ^ pos.rotate_left(13) ^ (DOM_FLAGS.wrapping_mul(flags + 1))
}

/// 128-bit fingerprint over the full board state: every token's phase and
/// flags, the active seat and the turn counter. Deck contents are excluded
/// on purpose; they are a pure function of (seed, seat, epoch) and the draw
/// count, which the turn counter already pins down.
pub fn state_fingerprint(state: &GameState) -> u128 {
    let mut z: u128 = 0;
    for player in &state.players {
        for (i, token) in player.tokens.iter().enumerate() {
            let seed = token_word(token)
                ^ ((player.seat.index() as u64) << 48)
                ^ ((i as u64) << 56);
            z ^= token128_from_seed(seed);
        }
        if player.won {
            z ^= token128_from_seed(DOM_DONE ^ ((player.seat.index() as u64) << 48));
        }
    }
    z ^= token128_from_seed(DOM_ACTIVE ^ state.active.index() as u64);
    z ^= token128_from_seed(DOM_TURN ^ state.turn as u64);
    z
}
