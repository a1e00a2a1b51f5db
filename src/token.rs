use serde::{Deserialize, Serialize};

use crate::cards::Deck;
use crate::types::{HoleId, Seat, HOLDING_SLOTS, TOKENS_PER_PLAYER};

/// Where a token is in its life cycle. The phase carries only the data that
/// phase actually needs; combinations like "on the ring and in the center at
/// once" are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenPhase {
    /// Parked in the owner's holding area.
    Holding { slot: u8 },
    /// On the perimeter walk (includes Home holes and ring corners occupied
    /// without ring status).
    OnWalk { hole: u8 },
    /// Actively traversing the shortcut ring; sits on `corner`.
    OnShortcut { corner: u8 },
    /// In the bullseye.
    InCenter,
    /// In the owner's protected stretch.
    InStretch { slot: u8 },
    /// Reached Home with a full stretch behind it; terminal.
    Completed,
}

/// One of a player's five tokens: its phase plus the flags that survive
/// phase changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub phase: TokenPhase,
    /// Set on the first ring entry or on center exit; cleared only by capture.
    pub eligible_for_stretch: bool,
    /// Set when the ring is exited at the own corner after a full traversal,
    /// and again on stretch entry. Cleared by a backward repositioning move
    /// or by capture.
    pub locked_to_stretch: bool,
    /// One-way: a token visits the bullseye at most once per life.
    pub has_left_center: bool,
    /// Draw-time global effect of the forcing rank; meaningful only while on
    /// the ring.
    pub must_leave_shortcut: bool,
}

impl Token {
    #[inline]
    pub fn in_holding(slot: u8) -> Self {
        Self::with_phase(TokenPhase::Holding { slot })
    }

    #[inline]
    pub fn on_walk(hole: u8) -> Self {
        Self::with_phase(TokenPhase::OnWalk { hole })
    }

    #[inline]
    fn with_phase(phase: TokenPhase) -> Self {
        Self {
            phase,
            eligible_for_stretch: false,
            locked_to_stretch: false,
            has_left_center: false,
            must_leave_shortcut: false,
        }
    }

    /// Walk hole this token occupies, if any. Ring traversers occupy their
    /// corner hole like any walk occupant.
    #[inline]
    pub fn walk_hole(&self) -> Option<u8> {
        match self.phase {
            TokenPhase::OnWalk { hole } => Some(hole),
            TokenPhase::OnShortcut { corner } => Some(corner),
            _ => None,
        }
    }

    #[inline]
    pub fn is_on_shortcut(&self) -> bool {
        matches!(self.phase, TokenPhase::OnShortcut { .. })
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, TokenPhase::Completed)
    }

    /// Capture relocation target flags: everything transient is cleared as
    /// one transition, never partially.
    pub fn reset_for_capture(&mut self, phase: TokenPhase) {
        *self = Self::with_phase(phase);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub tokens: [Token; TOKENS_PER_PLAYER as usize],
    pub deck: Deck,
    pub won: bool,
}

impl Player {
    /// Starting layout: token 0 on the seat's Home hole, the other four in
    /// holding slots 0..=3.
    pub fn new(seat: Seat, seed: u64, home_hole: u8) -> Self {
        let mut tokens = [Token::in_holding(0); TOKENS_PER_PLAYER as usize];
        tokens[0] = Token::on_walk(home_hole);
        for slot in 0..HOLDING_SLOTS {
            tokens[(slot + 1) as usize] = Token::in_holding(slot);
        }
        Self {
            seat,
            tokens,
            deck: Deck::new(seed, seat),
            won: false,
        }
    }

    #[inline]
    pub fn holding_count(&self) -> u8 {
        self.tokens
            .iter()
            .filter(|t| matches!(t.phase, TokenPhase::Holding { .. }))
            .count() as u8
    }

    #[inline]
    pub fn stretch_count(&self) -> u8 {
        self.tokens
            .iter()
            .filter(|t| matches!(t.phase, TokenPhase::InStretch { .. }))
            .count() as u8
    }

    #[inline]
    pub fn board_count(&self) -> u8 {
        self.tokens
            .iter()
            .filter(|t| t.walk_hole().is_some() || matches!(t.phase, TokenPhase::InCenter))
            .count() as u8
    }

    /// First empty holding slot in fixed order, if any.
    pub fn free_holding_slot(&self) -> Option<u8> {
        (0..HOLDING_SLOTS).find(|&slot| {
            !self
                .tokens
                .iter()
                .any(|t| t.phase == TokenPhase::Holding { slot })
        })
    }

    /// Whether this player's stretch holds its full capacity.
    #[inline]
    pub fn stretch_full(&self) -> bool {
        self.stretch_count() == crate::types::STRETCH_SLOTS
    }

    /// Index of the token sitting in the given stretch slot, if occupied.
    pub fn token_in_stretch(&self, slot: u8) -> Option<u8> {
        self.tokens
            .iter()
            .position(|t| t.phase == TokenPhase::InStretch { slot })
            .map(|i| i as u8)
    }

    /// Lowest-index token still in holding, if any. Holding tokens are
    /// interchangeable, so the generator emits entry moves for this one only.
    pub fn first_holding_token(&self) -> Option<u8> {
        self.tokens
            .iter()
            .position(|t| matches!(t.phase, TokenPhase::Holding { .. }))
            .map(|i| i as u8)
    }

    /// Current hole of a token as a board-level identity.
    pub fn hole_of(&self, token: u8) -> Option<HoleId> {
        match self.tokens[token as usize].phase {
            TokenPhase::Holding { slot } => Some(HoleId::Holding {
                seat: self.seat,
                slot,
            }),
            TokenPhase::OnWalk { hole } => Some(HoleId::Walk(hole)),
            TokenPhase::OnShortcut { corner } => Some(HoleId::Walk(corner)),
            TokenPhase::InCenter => Some(HoleId::Center),
            TokenPhase::InStretch { slot } => Some(HoleId::Stretch {
                seat: self.seat,
                slot,
            }),
            TokenPhase::Completed => None,
        }
    }
}
