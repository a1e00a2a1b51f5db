use serde::{Deserialize, Serialize};

/// Number of board sections; the board is always built for four seats even
/// when fewer players occupy it.
pub const SECTIONS: u8 = 4;

/// Walk holes per section: six approach holes, Home, four outbound holes,
/// and the section's shortcut-ring corner.
pub const SECTION_LEN: u8 = 12;

/// Total holes on the clockwise perimeter walk.
pub const WALK_LEN: u8 = SECTIONS * SECTION_LEN;

/// Tokens per player.
pub const TOKENS_PER_PLAYER: u8 = 5;

/// Holding slots per player.
pub const HOLDING_SLOTS: u8 = 4;

/// Protected-stretch holes per player.
pub const STRETCH_SLOTS: u8 = 4;

/// A player position at the table. Seats are fixed to board sections; a game
/// with fewer than four players leaves the remaining seats empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(u8);

impl Seat {
    #[inline]
    pub fn new(index: u8) -> Option<Self> {
        (index < SECTIONS).then_some(Seat(index))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn all() -> [Seat; 4] {
        [Seat(0), Seat(1), Seat(2), Seat(3)]
    }

    /// Next seat in turn order among `player_count` occupied seats.
    #[inline]
    pub fn next(self, player_count: u8) -> Seat {
        Seat((self.0 + 1) % player_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Category of a hole, derived once from the board tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoleKind {
    Holding,
    Home,
    Perimeter,
    ShortcutRing,
    Center,
    ProtectedStretch,
}

/// Identity of a hole. Walk holes carry their clockwise index; Holding and
/// Stretch holes are owner-scoped slots off the walk; Center is the single
/// shared bullseye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HoleId {
    Walk(u8),
    Stretch { seat: Seat, slot: u8 },
    Holding { seat: Seat, slot: u8 },
    Center,
}

/// Walk-index helpers (mirror of the per-section layout).
#[inline]
pub fn section_of_walk(idx: u8) -> u8 {
    debug_assert!(idx < WALK_LEN);
    idx / SECTION_LEN
}

#[inline]
pub fn walk_next(idx: u8) -> u8 {
    debug_assert!(idx < WALK_LEN);
    (idx + 1) % WALK_LEN
}

#[inline]
pub fn walk_prev(idx: u8) -> u8 {
    debug_assert!(idx < WALK_LEN);
    (idx + WALK_LEN - 1) % WALK_LEN
}
