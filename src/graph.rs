use hashbrown::HashMap;

use crate::types::{
    section_of_walk, walk_next, walk_prev, Direction, HoleId, HoleKind, Seat, SECTIONS,
    SECTION_LEN, STRETCH_SLOTS, WALK_LEN,
};

/// Offsets within a section, in canonical clockwise order.
const HOME_OFFSET: u8 = 6;
const CORNER_OFFSET: u8 = 11;
/// The owner's stretch entrance is the last approach hole before Home.
const ENTRANCE_OFFSET: u8 = 5;

/// Static board topology: the canonical clockwise walk, the shortcut ring of
/// corner holes, the per-seat Home/entrance/stretch tables and the shared
/// Center. Built once; every other component queries it instead of
/// re-deriving adjacency.
#[derive(Debug, Clone)]
pub struct HoleGraph {
    kinds: [HoleKind; WALK_LEN as usize],
    /// Corner walk index per section, clockwise.
    corners: [u8; SECTIONS as usize],
    homes: [u8; SECTIONS as usize],
    entrances: [u8; SECTIONS as usize],
    /// Reverse lookup: corner walk index -> section.
    corner_sections: HashMap<u8, u8>,
}

impl Default for HoleGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl HoleGraph {
    pub fn new() -> Self {
        let mut kinds = [HoleKind::Perimeter; WALK_LEN as usize];
        let mut corners = [0u8; SECTIONS as usize];
        let mut homes = [0u8; SECTIONS as usize];
        let mut entrances = [0u8; SECTIONS as usize];
        let mut corner_sections = HashMap::with_capacity(SECTIONS as usize);

        for s in 0..SECTIONS {
            let base = s * SECTION_LEN;
            let home = base + HOME_OFFSET;
            let corner = base + CORNER_OFFSET;
            kinds[home as usize] = HoleKind::Home;
            kinds[corner as usize] = HoleKind::ShortcutRing;
            homes[s as usize] = home;
            corners[s as usize] = corner;
            entrances[s as usize] = base + ENTRANCE_OFFSET;
            corner_sections.insert(corner, s);
        }

        Self {
            kinds,
            corners,
            homes,
            entrances,
            corner_sections,
        }
    }

    /// Category of any hole on the board.
    #[inline]
    pub fn kind(&self, hole: HoleId) -> HoleKind {
        match hole {
            HoleId::Walk(idx) => self.kinds[idx as usize],
            HoleId::Stretch { .. } => HoleKind::ProtectedStretch,
            HoleId::Holding { .. } => HoleKind::Holding,
            HoleId::Center => HoleKind::Center,
        }
    }

    #[inline]
    pub fn section_of(&self, walk_idx: u8) -> u8 {
        section_of_walk(walk_idx)
    }

    /// The dual start/win hole of a seat.
    #[inline]
    pub fn home_of(&self, seat: Seat) -> u8 {
        self.homes[seat.index()]
    }

    /// The ring corner belonging to a section.
    #[inline]
    pub fn corner_of(&self, section: u8) -> u8 {
        self.corners[section as usize]
    }

    /// The corner a seat's tokens must exit the ring through: the one whose
    /// walk successor leads into the seat's own approach holes.
    #[inline]
    pub fn exit_corner_of(&self, seat: Seat) -> u8 {
        self.corners[(seat.index() + 3) % SECTIONS as usize]
    }

    /// The single perimeter hole through which a seat's stretch is entered.
    #[inline]
    pub fn stretch_entrance_of(&self, seat: Seat) -> u8 {
        self.entrances[seat.index()]
    }

    #[inline]
    pub fn is_corner(&self, walk_idx: u8) -> bool {
        self.corner_sections.contains_key(&walk_idx)
    }

    /// Section owning a corner walk index, if it is one.
    #[inline]
    pub fn corner_section(&self, walk_idx: u8) -> Option<u8> {
        self.corner_sections.get(&walk_idx).copied()
    }

    #[inline]
    pub fn walk_next(&self, idx: u8) -> u8 {
        walk_next(idx)
    }

    #[inline]
    pub fn walk_prev(&self, idx: u8) -> u8 {
        walk_prev(idx)
    }

    /// Lazy, total walk sequence from (exclusive) `from` in the given
    /// direction. Forward is clockwise.
    pub fn walk_seq(&self, from: u8, direction: Direction) -> impl Iterator<Item = u8> + '_ {
        let mut cur = from;
        std::iter::from_fn(move || {
            cur = match direction {
                Direction::Forward => walk_next(cur),
                Direction::Backward => walk_prev(cur),
            };
            Some(cur)
        })
    }

    /// Next corner clockwise around the shortcut ring.
    #[inline]
    pub fn ring_next(&self, corner: u8) -> u8 {
        let s = self.corner_sections[&corner];
        self.corners[((s + 1) % SECTIONS) as usize]
    }

    /// Previous corner counter-clockwise around the shortcut ring.
    #[inline]
    pub fn ring_prev(&self, corner: u8) -> u8 {
        let s = self.corner_sections[&corner];
        self.corners[((s + SECTIONS - 1) % SECTIONS) as usize]
    }

    /// Clockwise ring hops from one corner to another (0 when equal).
    #[inline]
    pub fn ring_distance(&self, from: u8, to: u8) -> u8 {
        let a = self.corner_sections[&from];
        let b = self.corner_sections[&to];
        (b + SECTIONS - a) % SECTIONS
    }

    /// Number of stretch holes per seat.
    #[inline]
    pub fn stretch_len(&self) -> u8 {
        STRETCH_SLOTS
    }
}
