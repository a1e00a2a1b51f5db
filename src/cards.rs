use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::rng::rng_for_shuffle;
use crate::types::{Direction, Seat};

/// Copies of each rank in a player's deck.
pub const COPIES_PER_RANK: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    #[inline]
    pub fn all() -> [Rank; 13] {
        [
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
        ]
    }
}

/// A drawn card and its movement properties. The rank table is closed and
/// compiled in; there is no external card database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
}

impl Card {
    #[inline]
    pub fn new(rank: Rank) -> Self {
        Self { rank }
    }

    /// Full step count of the card's main leg.
    #[inline]
    pub fn steps(&self) -> u8 {
        match self.rank {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    /// Movement direction. `Either` cards expose a conditional backward leg
    /// next to their forward count.
    #[inline]
    pub fn direction(&self) -> Direction {
        match self.rank {
            Rank::Four => Direction::Backward,
            _ => Direction::Forward,
        }
    }

    /// Ten moves forward ten, or one hole backward when an opposing token
    /// sits directly behind.
    #[inline]
    pub fn has_conditional_backstep(&self) -> bool {
        self.rank == Rank::Ten
    }

    #[inline]
    pub fn can_enter_from_holding(&self) -> bool {
        matches!(self.rank, Rank::Ace | Rank::King)
    }

    #[inline]
    pub fn can_exit_center(&self) -> bool {
        self.rank == Rank::Ace
    }

    #[inline]
    pub fn grants_extra_turn(&self) -> bool {
        self.rank == Rank::Two
    }

    /// Seven may be split across two different tokens.
    #[inline]
    pub fn is_split(&self) -> bool {
        self.rank == Rank::Seven
    }

    /// Drawing a Queen marks every ring-resident token, all players,
    /// with the must-leave flag at draw time.
    #[inline]
    pub fn forces_shortcut_exit(&self) -> bool {
        self.rank == Rank::Queen
    }
}

/// A player's independent card supply. Draws never interleave across seats;
/// the discard pile reshuffles into a fresh draw pile on exhaustion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    seat: Seat,
    seed: u64,
    /// Shuffle epoch: bumped on every reshuffle so replays stay aligned.
    epoch: u32,
    draw: Vec<Rank>,
    discard: Vec<Rank>,
}

impl Deck {
    pub fn new(seed: u64, seat: Seat) -> Self {
        let mut deck = Self {
            seat,
            seed,
            epoch: 0,
            draw: Vec::new(),
            discard: Vec::new(),
        };
        deck.rebuild();
        deck
    }

    fn full_pile() -> Vec<Rank> {
        let mut pile = Vec::with_capacity(13 * COPIES_PER_RANK);
        for rank in Rank::all() {
            for _ in 0..COPIES_PER_RANK {
                pile.push(rank);
            }
        }
        pile
    }

    fn shuffle_in_place(&mut self) {
        let mut rng = rng_for_shuffle(self.seed, self.seat, self.epoch);
        self.draw.shuffle(&mut rng);
        self.epoch += 1;
    }

    /// Rebuild a complete shuffled pile, discarding bookkeeping. Used at
    /// construction and as the last-resort recovery when both piles are
    /// empty.
    fn rebuild(&mut self) {
        self.draw = Self::full_pile();
        self.discard.clear();
        self.shuffle_in_place();
    }

    /// Draw the top card, reshuffling the discard pile when the draw pile is
    /// exhausted. Never fails: an empty discard pile rebuilds a full deck.
    pub fn draw(&mut self) -> Card {
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                tracing::warn!(seat = self.seat.index(), "deck and discard both empty; rebuilding");
                self.rebuild();
            } else {
                self.draw.append(&mut self.discard);
                self.shuffle_in_place();
            }
        }
        // Non-empty by construction above.
        let rank = self.draw.pop().expect("deck refilled before draw");
        Card::new(rank)
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card.rank);
    }

    /// Place a card on top of the draw pile, to be drawn next. Scripted
    /// scenarios (tutorials, tests) stack decks this way.
    pub fn place_on_top(&mut self, card: Card) {
        self.draw.push(card.rank);
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    #[inline]
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }
}
