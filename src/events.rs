use crate::cards::Card;
use crate::engine::apply::MoveOutcome;
use crate::movegen::Play;
use crate::types::Seat;

/// Synchronous engine notifications for rendering/AI/commentary
/// collaborators. Observers are injected into the controller at
/// construction or via `subscribe`; every hook has a no-op default.
pub trait EngineObserver {
    fn on_card_drawn(&mut self, _seat: Seat, _card: Card, _legal_plays: usize) {}

    /// Fired after a play is applied, with capture/enter/exit annotations.
    fn on_move_applied(&mut self, _seat: Seat, _play: &Play, _outcome: &MoveOutcome) {}

    fn on_turn_ended(&mut self, _seat: Seat, _extra_turn: bool) {}

    fn on_game_over(&mut self, _winner: Seat) {}
}

/// Counting observer, handy for tests and the simulation CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventCounters {
    pub draws: u32,
    pub plays: u32,
    pub captures: u32,
    pub turns: u32,
    pub extra_turns: u32,
    pub game_overs: u32,
}

impl EngineObserver for EventCounters {
    fn on_card_drawn(&mut self, _seat: Seat, _card: Card, _legal_plays: usize) {
        self.draws += 1;
    }

    fn on_move_applied(&mut self, _seat: Seat, _play: &Play, outcome: &MoveOutcome) {
        self.plays += 1;
        self.captures += outcome.captured.len() as u32;
    }

    fn on_turn_ended(&mut self, _seat: Seat, extra_turn: bool) {
        self.turns += 1;
        if extra_turn {
            self.extra_turns += 1;
        }
    }

    fn on_game_over(&mut self, _winner: Seat) {
        self.game_overs += 1;
    }
}
