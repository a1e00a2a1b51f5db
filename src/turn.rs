use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::apply::{apply_play, MoveOutcome};
use crate::error::RulesError;
use crate::events::EngineObserver;
use crate::movegen::{legal_plays, Play};
use crate::state::{GameConfig, GameState};
use crate::token::TokenPhase;
use crate::types::Seat;

/// Externally observable controller phase. Draw and resolution are
/// transient inside `draw_card`/`apply_play`; between calls the controller
/// is either waiting for a draw, waiting for a selection, or done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the active player to draw.
    Idle,
    /// A card is drawn; waiting for a play selection or a skip.
    Play,
    GameOver,
}

/// One recorded turn decision; draws are deterministic from the seed, so a
/// log of these reconstructs the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    Skip,
    Play(Play),
}

/// The draw/play/extra-turn/end-turn state machine. Sequences the active
/// player's deck, the move generator and capture resolution; collaborators
/// select one of the offered plays and everything else is decided here.
pub struct TurnController {
    config: GameConfig,
    state: GameState,
    phase: TurnPhase,
    current_card: Option<Card>,
    cached_plays: Vec<Play>,
    actions: Vec<TurnAction>,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl TurnController {
    pub fn new(config: GameConfig) -> Result<Self, RulesError> {
        Ok(Self {
            config,
            state: GameState::new(config)?,
            phase: TurnPhase::Idle,
            current_card: None,
            cached_plays: Vec::new(),
            actions: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// Start from a caller-supplied placement instead of the standard one.
    /// Collaborators hand the engine its starting token placement once; this
    /// is that seam, and it also serves scripted scenarios.
    pub fn with_state(config: GameConfig, state: GameState) -> Result<Self, RulesError> {
        if state.players.len() != config.players as usize {
            return Err(RulesError::PlayerCount(config.players));
        }
        Ok(Self {
            config,
            state,
            phase: TurnPhase::Idle,
            current_card: None,
            cached_plays: Vec::new(),
            actions: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// Mutable access to the board, for placement before play begins.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn subscribe(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[inline]
    pub fn active_seat(&self) -> Seat {
        self.state.active
    }

    #[inline]
    pub fn current_card(&self) -> Option<Card> {
        self.current_card
    }

    /// The recorded action log so far.
    #[inline]
    pub fn actions(&self) -> &[TurnAction] {
        &self.actions
    }

    /// Legal plays for the active player and the drawn card. Stable between
    /// mutations; the slice is recomputed only by `draw_card`.
    #[inline]
    pub fn legal_plays(&self) -> &[Play] {
        &self.cached_plays
    }

    /// Draw the active player's next card. Applies draw-time global effects
    /// (the forcing rank marks every ring token, all players), repairs any
    /// inconsistent token flags, and computes the legal-play set.
    pub fn draw_card(&mut self) -> Result<Card, RulesError> {
        self.expect_phase(TurnPhase::Idle)?;
        self.state.turn += 1;
        let seat = self.state.active;
        let card = self.state.player_mut(seat).deck.draw();
        tracing::debug!(turn = self.state.turn, seat = seat.index(), ?card, "drew card");

        if card.forces_shortcut_exit() {
            for player in &mut self.state.players {
                for token in &mut player.tokens {
                    if matches!(token.phase, TokenPhase::OnShortcut { .. }) {
                        token.must_leave_shortcut = true;
                    }
                }
            }
        }

        self.state.repair_flags();
        self.cached_plays = legal_plays(&self.state, seat, card);
        self.current_card = Some(card);
        self.phase = TurnPhase::Play;

        let legal = self.cached_plays.len();
        for obs in &mut self.observers {
            obs.on_card_drawn(seat, card, legal);
        }
        Ok(card)
    }

    /// Apply a selected play. The selection must be one of the plays
    /// returned by `legal_plays`; anything else is rejected with the state
    /// unchanged.
    pub fn apply_play(&mut self, play: &Play) -> Result<MoveOutcome, RulesError> {
        self.expect_phase(TurnPhase::Play)?;
        if !self.cached_plays.contains(play) {
            return Err(RulesError::IllegalMove);
        }
        let seat = self.state.active;
        let card = self.current_card.take().expect("card present in Play phase");

        // A move touches the ring when any leg takes a ring branch or moves
        // a token that was traversing it.
        let touched_ring = play.touches_ring()
            || play
                .legs()
                .iter()
                .any(|m| self.state.player(m.seat).tokens[m.token as usize].is_on_shortcut());

        let outcome = apply_play(&mut self.state, play);
        self.state.player_mut(seat).deck.discard(card);
        self.actions.push(TurnAction::Play(*play));

        if !touched_ring {
            self.decay_shortcut_status(seat);
        }

        for obs in &mut self.observers {
            obs.on_move_applied(seat, play, &outcome);
        }

        if let Some(winner) = outcome.won {
            self.phase = TurnPhase::GameOver;
            self.cached_plays.clear();
            for obs in &mut self.observers {
                obs.on_turn_ended(seat, false);
                obs.on_game_over(winner);
            }
            return Ok(outcome);
        }

        let extra_turn = card.grants_extra_turn();
        self.finish_turn(seat, extra_turn);
        Ok(outcome)
    }

    /// Skip the turn: required when no play is legal, and the cancellation
    /// hook for outer layers (timeouts). Never grants an extra turn.
    pub fn skip_turn(&mut self) -> Result<(), RulesError> {
        self.expect_phase(TurnPhase::Play)?;
        let seat = self.state.active;
        let card = self.current_card.take().expect("card present in Play phase");
        self.state.player_mut(seat).deck.discard(card);
        self.actions.push(TurnAction::Skip);

        // No move was applied, so nothing touched the ring this turn.
        self.decay_shortcut_status(seat);
        self.finish_turn(seat, false);
        Ok(())
    }

    /// Tokens already on the shortcut fall back to plain perimeter status
    /// when their owner's turn ends without touching the ring.
    fn decay_shortcut_status(&mut self, seat: Seat) {
        for token in &mut self.state.player_mut(seat).tokens {
            if let TokenPhase::OnShortcut { corner } = token.phase {
                tracing::debug!(
                    seat = seat.index(),
                    corner,
                    "shortcut not advanced this turn; token reverts to perimeter"
                );
                token.phase = TokenPhase::OnWalk { hole: corner };
                token.must_leave_shortcut = false;
            }
        }
    }

    fn finish_turn(&mut self, seat: Seat, extra_turn: bool) {
        self.cached_plays.clear();
        self.phase = TurnPhase::Idle;
        if !extra_turn {
            self.state.active = seat.next(self.state.player_count());
        }
        for obs in &mut self.observers {
            obs.on_turn_ended(seat, extra_turn);
        }
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), RulesError> {
        if self.phase == TurnPhase::GameOver {
            return Err(RulesError::GameOver);
        }
        if self.phase != expected {
            return Err(RulesError::NotInPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("active", &self.state.active)
            .field("turn", &self.state.turn)
            .field("observers", &self.observers.len())
            .finish()
    }
}
