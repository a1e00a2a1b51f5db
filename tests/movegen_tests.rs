use ringrace::{
    legal_plays, Card, GameConfig, GameState, HoleId, Move, MoveFlavor, Play, Rank, Seat,
    TokenPhase,
};

// Board layout used throughout: homes at walk 6/18/30/42, stretch entrances
// at 5/17/29/41, ring corners at 11/23/35/47. Seat 0 exits the ring at 47.

fn state2(seed: u64) -> GameState {
    GameState::new(GameConfig::new(2, seed)).expect("two players is a valid count")
}

fn seat(i: u8) -> Seat {
    Seat::new(i).expect("seat index within range")
}

fn place(state: &mut GameState, s: u8, token: usize, phase: TokenPhase) {
    state.players[s as usize].tokens[token].phase = phase;
}

fn singles(plays: &[Play]) -> Vec<Move> {
    plays
        .iter()
        .filter_map(|p| match p {
            Play::Single(m) => Some(*m),
            Play::Split { .. } => None,
        })
        .collect()
}

fn flavors_of(plays: &[Play]) -> Vec<MoveFlavor> {
    singles(plays).iter().map(|m| m.flavor).collect()
}

#[test]
fn plain_step_from_home() {
    let state = state2(1);
    // Seat 0 starts with token 0 on its Home hole; the rest are in holding
    // and a Three cannot bring them out.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "only the board token can move: {plays:?}");
    assert_eq!(moves[0].token, 0);
    assert_eq!(moves[0].dest, HoleId::Walk(9));
    assert_eq!(moves[0].flavor, MoveFlavor::Step);
}

#[test]
fn legal_plays_are_deterministic() {
    let state = state2(99);
    let a = legal_plays(&state, seat(0), Card::new(Rank::Seven));
    let b = legal_plays(&state, seat(0), Card::new(Rank::Seven));
    assert_eq!(a, b);
}

#[test]
fn own_token_blocks_passage_and_landing() {
    let mut state = state2(2);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 8 });
    place(&mut state, 0, 1, TokenPhase::OnWalk { hole: 10 });

    // Passage: token 0 would pass its sibling on 10 mid-leg.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(
        singles(&plays).iter().all(|m| m.token != 0),
        "blocked token still produced moves: {plays:?}"
    );

    // Landing: a Two from 8 lands exactly on the sibling.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Two));
    assert!(
        singles(&plays)
            .iter()
            .all(|m| !(m.token == 0 && m.dest == HoleId::Walk(10))),
        "landing on an own token was offered: {plays:?}"
    );
}

#[test]
fn opposing_token_blocks_landing_only_without_capacity() {
    let mut state = state2(3);
    // Seat 1's token 0 sits in seat 0's path; its holding is untouched so a
    // capture is receivable and the landing stays legal.
    place(&mut state, 1, 0, TokenPhase::OnWalk { hole: 9 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(
        singles(&plays)
            .iter()
            .any(|m| m.dest == HoleId::Walk(9) && m.flavor == MoveFlavor::Step),
        "capturable landing missing: {plays:?}"
    );

    // Occupy seat 1's Home from outside. With all four holding slots full and
    // the Home fallback blocked, seat 1 cannot receive a capture, so the
    // landing disappears. Passage over hole 9 is still free.
    place(&mut state, 0, 1, TokenPhase::OnWalk { hole: 18 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(
        singles(&plays).iter().all(|m| m.dest != HoleId::Walk(9)),
        "uncapturable landing offered: {plays:?}"
    );
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Five));
    assert!(
        singles(&plays)
            .iter()
            .any(|m| m.token == 0 && m.dest == HoleId::Walk(11)),
        "opposing token blocked passage: {plays:?}"
    );
}

#[test]
fn holding_entry_needs_entry_rank_and_free_home() {
    let mut state = state2(4);
    // Home occupied by the own starter: no entry even with a King.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::King));
    assert!(flavors_of(&plays)
        .iter()
        .all(|f| *f != MoveFlavor::EnterFromHolding));

    // Clear the Home hole; the King now brings out exactly one token, the
    // lowest-indexed holding one.
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 20 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::King));
    let entries: Vec<Move> = singles(&plays)
        .into_iter()
        .filter(|m| m.flavor == MoveFlavor::EnterFromHolding)
        .collect();
    assert_eq!(entries.len(), 1, "holding tokens are interchangeable: {plays:?}");
    assert_eq!(entries[0].token, 1);
    assert_eq!(entries[0].dest, HoleId::Walk(6));
    assert_eq!(entries[0].steps, 0);

    // A rank without the entry power brings out nothing.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(flavors_of(&plays)
        .iter()
        .all(|f| *f != MoveFlavor::EnterFromHolding));
}

#[test]
fn eligible_token_diverts_into_stretch() {
    let mut state = state2(5);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 3 });
    state.players[0].tokens[0].eligible_for_stretch = true;

    // Three hops: 4, 5 (entrance), then the divert into slot 0.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "{plays:?}");
    assert_eq!(moves[0].dest, HoleId::Stretch { seat: seat(0), slot: 0 });
    assert_eq!(moves[0].flavor, MoveFlavor::EnterStretch);

    // Six hops reach slot 3, the last stretch hole.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Six));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "{plays:?}");
    assert_eq!(moves[0].dest, HoleId::Stretch { seat: seat(0), slot: 3 });

    // Eight hops overrun the stretch: the leg is a dead end.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Eight));
    assert!(plays.is_empty(), "overrunning leg produced moves: {plays:?}");
}

#[test]
fn ineligible_token_passes_the_entrance() {
    let mut state = state2(6);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 3 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "{plays:?}");
    // Straight past the entrance onto the Home hole, a plain landing when
    // the stretch is not full.
    assert_eq!(moves[0].dest, HoleId::Walk(6));
    assert_eq!(moves[0].flavor, MoveFlavor::Step);
}

#[test]
fn full_stretch_routes_the_last_token_home() {
    let mut state = state2(7);
    for (token, slot) in (1..=4).zip(0..4) {
        place(&mut state, 0, token, TokenPhase::InStretch { slot });
        state.players[0].tokens[token].locked_to_stretch = true;
        state.players[0].tokens[token].eligible_for_stretch = true;
    }
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 3 });
    state.players[0].tokens[0].eligible_for_stretch = true;

    // The full stretch disables the divert, so the entrance's successor is
    // Home and the exact landing is the winning one.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "{plays:?}");
    assert_eq!(moves[0].dest, HoleId::Walk(6));
    assert_eq!(moves[0].flavor, MoveFlavor::HomeFinish);

    // Overshooting Home is not a win and the filter pins eligible tokens to
    // the stretch or Home, so a Five forward has nothing.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Five));
    assert!(plays.is_empty(), "overshoot past Home offered: {plays:?}");
}

#[test]
fn exact_foreign_corner_offers_ring_entry() {
    let mut state = state2(8);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 8 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(11) && m.flavor == MoveFlavor::Step),
        "plain corner landing missing: {plays:?}"
    );
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(11) && m.flavor == MoveFlavor::EnterShortcut),
        "ring branch missing: {plays:?}"
    );
}

#[test]
fn own_exit_corner_never_offers_ring_entry() {
    let mut state = state2(9);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 44 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "{plays:?}");
    assert_eq!(moves[0].dest, HoleId::Walk(47));
    assert_eq!(moves[0].flavor, MoveFlavor::Step);
}

#[test]
fn bullseye_entry_through_penultimate_corner() {
    let mut state = state2(10);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 9 });
    // Three hops 10, 11, 12: the next-to-last hop crosses a foreign corner.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Center && m.flavor == MoveFlavor::EnterCenterPenultimate),
        "penultimate bullseye entry missing: {plays:?}"
    );
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(12) && m.flavor == MoveFlavor::Step),
        "plain landing missing next to the offer: {plays:?}"
    );
}

#[test]
fn bullseye_entry_direct_from_corner_with_one_step() {
    let mut state = state2(11);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 11 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Ace));
    assert!(
        singles(&plays)
            .iter()
            .any(|m| m.dest == HoleId::Center && m.flavor == MoveFlavor::EnterCenterDirect),
        "direct bullseye entry missing: {plays:?}"
    );

    // One visit per life: after leaving the bullseye once, the offer is gone.
    state.players[0].tokens[0].has_left_center = true;
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Ace));
    assert!(
        singles(&plays).iter().all(|m| m.dest != HoleId::Center),
        "second bullseye visit offered: {plays:?}"
    );
}

#[test]
fn bullseye_is_shared_across_players_but_not_within_one() {
    let mut state = state2(20);
    place(&mut state, 1, 0, TokenPhase::InCenter);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 9 });

    // An opposing token inside never blocks entry, and entering is not a
    // capture.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(
        singles(&plays)
            .iter()
            .any(|m| m.flavor == MoveFlavor::EnterCenterPenultimate),
        "opposing bullseye tenant blocked entry: {plays:?}"
    );

    // An own token inside does block, as own tokens always do.
    place(&mut state, 0, 1, TokenPhase::InCenter);
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(
        singles(&plays).iter().all(|m| m.dest != HoleId::Center),
        "own bullseye tenant did not block entry: {plays:?}"
    );
}

#[test]
fn bullseye_exit_targets_own_exit_corner() {
    let mut state = state2(12);
    place(&mut state, 0, 0, TokenPhase::InCenter);
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Ace));
    let exits: Vec<Move> = singles(&plays)
        .into_iter()
        .filter(|m| m.flavor == MoveFlavor::ExitCenter)
        .collect();
    assert_eq!(exits.len(), 1, "{plays:?}");
    assert_eq!(exits[0].dest, HoleId::Walk(47));

    // An own token on the exit corner pushes the exit one corner back.
    place(&mut state, 0, 1, TokenPhase::OnWalk { hole: 47 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Ace));
    let exits: Vec<Move> = singles(&plays)
        .into_iter()
        .filter(|m| m.flavor == MoveFlavor::ExitCenter)
        .collect();
    assert_eq!(exits.len(), 1, "{plays:?}");
    assert_eq!(exits[0].dest, HoleId::Walk(35));

    // Only the 1-step rank leaves the bullseye.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(
        singles(&plays).iter().all(|m| m.token != 0),
        "bullseye token moved on a non-exit rank: {plays:?}"
    );
}

fn on_ring(state: &mut GameState, s: u8, token: usize, corner: u8) {
    place(state, s, token, TokenPhase::OnShortcut { corner });
    state.players[s as usize].tokens[token].eligible_for_stretch = true;
}

#[test]
fn ring_advance_and_traversal() {
    let mut state = state2(13);
    on_ring(&mut state, 0, 0, 11);

    // Two of three corner hops toward the own exit at 47.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Two));
    let moves = singles(&plays);
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(35) && m.flavor == MoveFlavor::RingAdvance),
        "ring advance missing: {plays:?}"
    );
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(13) && m.flavor == MoveFlavor::RingExitVoluntary),
        "voluntary exit missing: {plays:?}"
    );

    // The exact count completes the traversal and nothing else stays pure.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(47) && m.flavor == MoveFlavor::RingExitTraversal),
        "traversal exit missing: {plays:?}"
    );
    assert!(moves.iter().all(|m| m.flavor != MoveFlavor::RingAdvance));
}

#[test]
fn oversized_count_forces_a_split_exit() {
    let mut state = state2(14);
    on_ring(&mut state, 0, 0, 11);
    // Five on a three-hop ring distance: three corner hops to 47, two
    // perimeter hops beyond.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Five));
    let moves = singles(&plays);
    assert!(
        moves.iter().any(|m| m.dest == HoleId::Walk(1)
            && m.flavor == MoveFlavor::RingExitSplit { ring_hops: 3 }),
        "forced split exit missing: {plays:?}"
    );
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(16) && m.flavor == MoveFlavor::RingExitVoluntary),
        "voluntary exit missing: {plays:?}"
    );
}

#[test]
fn own_token_on_a_corner_caps_the_split() {
    let mut state = state2(15);
    on_ring(&mut state, 0, 0, 11);
    place(&mut state, 0, 1, TokenPhase::OnWalk { hole: 35 });
    // The sibling on corner 35 stops the hop scan after one corner; a Three
    // splits there instead of traversing.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    let moves = singles(&plays);
    assert!(moves
        .iter()
        .all(|m| m.flavor != MoveFlavor::RingExitTraversal && m.flavor != MoveFlavor::RingAdvance));
    assert!(
        moves.iter().any(|m| m.token == 0
            && m.dest == HoleId::Walk(25)
            && m.flavor == MoveFlavor::RingExitSplit { ring_hops: 1 }),
        "capped split missing: {plays:?}"
    );
}

#[test]
fn must_leave_flag_forbids_staying_on_the_ring() {
    let mut state = state2(16);
    on_ring(&mut state, 0, 0, 11);
    state.players[0].tokens[0].must_leave_shortcut = true;

    let plays = legal_plays(&state, seat(0), Card::new(Rank::Two));
    let moves = singles(&plays);
    assert!(
        moves.iter().all(|m| m.flavor != MoveFlavor::RingAdvance),
        "marked token may not stay on the ring: {plays:?}"
    );
    assert!(
        moves
            .iter()
            .any(|m| m.flavor == MoveFlavor::RingExitVoluntary),
        "an exit must remain available: {plays:?}"
    );

    // Completing the traversal is itself an exit and stays legal.
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Three));
    assert!(singles(&plays)
        .iter()
        .any(|m| m.flavor == MoveFlavor::RingExitTraversal));
}

#[test]
fn backward_rank_and_conditional_backstep() {
    let mut state = state2(17);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 10 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Four));
    let moves = singles(&plays);
    assert_eq!(moves.len(), 1, "{plays:?}");
    assert_eq!(moves[0].dest, HoleId::Walk(6));
    assert_eq!(moves[0].flavor, MoveFlavor::BackStep);

    // The either-direction Ten: forward ten, or one back onto an opposing
    // token sitting directly behind.
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 9 });
    place(&mut state, 1, 0, TokenPhase::OnWalk { hole: 8 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Ten));
    let moves = singles(&plays);
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(19) && m.flavor == MoveFlavor::Step),
        "forward ten missing: {plays:?}"
    );
    assert!(
        moves
            .iter()
            .any(|m| m.dest == HoleId::Walk(8) && m.flavor == MoveFlavor::BackStep && m.steps == 1),
        "conditional backstep missing: {plays:?}"
    );

    // No opposing token behind: forward only.
    place(&mut state, 1, 0, TokenPhase::OnWalk { hole: 30 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Ten));
    assert!(singles(&plays)
        .iter()
        .all(|m| m.flavor != MoveFlavor::BackStep));
}

#[test]
fn split_rank_pairs_two_tokens() {
    let mut state = state2(18);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 0 });
    place(&mut state, 0, 1, TokenPhase::OnWalk { hole: 26 });
    let plays = legal_plays(&state, seat(0), Card::new(Rank::Seven));

    let splits: Vec<(Move, Move)> = plays
        .iter()
        .filter_map(|p| match p {
            Play::Split { first, second } => Some((*first, *second)),
            Play::Single(_) => None,
        })
        .collect();
    assert!(!splits.is_empty(), "no split pairs offered: {plays:?}");
    for (first, second) in &splits {
        assert_ne!(first.token, second.token, "split reused a token");
        assert_ne!(first.dest, second.dest, "split legs share a landing");
        assert_eq!(first.steps + second.steps, 7, "split legs must sum to the count");
    }
    // Whole-count singles are offered next to the pairs.
    assert!(singles(&plays).iter().any(|m| m.steps == 7));
}

#[test]
fn split_pairs_avoid_the_partner_legs_capture_relocation() {
    let mut state = state2(19);
    place(&mut state, 0, 0, TokenPhase::OnWalk { hole: 12 });
    place(&mut state, 0, 1, TokenPhase::OnWalk { hole: 14 });
    place(&mut state, 0, 2, TokenPhase::OnWalk { hole: 40 });
    // Seat 1's starter is capturable on 15 and its holding is full, so a
    // capture there sends it to its Home on 18. The 3/4 decomposition over
    // tokens 0 and 1 would land the partner leg on exactly that hole.
    place(&mut state, 1, 0, TokenPhase::OnWalk { hole: 15 });

    let plays = legal_plays(&state, seat(0), Card::new(Rank::Seven));
    for play in &plays {
        if let Play::Split { first, second } = play {
            let dests = [first.dest, second.dest];
            assert!(
                !(dests.contains(&HoleId::Walk(15)) && dests.contains(&HoleId::Walk(18))),
                "pair collides with the capture relocation: {play:?}"
            );
        }
    }
    // The capture itself stays available in decompositions whose partner leg
    // lands elsewhere.
    assert!(
        plays.iter().any(|p| match p {
            Play::Split { first, second } =>
                first.dest == HoleId::Walk(15) || second.dest == HoleId::Walk(15),
            Play::Single(_) => false,
        }),
        "capturing split legs disappeared entirely: {plays:?}"
    );
}
