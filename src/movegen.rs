use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::state::GameState;
use crate::token::TokenPhase;
use crate::types::{Direction, HoleId, HoleKind, Seat, STRETCH_SLOTS, TOKENS_PER_PLAYER};

/// Which branch of the rules a generated move represents. Consumers
/// (UI, commentary) key their annotations off this; `apply` keys the state
/// transition off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveFlavor {
    /// Plain forward landing on the walk.
    Step,
    /// Backward landing on the walk.
    BackStep,
    /// Holding -> own Home.
    EnterFromHolding,
    /// Exact landing on a foreign ring corner, taking the ring branch.
    EnterShortcut,
    /// Corner-to-corner hop(s) staying on the ring.
    RingAdvance,
    /// Ring exit using the whole count as perimeter hops from the current
    /// corner.
    RingExitVoluntary,
    /// Forced exit: `ring_hops` corner hops, remainder on the perimeter.
    RingExitSplit { ring_hops: u8 },
    /// Exact landing on the own exit corner after a full traversal; locks
    /// the token to the stretch.
    RingExitTraversal,
    /// Bullseye entry through a penultimate foreign corner.
    EnterCenterPenultimate,
    /// Bullseye entry with a 1-step card from a foreign corner.
    EnterCenterDirect,
    /// Bullseye exit to a ring corner.
    ExitCenter,
    /// Forward landing inside the own protected stretch.
    EnterStretch,
    /// Advance between stretch holes.
    StretchAdvance,
    /// Exact Home landing with a full stretch: wins the game.
    HomeFinish,
}

impl MoveFlavor {
    /// Whether applying a move of this flavor counts as touching the ring
    /// for the end-of-turn shortcut-decay rule.
    #[inline]
    pub fn touches_ring(self) -> bool {
        matches!(
            self,
            MoveFlavor::EnterShortcut
                | MoveFlavor::RingAdvance
                | MoveFlavor::RingExitVoluntary
                | MoveFlavor::RingExitSplit { .. }
                | MoveFlavor::RingExitTraversal
        )
    }
}

/// One legal single-leg destination for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub seat: Seat,
    pub token: u8,
    pub from: HoleId,
    pub dest: HoleId,
    /// Hops consumed by this leg (0 for holding entry).
    pub steps: u8,
    pub flavor: MoveFlavor,
}

/// A selectable play: either a single move or a split card's two legs over
/// two different tokens, applied first-then-second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Play {
    Single(Move),
    Split { first: Move, second: Move },
}

impl Play {
    pub fn legs(&self) -> Vec<Move> {
        match self {
            Play::Single(m) => vec![*m],
            Play::Split { first, second } => vec![*first, *second],
        }
    }

    pub fn touches_ring(&self) -> bool {
        self.legs().iter().any(|m| m.flavor.touches_ring())
    }
}

/// Enumerate every play the seat may legally select for the drawn card.
/// Deterministic: token index ascending, branch families in fixed order,
/// split pairs after singles. Calling twice without an intervening mutation
/// yields identical results.
pub fn legal_plays(state: &GameState, seat: Seat, card: Card) -> Vec<Play> {
    let mut plays: Vec<Play> = Vec::new();

    for token in 0..TOKENS_PER_PLAYER {
        for mv in single_moves(state, seat, token, card) {
            plays.push(Play::Single(mv));
        }
    }

    if card.is_split() {
        enumerate_splits(state, seat, card, &mut plays);
    }

    plays
}

/// All single-leg moves of one token for the card.
fn single_moves(state: &GameState, seat: Seat, token: u8, card: Card) -> Vec<Move> {
    let tok = state.player(seat).tokens[token as usize];
    let mut out = Vec::new();

    match tok.phase {
        TokenPhase::Holding { .. } => {
            // Holding tokens are interchangeable; emit for the lowest index
            // only to keep the play list free of duplicates.
            if card.can_enter_from_holding()
                && state.player(seat).first_holding_token() == Some(token)
            {
                holding_entry(state, seat, token, &mut out);
            }
        }
        TokenPhase::OnWalk { hole } => match card.direction() {
            Direction::Forward => {
                forward_walk_moves(
                    state,
                    seat,
                    token,
                    hole,
                    card.steps(),
                    WalkLegOptions {
                        offers: true,
                        direct_center: card.steps() == 1,
                        apply_stretch_filter: true,
                    },
                    &mut out,
                );
                if card.has_conditional_backstep() {
                    conditional_backstep(state, seat, token, hole, &mut out);
                }
            }
            Direction::Backward => backward_walk_moves(state, seat, token, hole, card.steps(), &mut out),
        },
        TokenPhase::OnShortcut { corner } => {
            if card.direction() == Direction::Forward {
                ring_moves(state, seat, token, corner, card.steps(), tok.must_leave_shortcut, &mut out);
            }
        }
        TokenPhase::InCenter => {
            if card.can_exit_center() {
                center_exit(state, seat, token, &mut out);
            }
        }
        TokenPhase::InStretch { slot } => {
            if card.direction() == Direction::Forward {
                stretch_advance(state, seat, token, slot, card.steps(), &mut out);
            }
        }
        TokenPhase::Completed => {}
    }

    out
}

struct WalkLegOptions {
    /// Offer the enter-shortcut and center branches along the leg.
    offers: bool,
    /// Permit the direct 1-step bullseye entry (full 1-step cards only).
    direct_center: bool,
    /// Apply the stretch-routing destination filter for eligible tokens.
    apply_stretch_filter: bool,
}

/// Does the seat have one of its own tokens on the given hole?
/// Own tokens block both passage and landing; opposing tokens never block
/// passage.
fn own_occupies(state: &GameState, seat: Seat, hole: HoleId) -> bool {
    match hole {
        HoleId::Walk(w) => matches!(state.occupant_of_walk(w), Some((s, _)) if s == seat),
        HoleId::Stretch { seat: owner, slot } => {
            owner == seat && state.player(seat).token_in_stretch(slot).is_some()
        }
        HoleId::Center => state.center_occupied_by(seat),
        HoleId::Holding { .. } => false,
    }
}

/// Whether landing on `dest` is allowed with respect to opposing occupancy:
/// empty is fine; an opposing token is fine only if its owner can receive
/// the capture.
fn landing_allowed(state: &GameState, seat: Seat, dest: HoleId) -> bool {
    if own_occupies(state, seat, dest) {
        return false;
    }
    match dest {
        HoleId::Walk(w) => match state.occupant_of_walk(w) {
            Some((owner, _)) if owner != seat => state.can_receive_capture(owner),
            _ => true,
        },
        // Stretch holes are owner-exclusive; Center is capture-safe and
        // shared; Holding is never a landing target.
        _ => true,
    }
}

fn holding_entry(state: &GameState, seat: Seat, token: u8, out: &mut Vec<Move>) {
    let home = state.graph.home_of(seat);
    let dest = HoleId::Walk(home);
    if landing_allowed(state, seat, dest) {
        out.push(Move {
            seat,
            token,
            from: state.player(seat).hole_of(token).expect("holding token has a hole"),
            dest,
            steps: 0,
            flavor: MoveFlavor::EnterFromHolding,
        });
    }
}

/// Walk `n` forward hops from `start`, diverting into the own stretch at the
/// entrance when the token is eligible and the stretch has room. Emits the
/// normal landing plus the branch offers that apply at the final hop.
fn forward_walk_moves(
    state: &GameState,
    seat: Seat,
    token: u8,
    start: u8,
    n: u8,
    opts: WalkLegOptions,
    out: &mut Vec<Move>,
) {
    let graph = &state.graph;
    let player = state.player(seat);
    let tok = player.tokens[token as usize];
    let eligible = tok.eligible_for_stretch;
    let entrance = graph.stretch_entrance_of(seat);
    let stretch_full = player.stretch_full();
    let from = HoleId::Walk(start);

    // Build the hop path; a dead end (stretch overrun) yields no moves.
    let mut path: Vec<HoleId> = Vec::with_capacity(n as usize);
    let mut cur = from;
    for _ in 0..n {
        let next = match cur {
            HoleId::Walk(w) => {
                if w == entrance && eligible && !stretch_full {
                    HoleId::Stretch { seat, slot: 0 }
                } else {
                    HoleId::Walk(graph.walk_next(w))
                }
            }
            HoleId::Stretch { slot, .. } if slot + 1 < STRETCH_SLOTS => {
                HoleId::Stretch { seat, slot: slot + 1 }
            }
            _ => return,
        };
        path.push(next);
        cur = next;
    }

    // Own tokens short-circuit the walk: any own occupant strictly before
    // the final hop kills every destination of this leg.
    if path[..path.len() - 1]
        .iter()
        .any(|&h| own_occupies(state, seat, h))
    {
        return;
    }

    let dest = *path.last().expect("path has n >= 1 hops");

    // Normal landing.
    if landing_allowed(state, seat, dest) {
        if let Some(flavor) = classify_forward_landing(state, seat, dest, stretch_full) {
            if !opts.apply_stretch_filter
                || stretch_filter_allows(state, seat, eligible, stretch_full, dest)
            {
                match flavor {
                    MoveFlavor::Step if opts.offers => {
                        // Exact landing on a foreign corner offers the ring
                        // branch next to the plain landing.
                        push_move(out, seat, token, from, dest, n, MoveFlavor::Step);
                        if let HoleId::Walk(w) = dest {
                            if is_foreign_corner(state, seat, w) {
                                push_move(out, seat, token, from, dest, n, MoveFlavor::EnterShortcut);
                            }
                        }
                    }
                    _ => push_move(out, seat, token, from, dest, n, flavor),
                }
            }
        }
    }

    // Bullseye offers. Never for eligible tokens (the stretch filter pins
    // their destinations), never after a bullseye visit, never through the
    // own exit corner, never when an own token already sits inside.
    if opts.offers
        && !tok.has_left_center
        && !(opts.apply_stretch_filter && eligible)
        && !state.center_occupied_by(seat)
    {
        let center_corner = if n == 1 && opts.direct_center {
            is_foreign_corner_hole(state, seat, from).then_some(MoveFlavor::EnterCenterDirect)
        } else if n >= 2 {
            let penultimate = path[n as usize - 2];
            is_foreign_corner_hole(state, seat, penultimate)
                .then_some(MoveFlavor::EnterCenterPenultimate)
        } else {
            None
        };
        if let Some(flavor) = center_corner {
            push_move(out, seat, token, from, HoleId::Center, n, flavor);
        }
    }
}

fn push_move(
    out: &mut Vec<Move>,
    seat: Seat,
    token: u8,
    from: HoleId,
    dest: HoleId,
    steps: u8,
    flavor: MoveFlavor,
) {
    out.push(Move {
        seat,
        token,
        from,
        dest,
        steps,
        flavor,
    });
}

fn is_foreign_corner(state: &GameState, seat: Seat, walk_idx: u8) -> bool {
    state.graph.is_corner(walk_idx) && walk_idx != state.graph.exit_corner_of(seat)
}

fn is_foreign_corner_hole(state: &GameState, seat: Seat, hole: HoleId) -> bool {
    matches!(hole, HoleId::Walk(w) if is_foreign_corner(state, seat, w))
}

/// Flavor of a forward landing, or None when the destination is not a legal
/// endpoint at all (own Home without a full stretch is still a plain hole,
/// so that stays a Step).
fn classify_forward_landing(
    state: &GameState,
    seat: Seat,
    dest: HoleId,
    stretch_full: bool,
) -> Option<MoveFlavor> {
    match dest {
        HoleId::Stretch { .. } => Some(MoveFlavor::EnterStretch),
        HoleId::Walk(w) => {
            if w == state.graph.home_of(seat) && stretch_full {
                Some(MoveFlavor::HomeFinish)
            } else {
                Some(MoveFlavor::Step)
            }
        }
        _ => None,
    }
}

/// Once a token is stretch-eligible, its forward destinations narrow to the
/// protected stretch (or Home when the stretch is full). Backward moves are
/// exempt and re-arm the entrance for a later pass.
fn stretch_filter_allows(
    state: &GameState,
    seat: Seat,
    eligible: bool,
    stretch_full: bool,
    dest: HoleId,
) -> bool {
    if !eligible {
        return true;
    }
    match dest {
        HoleId::Stretch { .. } => true,
        HoleId::Walk(w) => stretch_full && w == state.graph.home_of(seat),
        _ => false,
    }
}

fn backward_walk_moves(
    state: &GameState,
    seat: Seat,
    token: u8,
    start: u8,
    n: u8,
    out: &mut Vec<Move>,
) {
    let graph = &state.graph;
    let from = HoleId::Walk(start);
    let mut cur = start;
    // Backward movement never leaves the walk: no center, no stretch.
    for i in 1..=n {
        cur = graph.walk_prev(cur);
        let hole = HoleId::Walk(cur);
        if i < n && own_occupies(state, seat, hole) {
            return;
        }
    }
    let dest = HoleId::Walk(cur);
    if landing_allowed(state, seat, dest) {
        push_move(out, seat, token, from, dest, n, MoveFlavor::BackStep);
    }
}

/// The either-direction card's backward alternative: one hole back, only
/// when an opposing token sits there, and only from plain perimeter holes.
fn conditional_backstep(state: &GameState, seat: Seat, token: u8, start: u8, out: &mut Vec<Move>) {
    let graph = &state.graph;
    if graph.kind(HoleId::Walk(start)) != HoleKind::Perimeter {
        return;
    }
    let behind = graph.walk_prev(start);
    match state.occupant_of_walk(behind) {
        Some((owner, _)) if owner != seat && state.can_receive_capture(owner) => {
            push_move(
                out,
                seat,
                token,
                HoleId::Walk(start),
                HoleId::Walk(behind),
                1,
                MoveFlavor::BackStep,
            );
        }
        _ => {}
    }
}

/// Moves for a token actively traversing the ring: continue hopping,
/// complete the traversal at the own exit corner, or exit to the perimeter
/// (voluntarily with the whole count, or force-split when the pure ring
/// continuation is impossible).
fn ring_moves(
    state: &GameState,
    seat: Seat,
    token: u8,
    corner: u8,
    n: u8,
    must_leave: bool,
    out: &mut Vec<Move>,
) {
    let graph = &state.graph;
    let from = HoleId::Walk(corner);
    let oc = graph.exit_corner_of(seat);
    // Entry at the own corner is impossible, so distance is 1..=3 and a
    // landing there is always a completed traversal.
    let d = graph.ring_distance(corner, oc);

    // Furthest corner reachable without passing an own token; the walk never
    // extends past the own exit corner.
    let mut free_hops = 0u8;
    let mut c = corner;
    let mut landing = corner;
    for k in 1..=n.min(d) {
        c = graph.ring_next(c);
        if own_occupies(state, seat, HoleId::Walk(c)) {
            break;
        }
        free_hops = k;
        landing = c;
    }

    let pure_possible = free_hops == n && n <= d;
    if pure_possible {
        let dest = HoleId::Walk(landing);
        if landing_allowed(state, seat, dest) {
            if n == d {
                out.push(Move {
                    seat,
                    token,
                    from,
                    dest,
                    steps: n,
                    flavor: MoveFlavor::RingExitTraversal,
                });
            } else if !must_leave {
                out.push(Move {
                    seat,
                    token,
                    from,
                    dest,
                    steps: n,
                    flavor: MoveFlavor::RingAdvance,
                });
            }
        }
    } else {
        // Forced split: furthest reachable corner, remainder on the
        // perimeter. No fallback to nearer corners.
        let ring_hops = free_hops.min(n - 1);
        if ring_hops >= 1 {
            let mut exit_corner = corner;
            for _ in 0..ring_hops {
                exit_corner = graph.ring_next(exit_corner);
            }
            let mut leg = Vec::new();
            forward_walk_moves(
                state,
                seat,
                token,
                exit_corner,
                n - ring_hops,
                WalkLegOptions {
                    offers: false,
                    direct_center: false,
                    apply_stretch_filter: false,
                },
                &mut leg,
            );
            // The perimeter remainder has exactly one plain landing.
            if let Some(m) = leg.into_iter().next() {
                out.push(Move {
                    seat,
                    token,
                    from,
                    dest: m.dest,
                    steps: n,
                    flavor: exit_flavor(m.flavor, MoveFlavor::RingExitSplit { ring_hops }),
                });
            }
        }
    }

    // Voluntary exit is always on offer: the whole count as perimeter hops
    // from the current corner.
    let mut leg = Vec::new();
    forward_walk_moves(
        state,
        seat,
        token,
        corner,
        n,
        WalkLegOptions {
            offers: false,
            direct_center: false,
            apply_stretch_filter: false,
        },
        &mut leg,
    );
    if let Some(m) = leg.into_iter().next() {
        out.push(Move {
            seat,
            token,
            from,
            dest: m.dest,
            steps: n,
            flavor: exit_flavor(m.flavor, MoveFlavor::RingExitVoluntary),
        });
    }
}

/// A ring-exit leg keeps a stretch or winning landing's own flavor; plain
/// walk landings take the exit flavor so the decay rule sees a ring touch.
#[inline]
fn exit_flavor(leg: MoveFlavor, exit: MoveFlavor) -> MoveFlavor {
    match leg {
        MoveFlavor::EnterStretch | MoveFlavor::HomeFinish => leg,
        _ => exit,
    }
}

/// Bullseye exit: to the own exit corner, falling back counter-clockwise
/// past corners held by own tokens.
fn center_exit(state: &GameState, seat: Seat, token: u8, out: &mut Vec<Move>) {
    let graph = &state.graph;
    let mut corner = graph.exit_corner_of(seat);
    let mut found = None;
    for _ in 0..4 {
        if own_occupies(state, seat, HoleId::Walk(corner)) {
            corner = graph.ring_prev(corner);
        } else {
            found = Some(corner);
            break;
        }
    }
    let Some(corner) = found else { return };
    let dest = HoleId::Walk(corner);
    if landing_allowed(state, seat, dest) {
        push_move(out, seat, token, HoleId::Center, dest, 1, MoveFlavor::ExitCenter);
    }
}

/// Forward-only, exact-landing advance within the protected stretch.
fn stretch_advance(state: &GameState, seat: Seat, token: u8, slot: u8, n: u8, out: &mut Vec<Move>) {
    let target = slot + n;
    if target >= STRETCH_SLOTS {
        return;
    }
    for s in (slot + 1)..=target {
        if state.player(seat).token_in_stretch(s).is_some() {
            return;
        }
    }
    push_move(
        out,
        seat,
        token,
        HoleId::Stretch { seat, slot },
        HoleId::Stretch { seat, slot: target },
        n,
        MoveFlavor::StretchAdvance,
    );
}

/// Split-card pairs: legs (a, 7-a) over two distinct tokens, each leg
/// validated independently against the current board. Pairs whose legs land
/// on the same hole, or whose capture relocation would bounce the victim
/// onto the partner leg's landing hole, are excluded; everything else
/// resolves at apply time in first-then-second order.
fn enumerate_splits(state: &GameState, seat: Seat, card: Card, plays: &mut Vec<Play>) {
    let total = card.steps();
    for a in 1..total {
        let b = total - a;
        for t1 in 0..TOKENS_PER_PLAYER {
            for t2 in (t1 + 1)..TOKENS_PER_PLAYER {
                let legs1 = leg_moves(state, seat, t1, a);
                if legs1.is_empty() {
                    continue;
                }
                let legs2 = leg_moves(state, seat, t2, b);
                for m1 in &legs1 {
                    for m2 in &legs2 {
                        if m1.dest != m2.dest
                            && capture_relocation(state, seat, m1.dest) != Some(m2.dest)
                            && capture_relocation(state, seat, m2.dest) != Some(m1.dest)
                        {
                            plays.push(Play::Split {
                                first: *m1,
                                second: *m2,
                            });
                        }
                    }
                }
            }
        }
    }
}

/// Where a capture on `dest` would relocate the victim. Used to keep split
/// legs from landing where the partner leg's victim gets sent.
fn capture_relocation(state: &GameState, seat: Seat, dest: HoleId) -> Option<HoleId> {
    let HoleId::Walk(w) = dest else { return None };
    let (owner, _) = state.occupant_of_walk(w).filter(|(o, _)| *o != seat)?;
    Some(match state.player(owner).free_holding_slot() {
        Some(slot) => HoleId::Holding { seat: owner, slot },
        None => HoleId::Walk(state.graph.home_of(owner)),
    })
}

/// Forward single-leg moves used by split enumeration. Legs carry the full
/// branch semantics except the direct bullseye entry, which needs a whole
/// 1-step card.
fn leg_moves(state: &GameState, seat: Seat, token: u8, steps: u8) -> Vec<Move> {
    let tok = state.player(seat).tokens[token as usize];
    let mut out = Vec::new();
    match tok.phase {
        TokenPhase::OnWalk { hole } => forward_walk_moves(
            state,
            seat,
            token,
            hole,
            steps,
            WalkLegOptions {
                offers: true,
                direct_center: false,
                apply_stretch_filter: true,
            },
            &mut out,
        ),
        TokenPhase::OnShortcut { corner } => {
            ring_moves(state, seat, token, corner, steps, tok.must_leave_shortcut, &mut out);
        }
        TokenPhase::InStretch { slot } => stretch_advance(state, seat, token, slot, steps, &mut out),
        _ => {}
    }
    out
}
