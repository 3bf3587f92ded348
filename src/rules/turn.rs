//! Per-turn runtime flags.
//!
//! Card definitions are shared and immutable, so everything that changes
//! during a turn lives here, keyed by card copy:
//!
//! - which once-per-turn abilities each copy has used
//! - which copies have already fired their ally tiers
//! - the cards each player played this turn
//! - the ally wildcard (aura sources and the turn-scoped grant)

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::cards::AbilityId;
use crate::core::{InstanceId, PlayerId, PlayerMap};

#[derive(Clone, Debug, Default)]
struct SeatLedger {
    used: FxHashSet<(InstanceId, AbilityId)>,
    ally_fired: FxHashSet<InstanceId>,
    played_this_turn: Vec<InstanceId>,
    wildcard_sources: FxHashSet<InstanceId>,
    turn_wildcard: bool,
}

/// Turn-scoped state for both seats.
#[derive(Clone, Debug)]
pub struct TurnLedger {
    seats: PlayerMap<SeatLedger>,
}

impl Default for TurnLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seats: PlayerMap::with_default(),
        }
    }

    /// Reset `owner`'s turn-scoped flags at the start of their turn.
    ///
    /// Usage marks are cleared for every card. Ally flags are cleared for
    /// `bases` (the bases that stay in play); ships left play at the last
    /// turn end and were forgotten then.
    pub fn begin_turn(&mut self, owner: PlayerId, bases: &[InstanceId]) {
        let seat = &mut self.seats[owner];
        seat.used.clear();
        for base in bases {
            seat.ally_fired.remove(base);
        }
        seat.played_this_turn.clear();
        seat.turn_wildcard = false;
        trace!(%owner, "turn ledger reset");
    }

    /// Drop the played-this-turn list and the turn-scoped wildcard.
    pub fn end_turn(&mut self, owner: PlayerId) {
        let seat = &mut self.seats[owner];
        seat.played_this_turn.clear();
        seat.turn_wildcard = false;
    }

    // === Ability usage ===

    #[must_use]
    pub fn is_used(&self, owner: PlayerId, card: InstanceId, ability: &AbilityId) -> bool {
        self.seats[owner].used.contains(&(card, ability.clone()))
    }

    pub fn mark_used(&mut self, owner: PlayerId, card: InstanceId, ability: AbilityId) {
        self.seats[owner].used.insert((card, ability));
    }

    // === Ally flags ===

    #[must_use]
    pub fn has_ally_fired(&self, owner: PlayerId, card: InstanceId) -> bool {
        self.seats[owner].ally_fired.contains(&card)
    }

    pub fn mark_ally_fired(&mut self, owner: PlayerId, card: InstanceId) {
        self.seats[owner].ally_fired.insert(card);
    }

    /// Forget a card that left play.
    pub fn forget_ally(&mut self, owner: PlayerId, card: InstanceId) {
        self.seats[owner].ally_fired.remove(&card);
    }

    // === Played this turn ===

    pub fn record_played(&mut self, owner: PlayerId, card: InstanceId) {
        self.seats[owner].played_this_turn.push(card);
    }

    /// Cards `owner` played this turn, in play order.
    #[must_use]
    pub fn played_this_turn(&self, owner: PlayerId) -> &[InstanceId] {
        &self.seats[owner].played_this_turn
    }

    // === Wildcard ===

    /// Record an in-play aura granting the wildcard. Returns `false` if the
    /// card was already counted.
    pub fn add_wildcard_source(&mut self, owner: PlayerId, card: InstanceId) -> bool {
        self.seats[owner].wildcard_sources.insert(card)
    }

    /// Returns `false` if the card was not a source.
    pub fn remove_wildcard_source(&mut self, owner: PlayerId, card: InstanceId) -> bool {
        self.seats[owner].wildcard_sources.remove(&card)
    }

    /// Number of in-play wildcard auras.
    #[must_use]
    pub fn wildcard_count(&self, owner: PlayerId) -> usize {
        self.seats[owner].wildcard_sources.len()
    }

    /// Grant the wildcard until the end of `owner`'s turn.
    pub fn grant_turn_wildcard(&mut self, owner: PlayerId) {
        self.seats[owner].turn_wildcard = true;
    }

    /// Whether every faction currently counts as matching for `owner`.
    #[must_use]
    pub fn wildcard_active(&self, owner: PlayerId) -> bool {
        let seat = &self.seats[owner];
        seat.turn_wildcard || !seat.wildcard_sources.is_empty()
    }
}
