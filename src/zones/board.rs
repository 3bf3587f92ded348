//! The board interface the rules core drives.
//!
//! The dispatcher and interpreter never store zone contents themselves. They
//! read and mutate the table through [`Board`], which owns decks, hands,
//! discard piles, cards in play, the trade row and the scrap heap.
//! [`super::Table`] is the in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::{InstanceId, PlayerId, TargetError};
use crate::effects::Destination;

/// A player-owned zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    /// Ships played this turn.
    InPlay,
    /// Bases in play; they stay between turns.
    Bases,
}

impl Zone {
    /// All player-owned zones.
    pub const ALL: [Zone; 5] = [Zone::Deck, Zone::Hand, Zone::Discard, Zone::InPlay, Zone::Bases];

    /// Whether cards in this zone count as "in play".
    #[must_use]
    pub const fn is_in_play(self) -> bool {
        matches!(self, Zone::InPlay | Zone::Bases)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Discard => "discard pile",
            Zone::InPlay => "in play",
            Zone::Bases => "bases",
        };
        f.write_str(name)
    }
}

/// Board state consumed by the rules core.
///
/// Index arguments refer to positions in the order returned by
/// [`Board::list_zone`] (or [`Board::trade_row`] for slots). Mutators return
/// `None` when the index is out of range and leave the board unchanged.
pub trait Board {
    /// Look up a card copy by ID, wherever it is.
    fn card(&self, id: InstanceId) -> Option<&CardInstance>;

    /// Cards in one of `player`'s zones, in zone order.
    fn list_zone(&self, player: PlayerId, zone: Zone) -> Vec<InstanceId>;

    /// Add to (or subtract from) the trade pool.
    fn add_trade(&mut self, player: PlayerId, amount: i64);

    /// Add to (or subtract from) the combat pool.
    fn add_combat(&mut self, player: PlayerId, amount: i64);

    /// Add to (or subtract from) authority.
    fn add_authority(&mut self, player: PlayerId, amount: i64);

    /// Draw up to `count` cards, reshuffling the discard pile into an empty
    /// deck. Returns how many were drawn.
    fn draw(&mut self, player: PlayerId, count: u32) -> u32;

    /// Move the card at `hand_index` from hand to discard.
    fn force_discard(&mut self, player: PlayerId, hand_index: usize) -> Option<InstanceId>;

    /// Remove the card at `index` of `zone` from the game into the scrap heap.
    fn scrap(&mut self, player: PlayerId, zone: Zone, index: usize) -> Option<InstanceId>;

    /// Trade row slots; `None` for a slot the trade deck could not refill.
    fn trade_row(&self) -> Vec<Option<InstanceId>>;

    /// Give the card in `slot` to `player` for free, then refill the slot.
    fn acquire_from_trade_row(
        &mut self,
        player: PlayerId,
        slot: usize,
        destination: Destination,
    ) -> Option<InstanceId>;

    /// Move the card in `slot` to the scrap heap, then refill the slot.
    fn destroy_trade_row(&mut self, slot: usize) -> Option<InstanceId>;

    /// Destroy `owner`'s base at `index`; it goes to `owner`'s discard pile.
    fn destroy_enemy_base(&mut self, owner: PlayerId, index: usize) -> Option<InstanceId>;

    /// The next card `player` acquires goes on top of their deck.
    fn set_topdeck_next_purchase(&mut self, player: PlayerId);
}

/// Resolve a pick against `owner`'s bases, enforcing outpost-first.
///
/// While `owner` has any outpost, only outposts may be targeted.
pub fn base_target(board: &dyn Board, owner: PlayerId, index: usize) -> Result<InstanceId, TargetError> {
    let bases = board.list_zone(owner, Zone::Bases);
    let target = *bases.get(index).ok_or(TargetError::NoSuchBase)?;

    let is_outpost = |id| board.card(id).is_some_and(CardInstance::is_outpost);
    if !is_outpost(target) && bases.iter().any(|&id| is_outpost(id)) {
        return Err(TargetError::OutpostFirst);
    }
    Ok(target)
}

/// Whether `owner` has at least one outpost in play.
pub fn has_outpost(board: &dyn Board, owner: PlayerId) -> bool {
    board
        .list_zone(owner, Zone::Bases)
        .into_iter()
        .any(|id| board.card(id).is_some_and(CardInstance::is_outpost))
}
