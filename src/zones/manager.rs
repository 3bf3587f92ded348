//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` tracks which player-owned zone every card copy is in,
//! and the order of each zone. It supports:
//! - Explicit position control (top/bottom/index) when adding or moving
//! - Removal by zone index, in the order [`Board::list_zone`] reports
//! - Card lookup by instance ID
//! - Shuffling a zone with the deterministic game RNG
//!
//! Orderings are persistent vectors, so cloning a manager for lookahead is
//! cheap.
//!
//! [`Board::list_zone`]: super::Board::list_zone

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, InstanceId, PlayerId};

use super::board::Zone;

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (e.g., top of deck).
    Top,
    /// Add to bottom of zone.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

type ZoneKey = (PlayerId, Zone);

/// Manages card locations across every player's zones.
///
/// Index 0 of a zone is its bottom; the last index is its top. Decks are
/// drawn from the top.
///
/// ## Usage
///
/// ```
/// use realm_rules::core::{InstanceId, PlayerId};
/// use realm_rules::zones::{Zone, ZoneManager, ZonePosition};
///
/// let mut manager = ZoneManager::new();
/// let me = PlayerId::FIRST;
///
/// manager.add(InstanceId(10), me, Zone::Deck, ZonePosition::Top);
/// manager.add(InstanceId(11), me, Zone::Deck, ZonePosition::Bottom);
///
/// assert_eq!(manager.cards(me, Zone::Deck), vec![InstanceId(11), InstanceId(10)]);
/// assert_eq!(manager.pop_top(me, Zone::Deck), Some(InstanceId(10)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: instance -> (owner, zone)
    locations: FxHashMap<InstanceId, ZoneKey>,

    /// Card order per (owner, zone).
    zone_order: FxHashMap<ZoneKey, Vector<InstanceId>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to a zone.
    ///
    /// Returns `false` and changes nothing if the card is already tracked.
    pub fn add(&mut self, card: InstanceId, owner: PlayerId, zone: Zone, position: ZonePosition) -> bool {
        if self.locations.contains_key(&card) {
            return false;
        }
        self.locations.insert(card, (owner, zone));
        insert_at(self.zone_order.entry((owner, zone)).or_default(), card, position);
        true
    }

    /// Move a card to another zone of `owner`.
    ///
    /// Returns the old location, or `None` if the card wasn't found.
    pub fn move_to(
        &mut self,
        card: InstanceId,
        owner: PlayerId,
        zone: Zone,
        position: ZonePosition,
    ) -> Option<(PlayerId, Zone)> {
        let old = self.remove(card)?;
        self.add(card, owner, zone, position);
        Some(old)
    }

    /// Remove a card from the manager entirely.
    ///
    /// Returns the location it was in, or `None` if not found.
    pub fn remove(&mut self, card: InstanceId) -> Option<(PlayerId, Zone)> {
        let key = self.locations.remove(&card)?;
        if let Some(order) = self.zone_order.get_mut(&key) {
            order.retain(|&c| c != card);
        }
        Some(key)
    }

    /// Remove and return the card at `index` of a zone.
    pub fn take_at(&mut self, owner: PlayerId, zone: Zone, index: usize) -> Option<InstanceId> {
        let order = self.zone_order.get_mut(&(owner, zone))?;
        if index >= order.len() {
            return None;
        }
        let card = order.remove(index);
        self.locations.remove(&card);
        Some(card)
    }

    /// Get the location of a card.
    #[must_use]
    pub fn location(&self, card: InstanceId) -> Option<(PlayerId, Zone)> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, card: InstanceId, owner: PlayerId, zone: Zone) -> bool {
        self.locations.get(&card) == Some(&(owner, zone))
    }

    /// Cards in a zone, bottom to top.
    #[must_use]
    pub fn cards(&self, owner: PlayerId, zone: Zone) -> Vec<InstanceId> {
        self.zone_order
            .get(&(owner, zone))
            .map(|order| order.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Card at `index` of a zone.
    #[must_use]
    pub fn card_at(&self, owner: PlayerId, zone: Zone, index: usize) -> Option<InstanceId> {
        self.zone_order.get(&(owner, zone))?.get(index).copied()
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, owner: PlayerId, zone: Zone) -> usize {
        self.zone_order.get(&(owner, zone)).map_or(0, Vector::len)
    }

    /// Remove and return the top card of a zone.
    pub fn pop_top(&mut self, owner: PlayerId, zone: Zone) -> Option<InstanceId> {
        let card = self.zone_order.get_mut(&(owner, zone))?.pop_back()?;
        self.locations.remove(&card);
        Some(card)
    }

    /// Shuffle a zone.
    pub fn shuffle_zone(&mut self, owner: PlayerId, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&(owner, zone)) {
            let mut cards: Vec<_> = order.iter().copied().collect();
            rng.shuffle(&mut cards);
            *order = cards.into_iter().collect();
        }
    }

    /// Check if the manager contains a card.
    #[must_use]
    pub fn contains(&self, card: InstanceId) -> bool {
        self.locations.contains_key(&card)
    }
}

fn insert_at(order: &mut Vector<InstanceId>, card: InstanceId, position: ZonePosition) {
    match position {
        ZonePosition::Top => order.push_back(card),
        ZonePosition::Bottom => order.push_front(card),
        ZonePosition::Index(i) => {
            let idx = i.min(order.len());
            order.insert(idx, card);
        }
    }
}
