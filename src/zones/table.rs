//! In-memory reference board.
//!
//! `Table` owns every card copy of a session (an arena keyed by
//! [`InstanceId`]), the per-player zones, the resource pools, the trade row
//! with its trade deck, and the shared scrap heap. It implements [`Board`]
//! for the rules core and adds the bookkeeping an outer turn loop needs:
//! playing from hand, buying, attacking and end-of-turn cleanup.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::cards::{CardDefinition, CardInstance, CardKind};
use crate::core::{EngineConfig, GameRng, InstanceAllocator, InstanceId, PlayerId, PlayerMap};
use crate::effects::Destination;

use super::board::{Board, Zone};
use super::manager::{ZoneManager, ZonePosition};

/// Reference [`Board`] implementation.
#[derive(Clone, Debug)]
pub struct Table {
    cards: FxHashMap<InstanceId, CardInstance>,
    zones: ZoneManager,

    trade: PlayerMap<i64>,
    combat: PlayerMap<i64>,
    authority: PlayerMap<i64>,
    topdeck_next: PlayerMap<bool>,

    /// Fixed slots; `None` once the trade deck runs dry.
    trade_row: Vector<Option<InstanceId>>,
    /// Top is the back.
    trade_deck: Vector<InstanceId>,
    scrap_heap: Vector<InstanceId>,

    deck_rngs: PlayerMap<GameRng>,
    trade_rng: GameRng,
    ids: InstanceAllocator,
}

impl Table {
    /// Create an empty table using `config`'s authority, trade row width
    /// and seed.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            cards: FxHashMap::default(),
            zones: ZoneManager::new(),
            trade: PlayerMap::with_value(0),
            combat: PlayerMap::with_value(0),
            authority: config.authority_map(),
            topdeck_next: PlayerMap::with_value(false),
            trade_row: std::iter::repeat(None).take(config.trade_row_slots).collect(),
            trade_deck: Vector::new(),
            scrap_heap: Vector::new(),
            deck_rngs: PlayerMap::new(|seat| GameRng::for_seat(config.seed, seat)),
            trade_rng: GameRng::for_trade_deck(config.seed),
            ids: InstanceId::allocator(),
        }
    }

    // === Setup ===

    fn spawn(&mut self, definition: Arc<CardDefinition>, owner: Option<PlayerId>) -> InstanceId {
        let id = self.ids.next_id();
        self.cards.insert(id, CardInstance::new(id, definition, owner));
        id
    }

    /// Create a copy of `definition` in one of `owner`'s zones (on top).
    pub fn spawn_into(&mut self, definition: Arc<CardDefinition>, owner: PlayerId, zone: Zone) -> InstanceId {
        let id = self.spawn(definition, Some(owner));
        self.zones.add(id, owner, zone, ZonePosition::Top);
        trace!(card = %id, %owner, %zone, "spawned");
        id
    }

    /// Create an unowned copy on top of the trade deck.
    pub fn spawn_trade_card(&mut self, definition: Arc<CardDefinition>) -> InstanceId {
        let id = self.spawn(definition, None);
        self.trade_deck.push_back(id);
        id
    }

    /// Shuffle `player`'s deck.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        self.zones.shuffle_zone(player, Zone::Deck, &mut self.deck_rngs[player]);
    }

    /// Shuffle the trade deck.
    pub fn shuffle_trade_deck(&mut self) {
        let mut cards: Vec<_> = self.trade_deck.iter().copied().collect();
        self.trade_rng.shuffle(&mut cards);
        self.trade_deck = cards.into_iter().collect();
    }

    /// Fill every empty trade row slot from the trade deck, in slot order.
    pub fn refill_trade_row(&mut self) {
        for slot in 0..self.trade_row.len() {
            self.refill_slot(slot);
        }
    }

    fn refill_slot(&mut self, slot: usize) {
        if self.trade_row.get(slot).is_some_and(Option::is_none) {
            let next = self.trade_deck.pop_back();
            self.trade_row.set(slot, next);
        }
    }

    fn take_trade_row(&mut self, slot: usize) -> Option<InstanceId> {
        let card = (*self.trade_row.get(slot)?)?;
        self.trade_row.set(slot, None);
        self.refill_slot(slot);
        Some(card)
    }

    // === Queries ===

    #[must_use]
    pub fn trade(&self, player: PlayerId) -> i64 {
        self.trade[player]
    }

    #[must_use]
    pub fn combat(&self, player: PlayerId) -> i64 {
        self.combat[player]
    }

    #[must_use]
    pub fn authority(&self, player: PlayerId) -> i64 {
        self.authority[player]
    }

    /// Whether `player`'s next purchase goes on top of their deck.
    #[must_use]
    pub fn topdeck_pending(&self, player: PlayerId) -> bool {
        self.topdeck_next[player]
    }

    /// Where a card is, if it is in a player zone.
    #[must_use]
    pub fn location(&self, card: InstanceId) -> Option<(PlayerId, Zone)> {
        self.zones.location(card)
    }

    /// Cards removed from the game, oldest first.
    #[must_use]
    pub fn scrap_heap(&self) -> Vec<InstanceId> {
        self.scrap_heap.iter().copied().collect()
    }

    /// Cards left in the trade deck.
    #[must_use]
    pub fn trade_deck_len(&self) -> usize {
        self.trade_deck.len()
    }

    /// Number of card copies ever created.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // === Turn actions ===

    /// Move the card at `hand_index` into play: ships to the in-play zone,
    /// bases to the bases zone.
    pub fn play_from_hand(&mut self, player: PlayerId, hand_index: usize) -> Option<InstanceId> {
        let card = self.zones.card_at(player, Zone::Hand, hand_index)?;
        let zone = match self.cards.get(&card)?.kind() {
            CardKind::Ship => Zone::InPlay,
            CardKind::Base => Zone::Bases,
        };
        self.zones.move_to(card, player, zone, ZonePosition::Top);
        debug!(%player, %card, %zone, "played from hand");
        Some(card)
    }

    /// Spend `amount` trade. Returns `false` (and spends nothing) if the
    /// pool is short.
    pub fn spend_trade(&mut self, player: PlayerId, amount: i64) -> bool {
        spend(&mut self.trade[player], amount)
    }

    /// Spend `amount` combat. Returns `false` (and spends nothing) if the
    /// pool is short.
    pub fn spend_combat(&mut self, player: PlayerId, amount: i64) -> bool {
        spend(&mut self.combat[player], amount)
    }

    /// Buy the trade row card in `slot` with trade.
    ///
    /// The card goes to the discard pile, or on top of the deck if a
    /// top-deck effect is pending (which consumes it).
    pub fn buy(&mut self, player: PlayerId, slot: usize) -> Option<InstanceId> {
        let card = (*self.trade_row.get(slot)?)?;
        let cost = i64::from(self.cards.get(&card)?.definition.cost);
        if !self.spend_trade(player, cost) {
            return None;
        }
        self.take_trade_row(slot)?;
        self.acquire(player, card, Destination::Discard);
        Some(card)
    }

    /// Buy a fresh copy of `definition` from an unlimited pile (Explorer).
    pub fn buy_from_pile(&mut self, player: PlayerId, definition: Arc<CardDefinition>) -> Option<InstanceId> {
        if !self.spend_trade(player, i64::from(definition.cost)) {
            return None;
        }
        let card = self.spawn(definition, Some(player));
        self.acquire(player, card, Destination::Discard);
        Some(card)
    }

    fn acquire(&mut self, player: PlayerId, card: InstanceId, destination: Destination) {
        let destination = if std::mem::take(&mut self.topdeck_next[player]) {
            Destination::DeckTop
        } else {
            destination
        };
        if let Some(instance) = self.cards.get_mut(&card) {
            instance.owner = Some(player);
        }
        let zone = match destination {
            Destination::Discard => Zone::Discard,
            Destination::Hand => Zone::Hand,
            Destination::DeckTop => Zone::Deck,
        };
        self.zones.add(card, player, zone, ZonePosition::Top);
        debug!(%player, %card, %zone, "acquired");
    }

    /// Discard `player`'s hand and ships in play, empty the trade and combat
    /// pools, then draw `hand_size`.
    pub fn end_turn_cleanup(&mut self, player: PlayerId, hand_size: u32) {
        for zone in [Zone::InPlay, Zone::Hand] {
            for card in self.zones.cards(player, zone) {
                self.zones.move_to(card, player, Zone::Discard, ZonePosition::Top);
            }
        }
        self.trade[player] = 0;
        self.combat[player] = 0;
        self.draw(player, hand_size);
    }

    /// Move a card in `player`'s play area to the scrap heap.
    pub fn scrap_from_play(&mut self, player: PlayerId, card: InstanceId) -> bool {
        let in_play = [Zone::InPlay, Zone::Bases]
            .into_iter()
            .any(|zone| self.zones.is_in_zone(card, player, zone));
        if !in_play {
            return false;
        }
        self.zones.remove(card);
        self.scrap_heap.push_back(card);
        true
    }
}

fn spend(pool: &mut i64, amount: i64) -> bool {
    if amount < 0 || *pool < amount {
        return false;
    }
    *pool -= amount;
    true
}

impl Board for Table {
    fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    fn list_zone(&self, player: PlayerId, zone: Zone) -> Vec<InstanceId> {
        self.zones.cards(player, zone)
    }

    fn add_trade(&mut self, player: PlayerId, amount: i64) {
        self.trade[player] += amount;
    }

    fn add_combat(&mut self, player: PlayerId, amount: i64) {
        self.combat[player] += amount;
    }

    fn add_authority(&mut self, player: PlayerId, amount: i64) {
        self.authority[player] += amount;
    }

    fn draw(&mut self, player: PlayerId, count: u32) -> u32 {
        let mut drawn = 0;
        while drawn < count {
            if self.zones.zone_size(player, Zone::Deck) == 0 {
                let discard = self.zones.cards(player, Zone::Discard);
                if discard.is_empty() {
                    break;
                }
                for card in discard {
                    self.zones.move_to(card, player, Zone::Deck, ZonePosition::Top);
                }
                self.shuffle_deck(player);
                trace!(%player, "reshuffled discard into deck");
            }
            let Some(card) = self.zones.pop_top(player, Zone::Deck) else {
                break;
            };
            self.zones.add(card, player, Zone::Hand, ZonePosition::Top);
            drawn += 1;
        }
        drawn
    }

    fn force_discard(&mut self, player: PlayerId, hand_index: usize) -> Option<InstanceId> {
        let card = self.zones.card_at(player, Zone::Hand, hand_index)?;
        self.zones.move_to(card, player, Zone::Discard, ZonePosition::Top);
        Some(card)
    }

    fn scrap(&mut self, player: PlayerId, zone: Zone, index: usize) -> Option<InstanceId> {
        let card = self.zones.take_at(player, zone, index)?;
        self.scrap_heap.push_back(card);
        Some(card)
    }

    fn trade_row(&self) -> Vec<Option<InstanceId>> {
        self.trade_row.iter().copied().collect()
    }

    fn acquire_from_trade_row(
        &mut self,
        player: PlayerId,
        slot: usize,
        destination: Destination,
    ) -> Option<InstanceId> {
        let card = self.take_trade_row(slot)?;
        self.acquire(player, card, destination);
        Some(card)
    }

    fn destroy_trade_row(&mut self, slot: usize) -> Option<InstanceId> {
        let card = self.take_trade_row(slot)?;
        self.scrap_heap.push_back(card);
        Some(card)
    }

    fn destroy_enemy_base(&mut self, owner: PlayerId, index: usize) -> Option<InstanceId> {
        let card = self.zones.card_at(owner, Zone::Bases, index)?;
        self.zones.move_to(card, owner, Zone::Discard, ZonePosition::Top);
        Some(card)
    }

    fn set_topdeck_next_purchase(&mut self, player: PlayerId) {
        self.topdeck_next[player] = true;
    }
}
