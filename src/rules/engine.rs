//! Engine facade for a caller-driven turn loop.
//!
//! `Engine` wires a [`Table`], a [`Dispatcher`] and an [`EngineConfig`]
//! together. The caller decides what the active player does and passes a
//! [`ResolverContext`] for any call that may need a decision; the engine
//! moves cards and routes the lifecycle events in the right order.

use tracing::{debug, info};

use crate::cards::catalog::{EXPLORER, STARTER_DECK, TRADE_DECK};
use crate::cards::{standard_registry, AbilityId, CardKind, CardRegistry};
use crate::core::{EngineConfig, InstanceId, LoadError, PlayerId, TargetError};
use crate::effects::ResolverContext;
use crate::triggers::{Activation, Dispatcher, ScrapActivation};
use crate::zones::{base_target, has_outpost, Board, Table, Zone};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players fell to zero authority at once.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Board, dispatcher and configuration for one session.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    registry: CardRegistry,
    table: Table,
    dispatcher: Dispatcher,
    active: PlayerId,
    turn: u32,
}

impl Engine {
    /// Create an engine over an empty table.
    #[must_use]
    pub fn new(config: EngineConfig, registry: CardRegistry) -> Self {
        let table = Table::new(&config);
        Self {
            config,
            registry,
            table,
            dispatcher: Dispatcher::new(),
            active: PlayerId::FIRST,
            turn: 1,
        }
    }

    /// Build a ready-to-play session from the built-in catalog.
    pub fn setup_standard(config: EngineConfig) -> Result<Self, LoadError> {
        Self::setup(config, standard_registry()?, STARTER_DECK, TRADE_DECK)
    }

    /// Build a session: starting decks and trade deck by card name and copy
    /// count, shuffled, trade row filled and opening hands drawn.
    pub fn setup(
        config: EngineConfig,
        registry: CardRegistry,
        starter: &[(&str, usize)],
        trade_deck: &[(&str, usize)],
    ) -> Result<Self, LoadError> {
        let mut engine = Self::new(config, registry);

        for player in PlayerId::all() {
            for &(name, copies) in starter {
                let definition = engine.registry.require(name)?;
                for _ in 0..copies {
                    engine.table.spawn_into(definition.clone(), player, Zone::Deck);
                }
            }
            engine.table.shuffle_deck(player);
        }
        for &(name, copies) in trade_deck {
            let definition = engine.registry.require(name)?;
            for _ in 0..copies {
                engine.table.spawn_trade_card(definition.clone());
            }
        }
        engine.table.shuffle_trade_deck();
        engine.table.refill_trade_row();

        for player in PlayerId::all() {
            let count = engine.config.opening_hand(player);
            engine.table.draw(player, count);
        }
        info!(
            cards = engine.table.card_count(),
            trade_deck = engine.table.trade_deck_len(),
            "session ready"
        );
        Ok(engine)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Direct board access, for scenario setup.
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    // === Turn loop ===

    /// Reset the active player's turn state and run `on_turn_start`
    /// abilities.
    pub fn start_turn(&mut self, ctx: &mut ResolverContext<'_>) {
        debug!(player = %self.active, turn = self.turn, "start turn");
        self.dispatcher.on_turn_start(&mut self.table, ctx, self.active);
    }

    /// Play the card at `hand_index` of the active player's hand.
    ///
    /// The card enters play (hooks, on-play abilities, ally scan); if it is
    /// a ship, the active player's ship-played hooks fire afterwards.
    pub fn play_from_hand(&mut self, ctx: &mut ResolverContext<'_>, hand_index: usize) -> Option<InstanceId> {
        let player = self.active;
        let card = self.table.play_from_hand(player, hand_index)?;
        self.dispatcher.on_card_enter_play(&mut self.table, ctx, player, card);

        let is_ship = self.table.card(card).is_some_and(|c| c.kind() == CardKind::Ship);
        if is_ship {
            self.dispatcher.on_unit_played(&mut self.table, ctx, player, card);
        }
        Some(card)
    }

    /// Activate an ability of one of the active player's cards in play.
    pub fn activate(
        &mut self,
        ctx: &mut ResolverContext<'_>,
        card: InstanceId,
        ability_id: Option<&AbilityId>,
    ) -> Activation {
        self.dispatcher
            .activate(&mut self.table, ctx, self.active, card, ability_id)
    }

    /// Scrap one of the active player's cards in play for its scrap
    /// ability. Only when an ability resolves does the card leave play for
    /// the scrap heap.
    pub fn scrap_card(&mut self, ctx: &mut ResolverContext<'_>, card: InstanceId) -> ScrapActivation {
        let player = self.active;
        let outcome = self.dispatcher.scrap_activate(&mut self.table, ctx, player, card);
        if outcome == ScrapActivation::Resolved {
            self.dispatcher.on_card_leave_play(&self.table, player, card);
            self.table.scrap_from_play(player, card);
        }
        outcome
    }

    /// Buy the trade row card in `slot`.
    pub fn buy(&mut self, slot: usize) -> Option<InstanceId> {
        self.table.buy(self.active, slot)
    }

    /// Buy an Explorer from the unlimited pile.
    pub fn buy_explorer(&mut self) -> Option<InstanceId> {
        let explorer = self.registry.by_name(EXPLORER)?.clone();
        self.table.buy_from_pile(self.active, explorer)
    }

    /// Destroy the opponent's base at `index` with combat.
    ///
    /// Outposts must go first, and the active player needs combat at least
    /// equal to the base's defense; that much combat is spent.
    pub fn attack_base(&mut self, index: usize) -> Result<InstanceId, TargetError> {
        let player = self.active;
        let opponent = player.opponent();
        let target = base_target(&self.table, opponent, index)?;

        let needed = self
            .table
            .card(target)
            .map_or(0, |card| i64::from(card.definition.defense));
        let available = self.table.combat(player);
        if !self.table.spend_combat(player, needed) {
            return Err(TargetError::NotEnoughCombat { needed, available });
        }

        self.dispatcher.on_card_leave_play(&self.table, opponent, target);
        self.table.destroy_enemy_base(opponent, index);
        debug!(%player, base = %target, "base destroyed by attack");
        Ok(target)
    }

    /// Deal all remaining combat to the opponent's authority.
    ///
    /// Refused while the opponent has an outpost. Returns the damage dealt.
    pub fn attack_player(&mut self) -> Result<i64, TargetError> {
        let player = self.active;
        let opponent = player.opponent();
        if has_outpost(&self.table, opponent) {
            return Err(TargetError::OutpostFirst);
        }
        let damage = self.table.combat(player).max(0);
        self.table.spend_combat(player, damage);
        self.table.add_authority(opponent, -damage);
        debug!(%player, damage, "attacked player");
        Ok(damage)
    }

    /// Finish the active player's turn and pass to the opponent.
    pub fn end_turn(&mut self) {
        let player = self.active;
        self.dispatcher.on_turn_end(&self.table, player);
        self.table.end_turn_cleanup(player, self.config.hand_size);
        self.active = player.opponent();
        self.turn += 1;
    }

    /// The result once a player is at zero authority or below.
    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        let out: Vec<_> = PlayerId::all()
            .filter(|&p| self.table.authority(p) <= 0)
            .collect();
        match out.as_slice() {
            [] => None,
            [loser] => Some(GameResult::Winner(loser.opponent())),
            _ => Some(GameResult::Draw),
        }
    }
}
