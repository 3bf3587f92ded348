//! Trigger dispatcher: routes lifecycle events to abilities.
//!
//! The outer game loop calls the dispatcher whenever a card changes location,
//! a turn starts or ends, or an ability is invoked. The dispatcher finds the
//! matching abilities, checks their conditions and hands their effect lists
//! to the [`EffectResolver`]. It owns the hook registry and the turn ledger
//! (as [`RulesState`]) but never stores zone contents; those stay on the
//! [`Board`].
//!
//! ## Entry order
//!
//! When a card enters play its continuous hooks are registered first, then
//! its `on_play` abilities run. A card therefore never triggers its own
//! freshly registered hook during its own entry.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::cards::{AbilityId, CardDefinition, Trigger};
use crate::core::{InstanceId, PlayerId};
use crate::effects::{EffectResolver, ResolverContext};
use crate::rules::{AllyResolver, RulesState, TurnLedger};
use crate::zones::{Board, Zone};

use super::condition::{Condition, ConditionContext, ConditionEvaluator};
use super::event::HookEvent;
use super::registry::HookRegistry;

/// Outcome of [`Dispatcher::activate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// An ability ran.
    Resolved,
    /// The first matching ability was already used this turn.
    AlreadyUsed,
    /// Matching abilities exist but none has its condition met.
    ConditionUnmet,
    /// The card is not in the owner's play area or has no such ability.
    NotFound,
}

/// Outcome of [`Dispatcher::scrap_activate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrapActivation {
    /// Effects ran; the caller should move the card to the scrap heap.
    Resolved,
    /// The card is not in play or has no scrap ability; nothing happened.
    NoAbility,
    /// No scrap ability has its condition met; the card stays in play.
    ConditionUnmet,
}

/// Routes card lifecycle events to abilities and hooks.
#[derive(Clone, Debug, Default)]
pub struct Dispatcher {
    state: RulesState,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks plus ledger.
    #[must_use]
    pub fn state(&self) -> &RulesState {
        &self.state
    }

    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.state.hooks
    }

    #[must_use]
    pub fn ledger(&self) -> &TurnLedger {
        &self.state.ledger
    }

    /// A card entered `owner`'s play area.
    ///
    /// Registers its continuous hooks, runs its `on_play` abilities, counts
    /// its wildcard aura, records it as played this turn and re-scans allies.
    pub fn on_card_enter_play(
        &mut self,
        board: &mut dyn Board,
        ctx: &mut ResolverContext<'_>,
        owner: PlayerId,
        card: InstanceId,
    ) {
        let Some(definition) = definition_of(&*board, card) else {
            ctx.notify(format!("{card} is not on the table."));
            return;
        };
        debug!(%owner, %card, name = %definition.name, "card entered play");

        for ability in definition.continuous_abilities() {
            if let Trigger::Continuous(event) = ability.trigger {
                self.state
                    .hooks
                    .register(owner, event, card, ability.effects.clone());
            }
        }

        for ability in definition.abilities_for(Trigger::OnPlay) {
            if self.condition_holds(&*board, owner, ability.condition.as_ref()) {
                EffectResolver::new(&mut *board, &mut self.state, &mut *ctx, owner)
                    .with_source(card)
                    .run(&ability.effects);
            }
        }

        if definition.grants_ally_wildcard() {
            self.state.ledger.add_wildcard_source(owner, card);
        }
        self.state.ledger.record_played(owner, card);

        AllyResolver::resolve(board, &mut self.state, ctx, owner);
    }

    /// A card left `owner`'s play area: drop its hooks and wildcard aura.
    pub fn on_card_leave_play(&mut self, board: &dyn Board, owner: PlayerId, card: InstanceId) {
        match definition_of(board, card) {
            Some(definition) => self.state.card_left_play(owner, card, &definition),
            None => {
                self.state.hooks.unregister_all(owner, card);
                self.state.ledger.remove_wildcard_source(owner, card);
                self.state.ledger.forget_ally(owner, card);
            }
        }
    }

    /// Top of `owner`'s turn: reset usage and base ally flags, then run
    /// `on_turn_start` abilities of every card in play.
    pub fn on_turn_start(&mut self, board: &mut dyn Board, ctx: &mut ResolverContext<'_>, owner: PlayerId) {
        let bases = board.list_zone(owner, Zone::Bases);
        self.state.ledger.begin_turn(owner, &bases);
        debug!(%owner, "turn start");

        let mut in_play = board.list_zone(owner, Zone::InPlay);
        in_play.extend(bases);
        for card in in_play {
            let Some(definition) = definition_of(&*board, card) else {
                continue;
            };
            for ability in definition.abilities_for(Trigger::OnTurnStart) {
                if self.condition_holds(&*board, owner, ability.condition.as_ref()) {
                    EffectResolver::new(&mut *board, &mut self.state, &mut *ctx, owner)
                        .with_source(card)
                        .run(&ability.effects);
                }
            }
        }
    }

    /// Bottom of `owner`'s turn.
    ///
    /// Ships in play are about to be discarded, so they get leave-play
    /// bookkeeping here. The played-this-turn list and the turn-scoped
    /// wildcard are cleared.
    pub fn on_turn_end(&mut self, board: &dyn Board, owner: PlayerId) {
        for card in board.list_zone(owner, Zone::InPlay) {
            self.on_card_leave_play(board, owner, card);
        }
        self.state.ledger.end_turn(owner);
        debug!(%owner, "turn end");
    }

    /// Activate one of `card`'s `activated` abilities.
    ///
    /// With `ability_id`, only abilities with that ID are considered.
    /// Abilities are tried in declaration order. The first one already used
    /// this turn rejects the activation; one whose condition fails is
    /// passed over for the next.
    pub fn activate(
        &mut self,
        board: &mut dyn Board,
        ctx: &mut ResolverContext<'_>,
        owner: PlayerId,
        card: InstanceId,
        ability_id: Option<&AbilityId>,
    ) -> Activation {
        let Some(definition) = self.in_play_definition(&*board, owner, card) else {
            ctx.notify("No activatable ability found.");
            return Activation::NotFound;
        };

        let mut outcome = Activation::NotFound;
        for (index, ability) in definition.abilities.iter().enumerate() {
            if ability.trigger != Trigger::Activated {
                continue;
            }
            if ability_id.is_some_and(|id| ability.id.as_ref() != Some(id)) {
                continue;
            }
            let key = ability
                .id
                .clone()
                .unwrap_or_else(|| AbilityId::new(format!("activated#{index}")));

            if ability.is_once_per_turn() && self.state.ledger.is_used(owner, card, &key) {
                ctx.notify("Already used this ability this turn.");
                return Activation::AlreadyUsed;
            }
            if !self.condition_holds(&*board, owner, ability.condition.as_ref()) {
                outcome = Activation::ConditionUnmet;
                continue;
            }

            if ability.is_once_per_turn() {
                self.state.ledger.mark_used(owner, card, key.clone());
            }
            debug!(%owner, %card, ability = %key, "activated");
            EffectResolver::new(&mut *board, &mut self.state, &mut *ctx, owner)
                .with_source(card)
                .run(&ability.effects);
            return Activation::Resolved;
        }

        match outcome {
            Activation::ConditionUnmet => ctx.notify("Ability conditions not met."),
            _ => ctx.notify("No activatable ability found."),
        }
        outcome
    }

    /// Run the first of `card`'s `scrap_activated` abilities whose
    /// condition holds.
    ///
    /// On [`ScrapActivation::Resolved`] the caller removes the card from
    /// play (see [`Self::on_card_leave_play`]) and moves it to the scrap
    /// heap. Any other outcome leaves the card where it is.
    pub fn scrap_activate(
        &mut self,
        board: &mut dyn Board,
        ctx: &mut ResolverContext<'_>,
        owner: PlayerId,
        card: InstanceId,
    ) -> ScrapActivation {
        let definition = self
            .in_play_definition(&*board, owner, card)
            .filter(|def| def.abilities_for(Trigger::ScrapActivated).next().is_some());
        let Some(definition) = definition else {
            ctx.notify("No scrap-activated ability on this card.");
            return ScrapActivation::NoAbility;
        };

        for ability in definition.abilities_for(Trigger::ScrapActivated) {
            if self.condition_holds(&*board, owner, ability.condition.as_ref()) {
                debug!(%owner, %card, name = %definition.name, "scrap activated");
                EffectResolver::new(&mut *board, &mut self.state, &mut *ctx, owner)
                    .with_source(card)
                    .run(&ability.effects);
                return ScrapActivation::Resolved;
            }
        }
        ctx.notify("Scrap ability conditions not met.");
        ScrapActivation::ConditionUnmet
    }

    /// A ship entered play: fire `owner`'s `on_ship_played` hooks.
    ///
    /// Hooks registered by `unit` itself are skipped, so a ship never
    /// counts its own entry.
    pub fn on_unit_played(
        &mut self,
        board: &mut dyn Board,
        ctx: &mut ResolverContext<'_>,
        owner: PlayerId,
        unit: InstanceId,
    ) {
        trace!(%owner, %unit, "unit played");
        self.fire_hooks(board, ctx, owner, HookEvent::UnitPlayed, Some(unit));
    }

    /// Run every hook registered for `owner`'s `event`, in registration
    /// order. Hooks removed while firing are skipped.
    pub fn fire(&mut self, board: &mut dyn Board, ctx: &mut ResolverContext<'_>, owner: PlayerId, event: HookEvent) {
        self.fire_hooks(board, ctx, owner, event, None);
    }

    fn fire_hooks(
        &mut self,
        board: &mut dyn Board,
        ctx: &mut ResolverContext<'_>,
        owner: PlayerId,
        event: HookEvent,
        except: Option<InstanceId>,
    ) {
        for id in self.state.hooks.snapshot(owner, event) {
            let Some(hook) = self.state.hooks.get(id) else {
                continue;
            };
            if Some(hook.source) == except {
                continue;
            }
            let source = hook.source;
            let effects = hook.effects.clone();
            trace!(%owner, %event, hook = %id, %source, "firing hook");
            EffectResolver::new(&mut *board, &mut self.state, &mut *ctx, owner)
                .with_source(source)
                .run(&effects);
        }
    }

    fn condition_holds(&self, board: &dyn Board, owner: PlayerId, condition: Option<&Condition>) -> bool {
        let ctx = ConditionContext::new(owner, board, &self.state.ledger);
        ConditionEvaluator::check(condition, &ctx)
    }

    fn in_play_definition(&self, board: &dyn Board, owner: PlayerId, card: InstanceId) -> Option<Arc<CardDefinition>> {
        let in_play = [Zone::InPlay, Zone::Bases]
            .into_iter()
            .any(|zone| board.list_zone(owner, zone).contains(&card));
        if in_play {
            definition_of(board, card)
        } else {
            None
        }
    }
}

fn definition_of(board: &dyn Board, card: InstanceId) -> Option<Arc<CardDefinition>> {
    board.card(card).map(|instance| Arc::clone(&instance.definition))
}
