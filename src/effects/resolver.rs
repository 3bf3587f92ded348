//! Effect resolution - the interpreter for the effect vocabulary.
//!
//! `EffectResolver` runs an ordered effect list for an acting player against
//! the board. Effects run strictly in order and every pool or zone change is
//! visible to the next effect. Composite effects (`choose_one`, `if`,
//! `repeat`, `count`) recurse into the same interpreter before the outer
//! list continues.
//!
//! Nothing here fails. Cancelled or illegal picks make that one effect a
//! no-op, and unknown effects are reported and skipped. Either way the rest
//! of the list still runs. The one exception is the opponent's forced
//! discard, which asks again until a legal card is picked (bounded by the
//! context's re-prompt limit).

use std::sync::Arc;

use tracing::{debug, trace};

use crate::cards::{CardDefinition, Trigger};
use crate::choice::{Candidate, Pile};
use crate::core::{InstanceId, PlayerId, TargetError};
use crate::rules::{AllyResolver, RulesState};
use crate::triggers::{ConditionContext, ConditionEvaluator, HookEvent};
use crate::zones::{base_target, has_outpost, Board, Zone};

use super::context::ResolverContext;
use super::effect::{ChoiceOption, CountZone, Destination, Effect, ScrapSource};
use super::filter::CardFilter;

/// Maximum nesting of `copy_unit` inside copied effects.
const MAX_COPY_DEPTH: u32 = 8;

/// Runs effect lists for one acting player.
///
/// `source` is the card whose ability is resolving. Effects that tie
/// something to the card's presence in play (hooks, per-unit bonuses) or
/// that must exclude it (`copy_unit`) need it.
pub struct EffectResolver<'r, 'a> {
    board: &'r mut dyn Board,
    rules: &'r mut RulesState,
    ctx: &'r mut ResolverContext<'a>,
    actor: PlayerId,
    source: Option<InstanceId>,
    copy_depth: u32,
}

impl<'r, 'a> EffectResolver<'r, 'a> {
    /// Create a resolver for `actor`.
    pub fn new(
        board: &'r mut dyn Board,
        rules: &'r mut RulesState,
        ctx: &'r mut ResolverContext<'a>,
        actor: PlayerId,
    ) -> Self {
        Self {
            board,
            rules,
            ctx,
            actor,
            source: None,
            copy_depth: 0,
        }
    }

    /// Set the acting card (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: InstanceId) -> Self {
        self.source = Some(source);
        self
    }

    /// Player resolving the effects.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        self.actor
    }

    /// The actor's opponent.
    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.actor.opponent()
    }

    /// Run `effects` in order.
    pub fn run(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: &Effect) {
        trace!(actor = %self.actor, ?effect, "applying effect");
        match effect {
            Effect::Trade { amount } => self.board.add_trade(self.actor, *amount),
            Effect::Combat { amount } => self.board.add_combat(self.actor, *amount),
            Effect::Authority { amount } => self.board.add_authority(self.actor, *amount),
            Effect::Draw { amount } => {
                let drawn = self.board.draw(self.actor, *amount);
                if drawn < *amount {
                    debug!(actor = %self.actor, drawn, wanted = amount, "deck ran out");
                }
            }
            Effect::OpponentDiscards { amount } => self.forced_discard(*amount),
            Effect::DiscardThenDraw { amount } => self.discard_then_draw(*amount),
            Effect::Scrap { amount, from, then } => self.scrap(*amount, *from, then),
            Effect::DestroyBase => self.destroy_base(),
            Effect::DestroyTradeRow { filter } => self.destroy_trade_row(filter),
            Effect::AcquireFree {
                filter,
                destination,
            } => self.acquire_free(filter, *destination),
            Effect::TopdeckNextPurchase => self.board.set_topdeck_next_purchase(self.actor),
            Effect::ChooseOne { options } => self.choose_one(options),
            Effect::If {
                condition,
                then,
                otherwise,
            } => {
                let holds = {
                    let ctx = ConditionContext::new(self.actor, &*self.board, &self.rules.ledger);
                    ConditionEvaluator::evaluate(condition, &ctx)
                };
                self.run(if holds { then } else { otherwise });
            }
            Effect::Repeat { times, effects } => {
                for _ in 0..*times {
                    self.run(effects);
                }
            }
            Effect::Count {
                zone,
                filter,
                effects,
            } => {
                let times = self.count_matching(*zone, filter);
                for _ in 0..times {
                    self.run(effects);
                }
            }
            Effect::RegisterHook { event, effects } => {
                if let Some(source) = self.require_source("register a hook") {
                    self.rules
                        .hooks
                        .register(self.actor, *event, source, effects.clone());
                }
            }
            Effect::UnregisterHooks => {
                if let Some(source) = self.require_source("unregister hooks") {
                    self.rules.hooks.unregister_all(self.actor, source);
                }
            }
            Effect::AllyAnyFaction => {
                self.rules.ledger.grant_turn_wildcard(self.actor);
                AllyResolver::resolve(&mut *self.board, &mut *self.rules, &mut *self.ctx, self.actor);
            }
            Effect::PerUnitCombat { amount } => {
                if let Some(source) = self.require_source("grant a per-ship bonus") {
                    self.rules.hooks.register(
                        self.actor,
                        HookEvent::UnitPlayed,
                        source,
                        vec![Effect::combat(*amount)],
                    );
                }
            }
            Effect::CopyUnit => self.copy_unit(),
            Effect::Unknown => self.ctx.notify("Unknown effect type skipped."),
        }
    }

    fn require_source(&mut self, what: &str) -> Option<InstanceId> {
        if self.source.is_none() {
            self.ctx.notify(format!("Cannot {what} without a source card."));
        }
        self.source
    }

    fn definition(&self, id: InstanceId) -> Option<Arc<CardDefinition>> {
        self.board.card(id).map(|card| Arc::clone(&card.definition))
    }

    fn label(&self, id: InstanceId) -> String {
        self.board
            .card(id)
            .map_or_else(|| id.to_string(), |card| card.name().to_string())
    }

    fn candidates(&self, ids: &[InstanceId]) -> Vec<Candidate> {
        ids.iter().map(|&id| Candidate::legal(self.label(id))).collect()
    }

    fn forced_discard(&mut self, amount: u32) {
        let target = self.opponent();
        for _ in 0..amount {
            let hand = self.board.list_zone(target, Zone::Hand);
            if hand.is_empty() {
                self.ctx.notify(format!("{target} has no cards to discard."));
                return;
            }
            let candidates = self.candidates(&hand);
            let prompt = format!("{target}: choose a card to discard");

            let mut attempts = 0;
            let index = loop {
                match self.ctx.chooser(target).choose_index(&prompt, &candidates, false) {
                    Some(i) if i < hand.len() => break i,
                    _ => {}
                }
                attempts += 1;
                if attempts > self.ctx.reprompt_limit() {
                    self.ctx
                        .notify(format!("No legal discard chosen; discarding {}.", candidates[0].label));
                    break 0;
                }
                self.ctx.notify("You must choose a card from your hand to discard.");
            };

            if let Some(id) = self.board.force_discard(target, index) {
                debug!(player = %target, card = %id, "forced discard");
            }
        }
    }

    fn discard_then_draw(&mut self, amount: u32) {
        let mut discarded = 0;
        for n in 0..amount {
            let hand = self.board.list_zone(self.actor, Zone::Hand);
            if hand.is_empty() {
                break;
            }
            let candidates = self.candidates(&hand);
            let prompt = format!("Discard a card to draw a card ({}/{amount})", n + 1);
            match self.ctx.chooser(self.actor).choose_index(&prompt, &candidates, true) {
                None => break,
                Some(i) if i < hand.len() => {
                    if self.board.force_discard(self.actor, i).is_some() {
                        discarded += 1;
                    }
                }
                Some(_) => {
                    self.ctx.notify("Invalid choice; no more cards discarded.");
                    break;
                }
            }
        }
        if discarded > 0 {
            self.board.draw(self.actor, discarded);
        }
    }

    fn scrap(&mut self, amount: u32, from: ScrapSource, then: &[Effect]) {
        for _ in 0..amount {
            let hand = self.board.list_zone(self.actor, Zone::Hand);
            let discard = self.board.list_zone(self.actor, Zone::Discard);
            let can_hand = from.allows_hand() && !hand.is_empty();
            let can_discard = from.allows_discard() && !discard.is_empty();

            let pile = match (can_hand, can_discard) {
                (false, false) => {
                    self.ctx.notify("No cards available to scrap.");
                    return;
                }
                (true, false) => Pile::Hand,
                (false, true) => Pile::Discard,
                (true, true) => {
                    let prompt = "Scrap from your hand or your discard pile?";
                    match self.ctx.chooser(self.actor).choose_pile(prompt, true, true, true) {
                        Some(pile) => pile,
                        None => return,
                    }
                }
            };
            let (zone, cards) = match pile {
                Pile::Hand if can_hand => (Zone::Hand, hand),
                Pile::Discard if can_discard => (Zone::Discard, discard),
                _ => {
                    self.ctx.notify("Cannot scrap from that pile.");
                    return;
                }
            };

            let candidates = self.candidates(&cards);
            let prompt = format!("Choose a card to scrap from your {zone}");
            let Some(index) = self.ctx.chooser(self.actor).choose_index(&prompt, &candidates, true) else {
                return;
            };
            if index >= cards.len() {
                self.ctx.notify("Invalid choice; nothing scrapped.");
                return;
            }
            match self.board.scrap(self.actor, zone, index) {
                Some(id) => {
                    debug!(player = %self.actor, card = %id, %zone, "scrapped");
                    self.run(then);
                }
                None => return,
            }
        }
    }

    fn destroy_base(&mut self) {
        let target = self.opponent();
        let bases = self.board.list_zone(target, Zone::Bases);
        if bases.is_empty() {
            self.ctx.notify("No enemy base to destroy.");
            return;
        }

        let outpost_present = has_outpost(&*self.board, target);
        let candidates: Vec<_> = bases
            .iter()
            .map(|&id| {
                let legal = !outpost_present
                    || self.board.card(id).is_some_and(|card| card.is_outpost());
                Candidate {
                    label: self.label(id),
                    legal,
                }
            })
            .collect();

        let prompt = "Choose an enemy base to destroy";
        let Some(index) = self.ctx.chooser(self.actor).choose_index(prompt, &candidates, true) else {
            self.ctx.notify("No base destroyed.");
            return;
        };

        match base_target(&*self.board, target, index) {
            Ok(id) => {
                if let Some(definition) = self.definition(id) {
                    self.rules.card_left_play(target, id, &definition);
                }
                if self.board.destroy_enemy_base(target, index).is_some() {
                    debug!(owner = %target, base = %id, "base destroyed");
                }
            }
            Err(TargetError::OutpostFirst) => {
                self.ctx.notify("Illegal target: an outpost must be destroyed first.");
            }
            Err(err) => self.ctx.notify(format!("Invalid choice: {err}.")),
        }
    }

    /// Ask the actor for a trade row slot matching `filter`.
    fn pick_trade_row(&mut self, filter: &CardFilter, prompt: &str) -> Option<usize> {
        let row = self.board.trade_row();
        let candidates: Vec<_> = row
            .iter()
            .map(|slot| match slot {
                Some(id) => Candidate {
                    label: self.label(*id),
                    legal: self.definition(*id).is_some_and(|def| filter.matches(&def)),
                },
                None => Candidate::illegal("(empty)"),
            })
            .collect();

        if !candidates.iter().any(|c| c.legal) {
            self.ctx.notify("No trade row card qualifies.");
            return None;
        }
        let index = self.ctx.chooser(self.actor).choose_index(prompt, &candidates, true)?;
        if candidates.get(index).is_some_and(|c| c.legal) {
            Some(index)
        } else {
            self.ctx.notify("Invalid trade row choice.");
            None
        }
    }

    fn destroy_trade_row(&mut self, filter: &CardFilter) {
        if let Some(slot) = self.pick_trade_row(filter, "Choose a trade row card to scrap") {
            if let Some(id) = self.board.destroy_trade_row(slot) {
                debug!(card = %id, slot, "trade row card scrapped");
            }
        }
    }

    fn acquire_free(&mut self, filter: &CardFilter, destination: Destination) {
        if let Some(slot) = self.pick_trade_row(filter, "Choose a trade row card to acquire for free") {
            if let Some(id) = self.board.acquire_from_trade_row(self.actor, slot, destination) {
                debug!(player = %self.actor, card = %id, ?destination, "acquired for free");
            }
        }
    }

    fn choose_one(&mut self, options: &[ChoiceOption]) {
        if options.is_empty() {
            return;
        }
        let labels: Vec<String> = options.iter().map(|o| o.label.clone()).collect();
        match self.ctx.chooser(self.actor).choose_option("Choose one", &labels, false) {
            Some(i) if i < options.len() => self.run(&options[i].effects),
            Some(_) => self.ctx.notify("Invalid option; nothing happens."),
            None => self.ctx.notify("No option chosen."),
        }
    }

    fn count_matching(&self, zone: CountZone, filter: &CardFilter) -> usize {
        let ids = match zone {
            CountZone::PlayedThisTurn => self.rules.ledger.played_this_turn(self.actor).to_vec(),
            CountZone::InPlay => {
                let mut ids = self.board.list_zone(self.actor, Zone::InPlay);
                ids.extend(self.board.list_zone(self.actor, Zone::Bases));
                ids
            }
            CountZone::Zone(zone) => self.board.list_zone(self.actor, zone),
        };
        ids.into_iter()
            .filter(|&id| {
                self.board
                    .card(id)
                    .is_some_and(|card| filter.matches(&card.definition))
            })
            .count()
    }

    fn copy_unit(&mut self) {
        if self.copy_depth >= MAX_COPY_DEPTH {
            self.ctx.notify("Copy chain too deep; nothing copied.");
            return;
        }
        let eligible: Vec<InstanceId> = self
            .board
            .list_zone(self.actor, Zone::InPlay)
            .into_iter()
            .filter(|&id| Some(id) != self.source)
            .collect();
        if eligible.is_empty() {
            self.ctx.notify("No other ship in play to copy.");
            return;
        }

        let candidates = self.candidates(&eligible);
        let prompt = "Choose a ship to copy";
        let Some(index) = self.ctx.chooser(self.actor).choose_index(prompt, &candidates, true) else {
            return;
        };
        let Some(target) = eligible.get(index).copied() else {
            self.ctx.notify("Invalid choice; nothing copied.");
            return;
        };
        let Some(definition) = self.definition(target) else {
            return;
        };
        debug!(player = %self.actor, copied = %definition.name, "copying ship");

        self.copy_depth += 1;
        for ability in definition.abilities_for(Trigger::OnPlay) {
            let holds = {
                let ctx = ConditionContext::new(self.actor, &*self.board, &self.rules.ledger);
                ConditionEvaluator::check(ability.condition.as_ref(), &ctx)
            };
            if holds {
                self.run(&ability.effects);
            }
        }
        self.copy_depth -= 1;
    }
}
