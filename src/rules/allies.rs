//! Ally resolution.
//!
//! Every time a card enters play the owner's whole board is re-scanned, so
//! a newly played card can complete the ally condition of a card that was
//! already in play. Each card copy fires its ally tiers at most once per
//! turn: the first scan in which at least one tier qualifies runs every
//! qualifying tier and flags the copy.
//!
//! The scan is linear in the number of in-play cards. Faction counts are
//! tallied once per call; cards without ally tiers are skipped before any
//! per-card work.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cards::{CardDefinition, Faction, Trigger};
use crate::core::{InstanceId, PlayerId};
use crate::effects::{EffectResolver, ResolverContext};
use crate::triggers::{ConditionContext, ConditionEvaluator};
use crate::zones::{Board, Zone};

use super::state::RulesState;

/// Re-scans a player's board and fires newly qualified ally tiers.
pub struct AllyResolver;

impl AllyResolver {
    /// Run the ally scan for `owner`. Returns how many cards fired.
    pub fn resolve(
        board: &mut dyn Board,
        rules: &mut RulesState,
        ctx: &mut ResolverContext<'_>,
        owner: PlayerId,
    ) -> usize {
        let in_play = Self::snapshot(&*board, owner);
        let counts = Self::faction_counts(&in_play);
        let mut fired = 0;

        for (id, definition) in &in_play {
            if !definition.has_ally_abilities() || rules.ledger.has_ally_fired(owner, *id) {
                continue;
            }
            let allies = if rules.ledger.wildcard_active(owner) {
                usize::MAX
            } else {
                Self::allies_of(definition, &counts)
            };

            let tiers: Vec<_> = {
                let cond_ctx = ConditionContext::new(owner, &*board, &rules.ledger);
                definition
                    .abilities_for(Trigger::Ally)
                    .filter(|tier| allies >= tier.min_allies as usize)
                    .filter(|tier| ConditionEvaluator::check(tier.condition.as_ref(), &cond_ctx))
                    .collect()
            };
            if tiers.is_empty() {
                continue;
            }

            // Flag first: a tier may re-enter the scan (ally_any_faction).
            rules.ledger.mark_ally_fired(owner, *id);
            fired += 1;
            debug!(%owner, card = %definition.name, tiers = tiers.len(), "ally fired");

            for tier in tiers {
                EffectResolver::new(&mut *board, &mut *rules, &mut *ctx, owner)
                    .with_source(*id)
                    .run(&tier.effects);
            }
        }
        fired
    }

    /// Other in-play cards sharing a faction with `definition`, taking the
    /// best of its factions.
    #[must_use]
    pub fn allies_of(definition: &CardDefinition, counts: &FxHashMap<Faction, usize>) -> usize {
        definition
            .faction
            .aligned()
            .map(|faction| counts.get(&faction).copied().unwrap_or(0).saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    /// Aligned faction tallies over a board snapshot.
    #[must_use]
    pub fn faction_counts(in_play: &[(InstanceId, Arc<CardDefinition>)]) -> FxHashMap<Faction, usize> {
        let mut counts = FxHashMap::default();
        for (_, definition) in in_play {
            for faction in definition.faction.aligned() {
                *counts.entry(faction).or_insert(0) += 1;
            }
        }
        counts
    }

    fn snapshot(board: &dyn Board, owner: PlayerId) -> Vec<(InstanceId, Arc<CardDefinition>)> {
        let mut ids = board.list_zone(owner, Zone::InPlay);
        ids.extend(board.list_zone(owner, Zone::Bases));
        ids.into_iter()
            .filter_map(|id| board.card(id).map(|card| (id, Arc::clone(&card.definition))))
            .collect()
    }
}
