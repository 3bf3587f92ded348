//! Ability conditions.
//!
//! A condition gates an ability (or an `if` effect) on board state. The
//! vocabulary currently has one variant:
//!
//! ```json
//! {"faction_in_play": {"faction": "Blob", "min": 1, "scope": "this_turn"}}
//! ```
//!
//! While the owner has an ally wildcard active, every faction condition holds.

use serde::{Deserialize, Serialize};

use crate::cards::Faction;
use crate::core::PlayerId;
use crate::rules::TurnLedger;
use crate::zones::{Board, Zone};

/// Which cards a faction count looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Cards the owner played this turn, wherever they are now.
    #[default]
    ThisTurn,
    /// Cards currently in the owner's in-play and bases zones.
    InPlay,
}

fn one() -> u32 {
    1
}

/// A gate on an ability or `if` effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// At least `min` cards of `faction` within `scope`.
    FactionInPlay {
        faction: Faction,
        #[serde(default = "one")]
        min: u32,
        #[serde(default)]
        scope: Scope,
    },
}

impl Condition {
    /// Faction count condition over cards played this turn.
    #[must_use]
    pub fn faction_played(faction: Faction, min: u32) -> Self {
        Self::FactionInPlay {
            faction,
            min,
            scope: Scope::ThisTurn,
        }
    }

    /// Faction count condition over cards currently in play.
    #[must_use]
    pub fn faction_in_play(faction: Faction, min: u32) -> Self {
        Self::FactionInPlay {
            faction,
            min,
            scope: Scope::InPlay,
        }
    }
}

/// Read-only view used to evaluate conditions.
pub struct ConditionContext<'a> {
    /// Whose board the condition looks at.
    pub owner: PlayerId,
    /// Zone contents.
    pub board: &'a dyn Board,
    /// Played-this-turn list and wildcard state.
    pub ledger: &'a TurnLedger,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(owner: PlayerId, board: &'a dyn Board, ledger: &'a TurnLedger) -> Self {
        Self {
            owner,
            board,
            ledger,
        }
    }
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext) -> bool {
        match condition {
            Condition::FactionInPlay {
                faction,
                min,
                scope,
            } => {
                if ctx.ledger.wildcard_active(ctx.owner) {
                    return true;
                }
                Self::count_faction(*faction, *scope, ctx) >= *min as usize
            }
        }
    }

    /// Check an optional condition; `None` always holds.
    pub fn check(condition: Option<&Condition>, ctx: &ConditionContext) -> bool {
        condition.map_or(true, |c| Self::evaluate(c, ctx))
    }

    fn count_faction(faction: Faction, scope: Scope, ctx: &ConditionContext) -> usize {
        let matches = |id| {
            ctx.board
                .card(id)
                .is_some_and(|card| card.factions().contains(faction))
        };
        match scope {
            Scope::ThisTurn => ctx
                .ledger
                .played_this_turn(ctx.owner)
                .iter()
                .copied()
                .filter(|&id| matches(id))
                .count(),
            Scope::InPlay => ctx
                .board
                .list_zone(ctx.owner, Zone::InPlay)
                .into_iter()
                .chain(ctx.board.list_zone(ctx.owner, Zone::Bases))
                .filter(|&id| matches(id))
                .count(),
        }
    }
}
