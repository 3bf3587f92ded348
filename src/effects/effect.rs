//! Effect definitions.
//!
//! Effects are the primitive actions an ability performs, in order. The
//! vocabulary is closed: every card effect is one of the variants below and
//! the interpreter matches on all of them. Card data writes them as
//! internally tagged JSON objects:
//!
//! ```
//! use realm_rules::effects::Effect;
//!
//! let effect: Effect = serde_json::from_str(r#"{"type": "combat", "amount": 3}"#).unwrap();
//! assert_eq!(effect, Effect::combat(3));
//!
//! // Tags outside the vocabulary survive loading and are skipped at runtime.
//! let odd: Effect = serde_json::from_str(r#"{"type": "time_warp"}"#).unwrap();
//! assert_eq!(odd, Effect::Unknown);
//! ```

use serde::{Deserialize, Serialize};

use crate::triggers::{Condition, HookEvent};
use crate::zones::Zone;

use super::filter::CardFilter;

fn one() -> u32 {
    1
}

/// Where a scrap effect may take cards from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapSource {
    Hand,
    Discard,
    /// Either pile; the player picks per card.
    #[default]
    HandOrDiscard,
}

impl ScrapSource {
    /// Whether hand cards are eligible.
    #[must_use]
    pub const fn allows_hand(self) -> bool {
        matches!(self, ScrapSource::Hand | ScrapSource::HandOrDiscard)
    }

    /// Whether discard pile cards are eligible.
    #[must_use]
    pub const fn allows_discard(self) -> bool {
        matches!(self, ScrapSource::Discard | ScrapSource::HandOrDiscard)
    }
}

/// Where a freely acquired card is put.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    #[default]
    Discard,
    Hand,
    DeckTop,
}

/// What a `count` effect counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountZone {
    /// Cards the actor played this turn.
    PlayedThisTurn,
    /// Ships and bases the actor has in play.
    InPlay,
    /// One of the actor's own zones.
    Zone(Zone),
}

/// One labeled branch of a `choose_one`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl ChoiceOption {
    /// Create an option (builder pattern entry point).
    #[must_use]
    pub fn new(label: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            label: label.into(),
            effects,
        }
    }
}

/// A primitive card effect.
///
/// ## Resources
/// `Trade`, `Combat`, `Authority` add to the actor's pools.
///
/// ## Cards
/// `Draw`, `OpponentDiscards`, `DiscardThenDraw`, `Scrap`.
///
/// ## Board
/// `DestroyBase` (outpost-first), `DestroyTradeRow`, `AcquireFree`,
/// `TopdeckNextPurchase`.
///
/// ## Composite
/// `ChooseOne`, `If`, `Repeat`, `Count` recurse into the interpreter before
/// the outer list continues.
///
/// ## Auras
/// `RegisterHook`, `UnregisterHooks`, `AllyAnyFaction`, `PerUnitCombat`,
/// `CopyUnit` work with the acting card's identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    // === Resources ===
    Trade {
        amount: i64,
    },
    Combat {
        amount: i64,
    },
    Authority {
        amount: i64,
    },

    // === Cards ===
    Draw {
        #[serde(default = "one")]
        amount: u32,
    },

    /// The opponent must discard this many cards (one pick each).
    #[serde(alias = "discard")]
    OpponentDiscards {
        #[serde(default = "one")]
        amount: u32,
    },

    /// Discard up to `amount` cards, then draw as many as were discarded.
    DiscardThenDraw {
        amount: u32,
    },

    /// Scrap up to `amount` cards; `then` runs once per card scrapped.
    Scrap {
        #[serde(default = "one")]
        amount: u32,
        #[serde(default)]
        from: ScrapSource,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        then: Vec<Effect>,
    },

    // === Board ===
    /// Destroy one of the opponent's bases, outposts first.
    DestroyBase,

    /// Scrap a card from the trade row.
    DestroyTradeRow {
        #[serde(default, skip_serializing_if = "CardFilter::is_any")]
        filter: CardFilter,
    },

    /// Take a trade row card for free.
    AcquireFree {
        #[serde(default, skip_serializing_if = "CardFilter::is_any")]
        filter: CardFilter,
        #[serde(default)]
        destination: Destination,
    },

    /// The actor's next acquired card goes on top of their deck.
    TopdeckNextPurchase,

    // === Composite ===
    ChooseOne {
        options: Vec<ChoiceOption>,
    },

    If {
        condition: Condition,
        #[serde(default)]
        then: Vec<Effect>,
        #[serde(default, rename = "else")]
        otherwise: Vec<Effect>,
    },

    Repeat {
        times: u32,
        effects: Vec<Effect>,
    },

    /// Count matching cards, then run `effects` that many times.
    Count {
        zone: CountZone,
        #[serde(default, skip_serializing_if = "CardFilter::is_any")]
        filter: CardFilter,
        effects: Vec<Effect>,
    },

    // === Auras ===
    /// Subscribe `effects` to an event while the acting card stays in play.
    RegisterHook {
        event: HookEvent,
        effects: Vec<Effect>,
    },

    /// Drop every hook the acting card registered.
    UnregisterHooks,

    /// Every faction counts as matching for ally checks. As an aura (under a
    /// `continuous:` trigger) it lasts while the card is in play; resolved
    /// directly it lasts until the end of the turn.
    AllyAnyFaction,

    /// Each ship played later this turn adds `amount` combat.
    PerUnitCombat {
        amount: i64,
    },

    /// Re-run another in-play ship's on-play abilities.
    CopyUnit,

    /// Any tag not listed above.
    #[serde(other)]
    Unknown,
}

impl Effect {
    /// Every JSON tag the vocabulary understands.
    pub const TAGS: &'static [&'static str] = &[
        "trade",
        "combat",
        "authority",
        "draw",
        "opponent_discards",
        "discard",
        "discard_then_draw",
        "scrap",
        "destroy_base",
        "destroy_trade_row",
        "acquire_free",
        "topdeck_next_purchase",
        "choose_one",
        "if",
        "repeat",
        "count",
        "register_hook",
        "unregister_hooks",
        "ally_any_faction",
        "per_unit_combat",
        "copy_unit",
    ];

    /// Gain trade.
    #[must_use]
    pub fn trade(amount: i64) -> Self {
        Self::Trade { amount }
    }

    /// Gain combat.
    #[must_use]
    pub fn combat(amount: i64) -> Self {
        Self::Combat { amount }
    }

    /// Gain authority.
    #[must_use]
    pub fn authority(amount: i64) -> Self {
        Self::Authority { amount }
    }

    /// Draw cards.
    #[must_use]
    pub fn draw(amount: u32) -> Self {
        Self::Draw { amount }
    }

    /// Opponent discards cards.
    #[must_use]
    pub fn opponent_discards(amount: u32) -> Self {
        Self::OpponentDiscards { amount }
    }

    /// Scrap up to `amount` cards from `from`.
    #[must_use]
    pub fn scrap(amount: u32, from: ScrapSource) -> Self {
        Self::Scrap {
            amount,
            from,
            then: Vec::new(),
        }
    }

    /// Choose one of several labeled effect lists.
    #[must_use]
    pub fn choose_one(options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        Self::ChooseOne {
            options: options.into_iter().collect(),
        }
    }

    /// Conditional branch.
    #[must_use]
    pub fn when(condition: Condition, then: Vec<Effect>, otherwise: Vec<Effect>) -> Self {
        Self::If {
            condition,
            then,
            otherwise,
        }
    }

    /// Run `effects` `times` times.
    #[must_use]
    pub fn repeat(times: u32, effects: Vec<Effect>) -> Self {
        Self::Repeat { times, effects }
    }

    /// Nested effect lists, for walking the effect tree.
    #[must_use]
    pub fn nested(&self) -> Vec<&[Effect]> {
        match self {
            Effect::Scrap { then, .. } => vec![then.as_slice()],
            Effect::ChooseOne { options } => options.iter().map(|o| o.effects.as_slice()).collect(),
            Effect::If {
                then, otherwise, ..
            } => vec![then.as_slice(), otherwise.as_slice()],
            Effect::Repeat { effects, .. }
            | Effect::Count { effects, .. }
            | Effect::RegisterHook { effects, .. } => vec![effects.as_slice()],
            _ => Vec::new(),
        }
    }

    /// Whether the effect needs a player pick to resolve.
    #[must_use]
    pub fn needs_choice(&self) -> bool {
        matches!(
            self,
            Effect::OpponentDiscards { .. }
                | Effect::DiscardThenDraw { .. }
                | Effect::Scrap { .. }
                | Effect::DestroyBase
                | Effect::DestroyTradeRow { .. }
                | Effect::AcquireFree { .. }
                | Effect::ChooseOne { .. }
                | Effect::CopyUnit
        )
    }
}
