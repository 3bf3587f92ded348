//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable template of a card: name, factions,
//! kind, cost, base defense, and the ordered ability list. Templates are
//! shared behind `Arc` by every physical copy; nothing at runtime writes
//! back into them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ability::{Ability, Trigger};
use crate::effects::Effect;

/// Unique identifier for a card definition (template), assigned by the
/// registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// One of the four factions, or unaligned.
///
/// Unaligned cards (starters, Explorer) never count as allies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    #[serde(rename = "Blob")]
    Blob,
    #[serde(rename = "Trade Federation")]
    TradeFederation,
    #[serde(rename = "Machine Cult")]
    MachineCult,
    #[serde(rename = "Star Empire")]
    StarEmpire,
    #[serde(rename = "Unaligned", alias = "Neutral")]
    Unaligned,
}

impl Faction {
    /// The four ally-capable factions.
    pub const ALIGNED: [Faction; 4] = [
        Faction::Blob,
        Faction::TradeFederation,
        Faction::MachineCult,
        Faction::StarEmpire,
    ];

    /// Whether this faction can form allies.
    #[must_use]
    pub const fn is_aligned(self) -> bool {
        !matches!(self, Faction::Unaligned)
    }

    /// Display name as used in card data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Faction::Blob => "Blob",
            Faction::TradeFederation => "Trade Federation",
            Faction::MachineCult => "Machine Cult",
            Faction::StarEmpire => "Star Empire",
            Faction::Unaligned => "Unaligned",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The faction set of a card. Almost always one entry, two for
/// multi-faction cards.
///
/// In card data this is either a single string or a list of strings.
///
/// ```
/// use realm_rules::cards::{Faction, Factions};
///
/// let single: Factions = serde_json::from_str(r#""Blob""#).unwrap();
/// let dual: Factions = serde_json::from_str(r#"["Blob", "Star Empire"]"#).unwrap();
///
/// assert!(single.contains(Faction::Blob));
/// assert!(dual.shares_with(&single));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FactionsRepr", into = "FactionsRepr")]
pub struct Factions(SmallVec<[Faction; 2]>);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FactionsRepr {
    One(Faction),
    Many(Vec<Faction>),
}

impl From<FactionsRepr> for Factions {
    fn from(repr: FactionsRepr) -> Self {
        match repr {
            FactionsRepr::One(faction) => Factions::single(faction),
            FactionsRepr::Many(list) => Factions::from_iter(list),
        }
    }
}

impl From<Factions> for FactionsRepr {
    fn from(factions: Factions) -> Self {
        match factions.0.as_slice() {
            [one] => FactionsRepr::One(*one),
            many => FactionsRepr::Many(many.to_vec()),
        }
    }
}

impl Default for Factions {
    fn default() -> Self {
        Factions::single(Faction::Unaligned)
    }
}

impl FromIterator<Faction> for Factions {
    fn from_iter<I: IntoIterator<Item = Faction>>(iter: I) -> Self {
        let mut set: SmallVec<[Faction; 2]> = SmallVec::new();
        for faction in iter {
            if !set.contains(&faction) {
                set.push(faction);
            }
        }
        if set.is_empty() {
            return Factions::default();
        }
        Factions(set)
    }
}

impl Factions {
    /// A single-faction set.
    #[must_use]
    pub fn single(faction: Faction) -> Self {
        let mut set = SmallVec::new();
        set.push(faction);
        Factions(set)
    }

    /// Iterate the factions.
    pub fn iter(&self) -> impl Iterator<Item = Faction> + '_ {
        self.0.iter().copied()
    }

    /// Iterate only the ally-capable factions.
    pub fn aligned(&self) -> impl Iterator<Item = Faction> + '_ {
        self.iter().filter(|f| f.is_aligned())
    }

    /// Whether the set includes `faction`.
    #[must_use]
    pub fn contains(&self, faction: Faction) -> bool {
        self.0.contains(&faction)
    }

    /// Whether the two sets have an ally-capable faction in common.
    #[must_use]
    pub fn shares_with(&self, other: &Factions) -> bool {
        self.aligned().any(|f| other.contains(f))
    }
}

impl std::fmt::Display for Factions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, faction) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{faction}")?;
        }
        Ok(())
    }
}

/// Ships are discarded at end of turn; bases stay in play until destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Ship,
    Base,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use realm_rules::cards::{Ability, CardDefinition, CardId, CardKind, Faction, Trigger};
/// use realm_rules::effects::Effect;
///
/// let fighter = CardDefinition::new(CardId::new(1), "Blob Fighter", CardKind::Ship)
///     .with_faction(Faction::Blob)
///     .with_cost(1)
///     .with_ability(Ability::new(Trigger::OnPlay).with_effect(Effect::combat(3)))
///     .with_ability(Ability::new(Trigger::Ally).with_effect(Effect::draw(1)));
///
/// assert!(fighter.has_ally_abilities());
/// assert!(!fighter.is_base());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Registry-assigned identifier. Not part of card data.
    #[serde(skip)]
    pub id: CardId,

    /// Card name; unique within a registry.
    pub name: String,

    /// Faction set.
    #[serde(default)]
    pub faction: Factions,

    /// Ship or base.
    #[serde(rename = "type")]
    pub kind: CardKind,

    /// Trade cost to acquire.
    #[serde(default)]
    pub cost: u32,

    /// Damage needed to destroy (bases only).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub defense: u32,

    /// Outposts must be destroyed before other bases (bases only).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub outpost: bool,

    /// Ordered ability list.
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl CardDefinition {
    /// Create a new card definition with no abilities.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            faction: Factions::default(),
            kind,
            cost: 0,
            defense: 0,
            outpost: false,
            abilities: Vec::new(),
        }
    }

    /// Set a single faction (builder pattern).
    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Factions::single(faction);
        self
    }

    /// Set several factions (builder pattern).
    #[must_use]
    pub fn with_factions(mut self, factions: impl IntoIterator<Item = Faction>) -> Self {
        self.faction = factions.into_iter().collect();
        self
    }

    /// Set the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set base defense (builder pattern).
    #[must_use]
    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    /// Mark as an outpost (builder pattern).
    #[must_use]
    pub fn as_outpost(mut self) -> Self {
        self.outpost = true;
        self
    }

    /// Append an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Whether this is a base.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.kind == CardKind::Base
    }

    /// Whether this is an outpost base.
    #[must_use]
    pub fn is_outpost(&self) -> bool {
        self.is_base() && self.outpost
    }

    /// Abilities with the given trigger, in declaration order.
    pub fn abilities_for(&self, trigger: Trigger) -> impl Iterator<Item = &Ability> + '_ {
        self.abilities.iter().filter(move |a| a.trigger == trigger)
    }

    /// Continuous abilities, in declaration order.
    pub fn continuous_abilities(&self) -> impl Iterator<Item = &Ability> + '_ {
        self.abilities.iter().filter(|a| a.trigger.is_continuous())
    }

    /// Whether the card declares any ally tier.
    #[must_use]
    pub fn has_ally_abilities(&self) -> bool {
        self.abilities.iter().any(|a| a.trigger == Trigger::Ally)
    }

    /// Whether the card grants the ally wildcard while in play.
    ///
    /// A card grants it when one of its continuous abilities contains
    /// `ally_any_faction`.
    #[must_use]
    pub fn grants_ally_wildcard(&self) -> bool {
        self.continuous_abilities()
            .any(|a| a.effects.iter().any(|e| matches!(e, Effect::AllyAnyFaction)))
    }
}
