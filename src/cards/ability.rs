//! Abilities: trigger + condition + frequency + ordered effects.
//!
//! Triggers are serialized as plain strings, with continuous hooks written
//! as `continuous:<event>`:
//!
//! ```
//! use realm_rules::cards::Trigger;
//! use realm_rules::triggers::HookEvent;
//!
//! let t: Trigger = "continuous:on_ship_played".parse().unwrap();
//! assert_eq!(t, Trigger::Continuous(HookEvent::UnitPlayed));
//! assert_eq!(t.to_string(), "continuous:on_ship_played");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ParseTriggerError;
use crate::effects::Effect;
use crate::triggers::{Condition, HookEvent};

/// When an ability fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Trigger {
    /// Resolves as the card enters play.
    OnPlay,
    /// Resolves when the owner activates it (bases, mostly).
    Activated,
    /// Resolves when the owner scraps the card from play.
    ScrapActivated,
    /// Ally tier; resolved by the ally scan.
    Ally,
    /// Resolves at the start of the owner's turn while in play.
    OnTurnStart,
    /// Registered as a hook for the event while the card is in play.
    Continuous(HookEvent),
}

impl Trigger {
    /// Whether this is a `continuous:*` trigger.
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        matches!(self, Trigger::Continuous(_))
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::OnPlay => f.write_str("on_play"),
            Trigger::Activated => f.write_str("activated"),
            Trigger::ScrapActivated => f.write_str("scrap_activated"),
            Trigger::Ally => f.write_str("ally"),
            Trigger::OnTurnStart => f.write_str("on_turn_start"),
            Trigger::Continuous(event) => write!(f, "continuous:{event}"),
        }
    }
}

impl FromStr for Trigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_play" => Ok(Trigger::OnPlay),
            "activated" => Ok(Trigger::Activated),
            "scrap_activated" => Ok(Trigger::ScrapActivated),
            "ally" => Ok(Trigger::Ally),
            "on_turn_start" => Ok(Trigger::OnTurnStart),
            other => other
                .strip_prefix("continuous:")
                .and_then(|event| event.parse().ok())
                .map(Trigger::Continuous)
                .ok_or_else(|| ParseTriggerError(other.to_string())),
        }
    }
}

impl TryFrom<String> for Trigger {
    type Error = ParseTriggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Trigger> for String {
    fn from(trigger: Trigger) -> Self {
        trigger.to_string()
    }
}

/// Stable ability identifier, unique per card. Keys the once-per-turn
/// usage ledger together with the card's instance ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(String);

impl AbilityId {
    /// Create an ability ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Frequency limit on an ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency {
    #[serde(default)]
    pub once_per_turn: bool,
}

fn one() -> u32 {
    1
}

fn is_one(value: &u32) -> bool {
    *value == 1
}

/// A single card ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// When it fires.
    pub trigger: Trigger,

    /// Identifier; required for `activated`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AbilityId>,

    /// Extra gate evaluated just before resolving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    /// Frequency limit. Absent on an activated ability means once per turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,

    /// Other same-faction cards needed for an ally tier.
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub min_allies: u32,

    /// Effects run in order.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Ability {
    /// Create an ability with no effects.
    #[must_use]
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            id: None,
            condition: None,
            frequency: None,
            min_allies: 1,
            effects: Vec::new(),
        }
    }

    /// Set the ID (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<AbilityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set an explicit frequency (builder pattern).
    #[must_use]
    pub fn with_frequency(mut self, once_per_turn: bool) -> Self {
        self.frequency = Some(Frequency { once_per_turn });
        self
    }

    /// Set the ally tier threshold (builder pattern).
    #[must_use]
    pub fn with_min_allies(mut self, min: u32) -> Self {
        self.min_allies = min;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether uses are limited to one per turn.
    #[must_use]
    pub fn is_once_per_turn(&self) -> bool {
        match self.frequency {
            Some(frequency) => frequency.once_per_turn,
            None => self.trigger == Trigger::Activated,
        }
    }
}
