//! Card filters for effects that pick or count cards.
//!
//! A filter is a conjunction of optional constraints; the empty filter
//! matches every card.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardKind, Faction};

/// Constraints on a card template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CardKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CardFilter {
    /// The filter that matches everything.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Whether this is the match-everything filter.
    #[must_use]
    pub fn is_any(&self) -> bool {
        *self == Self::default()
    }

    /// Require a card kind (builder pattern).
    #[must_use]
    pub fn with_kind(mut self, kind: CardKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require a faction (builder pattern).
    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    /// Require cost at most `max` (builder pattern).
    #[must_use]
    pub fn with_max_cost(mut self, max: u32) -> Self {
        self.max_cost = Some(max);
        self
    }

    /// Check a template against every constraint.
    #[must_use]
    pub fn matches(&self, card: &CardDefinition) -> bool {
        self.kind.map_or(true, |kind| card.kind == kind)
            && self.faction.map_or(true, |f| card.faction.contains(f))
            && self.max_cost.map_or(true, |max| card.cost <= max)
            && self.name.as_deref().map_or(true, |name| card.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn pod() -> CardDefinition {
        CardDefinition::new(CardId::new(1), "Trade Pod", CardKind::Ship)
            .with_faction(Faction::Blob)
            .with_cost(2)
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(CardFilter::any().is_any());
        assert!(CardFilter::any().matches(&pod()));
    }

    #[test]
    fn test_constraints_are_conjunctive() {
        let filter = CardFilter::any()
            .with_kind(CardKind::Ship)
            .with_faction(Faction::Blob)
            .with_max_cost(2);
        assert!(filter.matches(&pod()));
        assert!(!filter.clone().with_max_cost(1).matches(&pod()));
        assert!(!filter.with_kind(CardKind::Base).matches(&pod()));
    }

    #[test]
    fn test_json() {
        let filter: CardFilter = serde_json::from_str(r#"{"kind": "ship"}"#).unwrap();
        assert_eq!(filter, CardFilter::any().with_kind(CardKind::Ship));
        assert_eq!(serde_json::to_string(&filter).unwrap(), r#"{"kind":"ship"}"#);
    }
}
