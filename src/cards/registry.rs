//! Card registry: loading, validation and lookup of card templates.
//!
//! Card data arrives as a JSON array of card records. Loading is
//! all-or-nothing: every record in a batch is parsed and validated before any
//! is registered.
//!
//! Effect tags outside the effect vocabulary are not a load error. They are
//! logged here and kept as [`Effect::Unknown`], which the interpreter reports
//! and skips when it reaches them.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::LoadError;
use crate::effects::Effect;

use super::ability::Trigger;
use super::definition::{CardDefinition, CardId, CardKind};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use realm_rules::cards::CardRegistry;
///
/// let registry = CardRegistry::from_json(r#"[
///     {"name": "Scout", "type": "ship",
///      "abilities": [{"trigger": "on_play", "effects": [{"type": "trade", "amount": 1}]}]}
/// ]"#).unwrap();
///
/// let scout = registry.by_name("Scout").unwrap();
/// assert_eq!(scout.cost, 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
    by_name: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a JSON array of card records.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        registry.load_json(json)?;
        Ok(registry)
    }

    /// Parse, validate and register a JSON array of card records.
    ///
    /// Returns the assigned IDs in record order. On error nothing is
    /// registered.
    pub fn load_json(&mut self, json: &str) -> Result<Vec<CardId>, LoadError> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        let mut batch = Vec::with_capacity(records.len());

        for record in records {
            let name = record
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>")
                .to_string();
            let mut unknown = Vec::new();
            collect_unknown_effects(&record, &mut unknown);
            for tag in unknown {
                warn!(card = %name, tag = %tag, "unknown effect type will be skipped at runtime");
            }

            let card: CardDefinition = serde_json::from_value(record)?;
            Self::validate(&card)?;
            let duplicate = self.by_name.contains_key(&card.name)
                || batch.iter().any(|c: &CardDefinition| c.name == card.name);
            if duplicate {
                return Err(LoadError::DuplicateName(card.name));
            }
            batch.push(card);
        }

        Ok(batch.into_iter().map(|card| self.insert(card)).collect())
    }

    /// Validate and register a single definition, assigning its ID.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId, LoadError> {
        Self::validate(&card)?;
        if self.by_name.contains_key(&card.name) {
            return Err(LoadError::DuplicateName(card.name));
        }
        Ok(self.insert(card))
    }

    fn insert(&mut self, mut card: CardDefinition) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        card.id = id;
        debug!(card = %card.name, %id, "registered card");
        self.by_name.insert(card.name.clone(), id);
        self.cards.insert(id, Arc::new(card));
        id
    }

    /// Check the structural rules the dispatcher relies on.
    pub fn validate(card: &CardDefinition) -> Result<(), LoadError> {
        if card.name.trim().is_empty() {
            return Err(LoadError::MissingName);
        }

        let mut seen: Vec<&str> = Vec::new();
        for (index, ability) in card.abilities.iter().enumerate() {
            if ability.trigger != Trigger::Activated {
                continue;
            }
            let Some(id) = &ability.id else {
                return Err(LoadError::MissingAbilityId {
                    card: card.name.clone(),
                    index,
                });
            };
            if seen.contains(&id.as_str()) {
                return Err(LoadError::DuplicateAbilityId {
                    card: card.name.clone(),
                    id: id.to_string(),
                });
            }
            seen.push(id.as_str());
        }

        match card.kind {
            CardKind::Base if card.defense == 0 => Err(LoadError::BaseWithoutDefense {
                card: card.name.clone(),
            }),
            CardKind::Ship if card.outpost => Err(LoadError::OutpostShip {
                card: card.name.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(&id)
    }

    /// Get a template by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<CardDefinition>> {
        self.by_name.get(name).and_then(|id| self.cards.get(id))
    }

    /// Get a template by name, or `LoadError::UnknownCard`.
    pub fn require(&self, name: &str) -> Result<Arc<CardDefinition>, LoadError> {
        self.by_name(name)
            .cloned()
            .ok_or_else(|| LoadError::UnknownCard(name.to_string()))
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate all templates (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }
}

/// Collect effect tags that fall outside the vocabulary, at any nesting
/// depth of a card record.
fn collect_unknown_effects(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if matches!(key.as_str(), "effects" | "then" | "else") {
                    if let Value::Array(items) = child {
                        for tag in items
                            .iter()
                            .filter_map(|item| item.get("type").and_then(Value::as_str))
                        {
                            if !Effect::TAGS.contains(&tag) {
                                out.push(tag.to_string());
                            }
                        }
                    }
                }
                collect_unknown_effects(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_unknown_effects(item, out);
            }
        }
        _ => {}
    }
}
