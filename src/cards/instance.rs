//! Card instances - one physical copy of a template.
//!
//! An instance is just identity plus a shared pointer to the template and
//! the owning seat. Runtime flags (ability used, ally fired) are not stored
//! here; they live in [`crate::rules::TurnLedger`] keyed by the instance ID,
//! so templates and instances stay immutable.

use std::sync::Arc;

use crate::core::{InstanceId, PlayerId};

use super::definition::{CardDefinition, CardKind, Factions};

/// A card copy in a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInstance {
    /// Unique ID for this copy.
    pub id: InstanceId,

    /// Shared template.
    pub definition: Arc<CardDefinition>,

    /// Deck owner. `None` for trade row / trade deck cards not yet acquired.
    pub owner: Option<PlayerId>,
}

impl CardInstance {
    /// Create an instance of a template.
    #[must_use]
    pub fn new(id: InstanceId, definition: Arc<CardDefinition>, owner: Option<PlayerId>) -> Self {
        Self {
            id,
            definition,
            owner,
        }
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Faction set.
    #[must_use]
    pub fn factions(&self) -> &Factions {
        &self.definition.faction
    }

    /// Ship or base.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.definition.kind
    }

    /// Whether this copy is a base.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.definition.is_base()
    }

    /// Whether this copy is an outpost.
    #[must_use]
    pub fn is_outpost(&self) -> bool {
        self.definition.is_outpost()
    }
}
