//! Mutable rules state shared by the dispatcher and the interpreter.

use tracing::trace;

use crate::cards::CardDefinition;
use crate::core::{InstanceId, PlayerId};
use crate::triggers::HookRegistry;

use super::turn::TurnLedger;

/// Hook registry plus turn ledger.
///
/// Kept apart from the board so the interpreter can borrow both mutably at
/// the same time.
#[derive(Clone, Debug, Default)]
pub struct RulesState {
    pub hooks: HookRegistry,
    pub ledger: TurnLedger,
}

impl RulesState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookkeeping for a card leaving play: drop its hooks, its wildcard
    /// aura and its ally flag.
    pub fn card_left_play(&mut self, owner: PlayerId, card: InstanceId, definition: &CardDefinition) {
        let hooks = self.hooks.unregister_all(owner, card);
        let wildcard = definition.grants_ally_wildcard() && self.ledger.remove_wildcard_source(owner, card);
        self.ledger.forget_ally(owner, card);
        trace!(%owner, %card, hooks, wildcard, "card left play");
    }
}
