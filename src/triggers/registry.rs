//! Continuous hook registry.
//!
//! A hook is a `(source card, effect list)` pair subscribed to an event for
//! one owner while the source is in play. Hooks are added when the source
//! enters play and removed in one pass when it leaves; there is no other way
//! for a hook to disappear, and no way for one to outlive its source.
//!
//! Firing lives in [`super::Dispatcher::fire`], which needs the interpreter.
//! The registry hands out a snapshot of hook IDs in registration order and
//! the dispatcher re-checks each ID before running it, so a hook removed
//! mid-fire never runs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{InstanceId, PlayerId};
use crate::effects::Effect;

use super::event::HookEvent;

/// Unique identifier for a registered hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookId(pub u32);

impl HookId {
    /// Create a new hook ID.
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

impl std::fmt::Display for HookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hook({})", self.0)
    }
}

/// A registered continuous hook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    pub id: HookId,
    /// Player whose events trigger the hook and who resolves its effects.
    pub owner: PlayerId,
    pub event: HookEvent,
    /// Card whose presence in play keeps the hook alive.
    pub source: InstanceId,
    pub effects: Vec<Effect>,
}

/// Per-owner, per-event hook table.
#[derive(Clone, Debug, Default)]
pub struct HookRegistry {
    hooks: FxHashMap<HookId, Hook>,

    /// Registration order per (owner, event).
    by_event: FxHashMap<(PlayerId, HookEvent), Vec<HookId>>,

    next_id: u32,
}

impl HookRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook for `owner`'s `event`, kept alive by `source`.
    pub fn register(
        &mut self,
        owner: PlayerId,
        event: HookEvent,
        source: InstanceId,
        effects: Vec<Effect>,
    ) -> HookId {
        let id = HookId::new(self.next_id);
        self.next_id += 1;

        self.by_event.entry((owner, event)).or_default().push(id);
        self.hooks.insert(
            id,
            Hook {
                id,
                owner,
                event,
                source,
                effects,
            },
        );
        trace!(%owner, %event, %source, %id, "registered hook");
        id
    }

    /// Remove every hook of `owner` whose source is `source`.
    ///
    /// Returns how many hooks were removed.
    pub fn unregister_all(&mut self, owner: PlayerId, source: InstanceId) -> usize {
        let before = self.hooks.len();
        self.hooks
            .retain(|_, hook| !(hook.owner == owner && hook.source == source));
        let removed = before - self.hooks.len();

        if removed > 0 {
            let hooks = &self.hooks;
            self.by_event.retain(|(event_owner, _), ids| {
                if *event_owner == owner {
                    ids.retain(|id| hooks.contains_key(id));
                }
                !ids.is_empty()
            });
            trace!(%owner, %source, removed, "unregistered hooks");
        }
        removed
    }

    /// Hook IDs for `owner`'s `event`, in registration order.
    #[must_use]
    pub fn snapshot(&self, owner: PlayerId, event: HookEvent) -> Vec<HookId> {
        self.by_event
            .get(&(owner, event))
            .cloned()
            .unwrap_or_default()
    }

    /// Get a hook by ID.
    #[must_use]
    pub fn get(&self, id: HookId) -> Option<&Hook> {
        self.hooks.get(&id)
    }

    /// Whether the hook is still registered.
    #[must_use]
    pub fn contains(&self, id: HookId) -> bool {
        self.hooks.contains_key(&id)
    }

    /// Hooks kept alive by `source`.
    pub fn hooks_for_source(&self, source: InstanceId) -> impl Iterator<Item = &Hook> {
        self.hooks.values().filter(move |hook| hook.source == source)
    }

    /// Number of hooks registered for `owner`'s `event`.
    #[must_use]
    pub fn count(&self, owner: PlayerId, event: HookEvent) -> usize {
        self.by_event.get(&(owner, event)).map_or(0, Vec::len)
    }

    /// Total hook count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
