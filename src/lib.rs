//! # realm-rules
//!
//! Ability and effect resolution for a two-player space deckbuilding card
//! game.
//!
//! ## Design Principles
//!
//! 1. **Cards are data**: every card is a JSON record whose abilities are a
//!    trigger, an optional condition, an optional frequency and an ordered
//!    list of effects from a closed vocabulary.
//!
//! 2. **Templates are immutable**: card definitions are shared behind `Arc`.
//!    Runtime flags (ability used, ally fired) live in a side table keyed by
//!    instance ID.
//!
//! 3. **Degrade, don't fail**: illegal picks, cancelled choices and unknown
//!    effects notify the players and are skipped. Only card loading returns
//!    errors.
//!
//! ## Architecture
//!
//! - The outer loop (or [`rules::Engine`]) tells the [`triggers::Dispatcher`]
//!   when cards enter or leave play, turns start and end, and abilities are
//!   invoked.
//! - The dispatcher hands effect lists to the [`effects::EffectResolver`],
//!   which mutates the [`zones::Board`] and asks [`choice::Chooser`]s for
//!   decisions.
//! - Every entry re-scans the owner's board for newly qualified allies
//!   ([`rules::AllyResolver`]).
//!
//! ## Modules
//!
//! - `core`: Instance IDs, players, RNG, configuration, errors
//! - `cards`: Card definitions, abilities, instances, registry, catalog
//! - `effects`: Effect vocabulary and interpreter
//! - `triggers`: Conditions, continuous hooks, dispatcher
//! - `rules`: Turn ledger, ally resolver, engine facade
//! - `zones`: Board interface, zone manager, reference table
//! - `choice`: Choosers and notifiers

pub mod cards;
pub mod choice;
pub mod core;
pub mod effects;
pub mod rules;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{EngineConfig, GameRng, InstanceId, LoadError, PlayerId, PlayerMap, TargetError};

pub use crate::cards::{
    Ability, AbilityId, CardDefinition, CardId, CardInstance, CardKind, CardRegistry, Faction, Factions,
    Trigger,
};

pub use crate::effects::{CardFilter, Effect, EffectResolver, ResolverContext};

pub use crate::triggers::{Activation, Condition, Dispatcher, HookEvent, HookRegistry, ScrapActivation};

pub use crate::rules::{AllyResolver, Engine, GameResult, RulesState, TurnLedger};

pub use crate::zones::{Board, Table, Zone, ZoneManager, ZonePosition};

pub use crate::choice::{Chooser, NotificationLog, Notifier, PolicyChooser, ScriptedChooser};
