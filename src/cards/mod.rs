//! Card system: templates, abilities, instances, and the registry.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Immutable template (name, factions, kind, cost, abilities)
//! - `Ability`: Trigger + optional condition/frequency + ordered effects
//! - `Trigger`: When an ability fires (`on_play`, `ally`, `continuous:<event>`, ...)
//! - `CardInstance`: One physical copy, identified by `InstanceId`
//! - `CardRegistry`: JSON loading, validation and lookup
//!
//! Templates are shared behind `Arc`. Per-copy runtime state never lives on
//! the card; see [`crate::rules::TurnLedger`].

pub mod ability;
pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use ability::{Ability, AbilityId, Frequency, Trigger};
pub use catalog::standard_registry;
pub use definition::{CardDefinition, CardId, CardKind, Faction, Factions};
pub use instance::CardInstance;
pub use registry::CardRegistry;
