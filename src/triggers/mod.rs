//! Conditions, continuous hooks and the trigger dispatcher.
//!
//! ## Key Components
//!
//! - [`Condition`]: board-state gate on an ability or `if` effect
//! - [`HookEvent`]: events continuous hooks subscribe to
//! - [`HookRegistry`]: per-owner, per-event hook lists keyed by source card
//! - [`Dispatcher`]: routes enter/leave play, turn boundaries, activation
//!   and ship-played events to abilities
//!
//! ## Example Usage
//!
//! ```
//! use realm_rules::core::{InstanceId, PlayerId};
//! use realm_rules::effects::Effect;
//! use realm_rules::triggers::{HookEvent, HookRegistry};
//!
//! let mut hooks = HookRegistry::new();
//! let fleet_hq = InstanceId::new(12);
//!
//! // "Whenever you play a ship, gain 1 combat" while Fleet HQ is in play.
//! hooks.register(PlayerId::FIRST, HookEvent::UnitPlayed, fleet_hq, vec![Effect::combat(1)]);
//! assert_eq!(hooks.count(PlayerId::FIRST, HookEvent::UnitPlayed), 1);
//!
//! // Fleet HQ is destroyed: nothing it registered can fire again.
//! assert_eq!(hooks.unregister_all(PlayerId::FIRST, fleet_hq), 1);
//! assert!(hooks.is_empty());
//! ```

mod condition;
mod dispatcher;
mod event;
mod registry;

pub use condition::{Condition, ConditionContext, ConditionEvaluator, Scope};
pub use dispatcher::{Activation, Dispatcher, ScrapActivation};
pub use event::HookEvent;
pub use registry::{Hook, HookId, HookRegistry};
