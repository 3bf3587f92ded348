//! Effect vocabulary and its interpreter.
//!
//! - [`Effect`]: tagged effect data as it appears in card JSON
//! - [`CardFilter`]: which cards an effect may pick or count
//! - [`EffectResolver`]: runs effect lists against a [`crate::zones::Board`]
//! - [`ResolverContext`]: choosers and the notifier for one session
//!
//! Effects never fail. An effect that cannot do anything (no legal target,
//! a cancelled pick, an unknown tag) notifies and is skipped, and the rest
//! of the list still runs.

mod context;
mod effect;
mod filter;
mod resolver;

pub use context::ResolverContext;
pub use effect::{ChoiceOption, CountZone, Destination, Effect, ScrapSource};
pub use filter::CardFilter;
pub use resolver::EffectResolver;
