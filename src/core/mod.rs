//! Core engine types: instance IDs, players, RNG, configuration, errors.
//!
//! Everything here is independent of the card vocabulary; the card, effect
//! and trigger modules build on these.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{InstanceAllocator, InstanceId};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::EngineConfig;
pub use error::{InvalidSeat, LoadError, ParseTriggerError, TargetError};
