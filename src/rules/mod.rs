//! Turn bookkeeping, ally resolution and the engine facade.
//!
//! - [`TurnLedger`]: once-per-turn usage, ally flags, played-this-turn list
//!   and the ally wildcard
//! - [`AllyResolver`]: whole-board ally re-scan
//! - [`RulesState`]: hooks plus ledger, borrowed by the interpreter
//! - [`Engine`]: a [`crate::zones::Table`] and a [`crate::triggers::Dispatcher`]
//!   wired together for a caller-driven turn loop

pub mod allies;
pub mod engine;
pub mod state;
pub mod turn;

pub use allies::AllyResolver;
pub use engine::{Engine, GameResult};
pub use state::RulesState;
pub use turn::TurnLedger;
