//! Zones and the board interface.
//!
//! ## Key Types
//!
//! - `Zone`: deck, hand, discard, in play, bases
//! - `Board`: what the rules core reads and mutates
//! - `ZoneManager`: card location tracking and movement
//! - `ZonePosition`: position specifier for ordered zones
//! - `Table`: in-memory `Board` with pools, trade row and scrap heap

pub mod board;
pub mod manager;
pub mod table;

pub use board::{base_target, has_outpost, Board, Zone};
pub use manager::{ZoneManager, ZonePosition};
pub use table::Table;
