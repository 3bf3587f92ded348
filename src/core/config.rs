//! Engine configuration.
//!
//! `EngineConfig` gathers the numeric house rules of a session: starting
//! authority, hand sizes, trade row width, and the re-prompt limit for
//! mandatory choices. Every field has a default, so a partial JSON document
//! only overrides what it names.
//!
//! ```
//! use realm_rules::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "starting_authority": 30 }"#).unwrap();
//! assert_eq!(config.starting_authority, 30);
//! assert_eq!(config.hand_size, 5);
//! ```

use serde::{Deserialize, Serialize};

use super::error::LoadError;
use super::player::{PlayerId, PlayerMap};

/// Session-wide rule parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Authority each player starts with.
    pub starting_authority: i64,

    /// Cards drawn at the end of every turn.
    pub hand_size: u32,

    /// Opening hand per seat. The first player draws fewer cards.
    pub opening_hands: [u32; 2],

    /// Number of face-up trade row slots.
    pub trade_row_slots: usize,

    /// How many times a mandatory pick (forced discard) is re-asked after an
    /// illegal answer before the engine picks for the player.
    pub reprompt_limit: u32,

    /// Seed for deck shuffles.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_authority: 50,
            hand_size: 5,
            opening_hands: [3, 5],
            trade_row_slots: 5,
            reprompt_limit: 8,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(LoadError::Config)
    }

    /// Set starting authority (builder pattern).
    #[must_use]
    pub fn with_starting_authority(mut self, authority: i64) -> Self {
        self.starting_authority = authority;
        self
    }

    /// Set the end-of-turn hand size (builder pattern).
    #[must_use]
    pub fn with_hand_size(mut self, size: u32) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the trade row width (builder pattern).
    #[must_use]
    pub fn with_trade_row_slots(mut self, slots: usize) -> Self {
        self.trade_row_slots = slots;
        self
    }

    /// Set the mandatory-choice re-prompt limit (builder pattern).
    #[must_use]
    pub fn with_reprompt_limit(mut self, limit: u32) -> Self {
        self.reprompt_limit = limit;
        self
    }

    /// Set the shuffle seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Opening hand size for a seat.
    #[must_use]
    pub fn opening_hand(&self, player: PlayerId) -> u32 {
        self.opening_hands[player.index()]
    }

    /// Starting authority for both players.
    #[must_use]
    pub fn authority_map(&self) -> PlayerMap<i64> {
        PlayerMap::with_value(self.starting_authority)
    }
}
