//! Error types.
//!
//! Only load-time problems are errors. Once cards are in play, illegal picks
//! and unknown effects degrade to a notification and a no-op; see
//! [`crate::choice::Notifier`].

use thiserror::Error;

/// Rejected card data or engine configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The card JSON could not be parsed into the card shape.
    #[error("malformed card data: {0}")]
    Json(#[from] serde_json::Error),

    /// The engine config JSON could not be parsed.
    #[error("invalid engine config: {0}")]
    Config(#[source] serde_json::Error),

    /// A card record has an empty name.
    #[error("card record has an empty name")]
    MissingName,

    /// Two records share a name.
    #[error("duplicate card name `{0}`")]
    DuplicateName(String),

    /// An `activated` ability lacks the id needed for usage tracking.
    #[error("{card}: activated ability #{index} has no id")]
    MissingAbilityId { card: String, index: usize },

    /// Two activated abilities on one card share an id.
    #[error("{card}: ability id `{id}` is used twice")]
    DuplicateAbilityId { card: String, id: String },

    /// A base with zero defense could never be destroyed.
    #[error("{card}: bases need a positive defense")]
    BaseWithoutDefense { card: String },

    /// Only bases may be outposts.
    #[error("{card}: only bases can be outposts")]
    OutpostShip { card: String },

    /// A card name was looked up but never registered.
    #[error("unknown card `{0}`")]
    UnknownCard(String),
}

/// A trigger string that is not part of the trigger vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trigger `{0}`")]
pub struct ParseTriggerError(pub String);

/// A seat number outside the two-player table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no seat {0} at a two-player table")]
pub struct InvalidSeat(pub u8);

/// Why a base could not be targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The index does not name one of the opponent's bases.
    #[error("no base at that position")]
    NoSuchBase,

    /// A non-outpost base was picked while the opponent has an outpost.
    #[error("an outpost must be destroyed first")]
    OutpostFirst,

    /// The attacker's combat pool is below the base's defense.
    #[error("not enough combat: need {needed}, have {available}")]
    NotEnoughCombat { needed: i64, available: i64 },
}
