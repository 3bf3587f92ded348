//! The chooser capability.
//!
//! Every effect that needs a decision asks a [`Chooser`]. A session picks one
//! implementation per seat up front (an interactive front end, a policy, a
//! scripted replay) and passes it in through
//! [`crate::effects::ResolverContext`]. The core never probes what kind of
//! chooser it has.

use serde::{Deserialize, Serialize};

/// A pickable item shown to the chooser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Human-readable label (usually a card name).
    pub label: String,
    /// Whether the rules allow picking it. Illegal candidates are still
    /// listed so positions stay stable; picking one is rejected.
    pub legal: bool,
}

impl Candidate {
    /// A pickable candidate.
    #[must_use]
    pub fn legal(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            legal: true,
        }
    }

    /// A listed but unpickable candidate.
    #[must_use]
    pub fn illegal(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            legal: false,
        }
    }
}

/// Which pile a scrap takes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pile {
    Hand,
    Discard,
}

/// Decision maker for one seat.
///
/// Returning `None` cancels. Returning an index out of range (or of an
/// illegal candidate) is treated like a mis-click: the effect notifies and
/// does nothing, except for mandatory picks, which ask again.
pub trait Chooser {
    /// Pick one of `candidates`.
    fn choose_index(&mut self, prompt: &str, candidates: &[Candidate], cancellable: bool) -> Option<usize>;

    /// Pick the hand or the discard pile.
    fn choose_pile(&mut self, prompt: &str, can_hand: bool, can_discard: bool, cancellable: bool) -> Option<Pile>;

    /// Pick one of several labeled options.
    fn choose_option(&mut self, prompt: &str, labels: &[String], cancellable: bool) -> Option<usize>;
}
