//! Deterministic policy chooser for headless and AI seats.

use super::chooser::{Candidate, Chooser, Pile};

/// Always takes the first legal answer.
///
/// - Targets: the first legal candidate.
/// - Piles: the discard pile when allowed (thinning dead cards costs nothing
///   this turn), otherwise the hand.
/// - Options: the first option.
///
/// When `optional` picks are declined, the policy cancels every
/// cancellable prompt (scraps, trade row destruction) and only answers
/// mandatory ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyChooser {
    decline_optional: bool,
}

impl PolicyChooser {
    /// A policy that accepts every optional pick.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decline_optional: false,
        }
    }

    /// A policy that skips optional picks.
    #[must_use]
    pub const fn declining() -> Self {
        Self {
            decline_optional: true,
        }
    }
}

impl Chooser for PolicyChooser {
    fn choose_index(&mut self, _prompt: &str, candidates: &[Candidate], cancellable: bool) -> Option<usize> {
        if cancellable && self.decline_optional {
            return None;
        }
        candidates.iter().position(|c| c.legal)
    }

    fn choose_pile(&mut self, _prompt: &str, can_hand: bool, can_discard: bool, cancellable: bool) -> Option<Pile> {
        if cancellable && self.decline_optional {
            return None;
        }
        if can_discard {
            Some(Pile::Discard)
        } else if can_hand {
            Some(Pile::Hand)
        } else {
            None
        }
    }

    fn choose_option(&mut self, _prompt: &str, labels: &[String], _cancellable: bool) -> Option<usize> {
        (!labels.is_empty()).then_some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_legal_candidate() {
        let mut policy = PolicyChooser::new();
        let candidates = [
            Candidate::illegal("Barter World"),
            Candidate::legal("Trading Post"),
            Candidate::legal("Space Station"),
        ];
        assert_eq!(policy.choose_index("target", &candidates, true), Some(1));
        assert_eq!(policy.choose_index("target", &[Candidate::illegal("x")], false), None);
    }

    #[test]
    fn test_prefers_discard_pile() {
        let mut policy = PolicyChooser::new();
        assert_eq!(policy.choose_pile("scrap", true, true, true), Some(Pile::Discard));
        assert_eq!(policy.choose_pile("scrap", true, false, true), Some(Pile::Hand));
        assert_eq!(policy.choose_pile("scrap", false, false, true), None);
    }

    #[test]
    fn test_declining_only_skips_optional() {
        let mut policy = PolicyChooser::declining();
        let candidates = [Candidate::legal("Scout")];
        assert_eq!(policy.choose_index("scrap", &candidates, true), None);
        assert_eq!(policy.choose_index("discard", &candidates, false), Some(0));
        assert_eq!(policy.choose_pile("scrap", true, true, true), None);
    }

    #[test]
    fn test_first_option() {
        let mut policy = PolicyChooser::new();
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(policy.choose_option("pick", &labels, false), Some(0));
        assert_eq!(policy.choose_option("pick", &[], false), None);
    }
}
