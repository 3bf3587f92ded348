//! Events that continuous hooks subscribe to.
//!
//! The event vocabulary is closed. In card data an event appears after the
//! `continuous:` trigger prefix, e.g. `continuous:on_ship_played`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ParseTriggerError;

/// A recurring event a continuous hook can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HookEvent {
    /// A ship entered play for the hook's owner (`on_ship_played`).
    #[serde(rename = "on_ship_played")]
    UnitPlayed,

    /// Ally checks for the owner (`modify_ally_checks`).
    ///
    /// Never fired. Cards subscribe with `ally_any_faction` to mark
    /// themselves as wildcard auras; the dispatcher counts them instead.
    #[serde(rename = "modify_ally_checks")]
    AllyChecks,
}

impl HookEvent {
    /// Name as written in card data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HookEvent::UnitPlayed => "on_ship_played",
            HookEvent::AllyChecks => "modify_ally_checks",
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookEvent {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_ship_played" => Ok(HookEvent::UnitPlayed),
            "modify_ally_checks" => Ok(HookEvent::AllyChecks),
            other => Err(ParseTriggerError(other.to_string())),
        }
    }
}
