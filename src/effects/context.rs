//! Per-session decision and output context.
//!
//! `ResolverContext` is built once when a session starts and passed by
//! reference into every dispatcher and interpreter call. It holds the
//! notification sink and one chooser per seat; a seat without an explicit
//! chooser falls back to [`PolicyChooser`].

use tracing::debug;

use crate::choice::{Chooser, Notifier, PolicyChooser};
use crate::core::{EngineConfig, PlayerId, PlayerMap};

/// Choosers, notifier and limits for resolving effects.
///
/// ```
/// use realm_rules::choice::{NotificationLog, ScriptedChooser};
/// use realm_rules::core::PlayerId;
/// use realm_rules::effects::ResolverContext;
///
/// let mut log = NotificationLog::new();
/// let mut human = ScriptedChooser::indices([0]);
/// let mut ctx = ResolverContext::new(&mut log).with_chooser(PlayerId::FIRST, &mut human);
///
/// ctx.notify("hello");
/// assert_eq!(ctx.reprompt_limit(), 8);
/// ```
pub struct ResolverContext<'a> {
    notifier: &'a mut dyn Notifier,
    seats: PlayerMap<Option<&'a mut dyn Chooser>>,
    fallback: PolicyChooser,
    reprompt_limit: u32,
}

impl<'a> ResolverContext<'a> {
    /// Create a context where both seats use the default policy.
    pub fn new(notifier: &'a mut dyn Notifier) -> Self {
        Self {
            notifier,
            seats: PlayerMap::new(|_| None),
            fallback: PolicyChooser::new(),
            reprompt_limit: EngineConfig::default().reprompt_limit,
        }
    }

    /// Create a context using the limits from `config`.
    pub fn from_config(notifier: &'a mut dyn Notifier, config: &EngineConfig) -> Self {
        Self::new(notifier).with_reprompt_limit(config.reprompt_limit)
    }

    /// Seat a chooser (builder pattern).
    #[must_use]
    pub fn with_chooser(mut self, player: PlayerId, chooser: &'a mut dyn Chooser) -> Self {
        self.seats[player] = Some(chooser);
        self
    }

    /// Replace the fallback policy (builder pattern).
    #[must_use]
    pub fn with_fallback(mut self, policy: PolicyChooser) -> Self {
        self.fallback = policy;
        self
    }

    /// Set the mandatory-pick re-prompt limit (builder pattern).
    #[must_use]
    pub fn with_reprompt_limit(mut self, limit: u32) -> Self {
        self.reprompt_limit = limit;
        self
    }

    /// The chooser answering for `player`.
    pub fn chooser(&mut self, player: PlayerId) -> &mut dyn Chooser {
        match self.seats.get_mut(player) {
            Some(chooser) => &mut **chooser,
            None => &mut self.fallback,
        }
    }

    /// Send a diagnostic to the players.
    pub fn notify(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        debug!(target: "realm_rules::notify", "{message}");
        self.notifier.notify(message);
    }

    /// How often a mandatory pick is re-asked.
    #[must_use]
    pub fn reprompt_limit(&self) -> u32 {
        self.reprompt_limit
    }
}
