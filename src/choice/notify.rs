//! Notification sinks for human-readable diagnostics.
//!
//! The core reports rejected picks, already-used abilities and unknown
//! effects through a [`Notifier`] instead of failing.

use tracing::info;

/// Sink for diagnostics meant for the players.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Collects notifications in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationLog {
    messages: Vec<String>,
}

impl NotificationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether any message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }

    /// Remove and return all messages.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Forwards notifications to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, message: &str) {
        info!(target: "realm_rules::notify", "{message}");
    }
}
