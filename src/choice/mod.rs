//! Player decisions and notifications.
//!
//! - [`Chooser`]: the three pick operations effects need
//! - [`PolicyChooser`]: deterministic first-legal policy
//! - [`ScriptedChooser`]: replays a queue of answers
//! - [`Notifier`]: diagnostic sink, with [`NotificationLog`] and
//!   [`TracingNotifier`]

mod chooser;
mod notify;
mod policy;
mod scripted;

pub use chooser::{Candidate, Chooser, Pile};
pub use notify::{NotificationLog, Notifier, TracingNotifier};
pub use policy::PolicyChooser;
pub use scripted::{Answer, ScriptedChooser};
