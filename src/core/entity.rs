//! Per-copy card identification.
//!
//! Card definitions are templates. Every physical copy that enters a deck,
//! the trade deck, or any other zone gets its own `InstanceId`, allocated
//! by the board when the template is copied. All runtime bookkeeping
//! (abilities used this turn, ally flags, continuous hooks) is keyed by
//! this identifier, never by the template.
//!
//! ## Usage
//!
//! ```
//! use realm_rules::core::InstanceId;
//!
//! let mut alloc = InstanceId::allocator();
//! let first = alloc.next_id();
//! let second = alloc.next_id();
//!
//! assert_ne!(first, second);
//! assert_eq!(first.raw() + 1, second.raw());
//! ```

use serde::{Deserialize, Serialize};

/// Stable identifier for one physical card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Start a fresh allocator at ID 0.
    #[must_use]
    pub const fn allocator() -> InstanceAllocator {
        InstanceAllocator { next: 0 }
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Monotonic allocator handing out unique `InstanceId`s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceAllocator {
    next: u32,
}

impl InstanceAllocator {
    /// Allocate the next unused ID.
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub const fn allocated(&self) -> u32 {
        self.next
    }
}
