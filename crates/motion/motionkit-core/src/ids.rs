//! Stable ids used to key per-owner state across frames.

use serde::{Deserialize, Serialize};

/// Identifies one logical animated object (widget, node, ...). The owning
/// motion system allocates these; the core only uses them as cache keys.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u32);

/// Simple monotonically increasing allocator for [`OwnerId`]s.
#[derive(Default, Debug, Serialize, Deserialize)]
pub struct IdAllocator {
    next_owner: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_owner(&mut self) -> OwnerId {
        let id = OwnerId(self.next_owner);
        self.next_owner += 1;
        id
    }
}
