//! Keyframe handles and their allocator.

use serde::{Deserialize, Serialize};

/// Handle for one time row of a synchronized timeline. The same id names the
/// keyframe at that time in every component.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub u32);

/// Monotonic allocator for KeyframeId. Ids are never reused within a value,
/// so a handle held by an undo entry can't alias a newer row.
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> KeyframeId {
        let id = KeyframeId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Make sure future allocations don't collide with `id` (used when an
    /// edit replays a handle minted elsewhere).
    #[inline]
    pub fn reserve(&mut self, id: KeyframeId) {
        if id.0 >= self.next {
            self.next = id.0.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc(), KeyframeId(0));
        assert_eq!(alloc.alloc(), KeyframeId(1));
        alloc.reserve(KeyframeId(7));
        assert_eq!(alloc.alloc(), KeyframeId(8));
        alloc.reserve(KeyframeId(2));
        assert_eq!(alloc.alloc(), KeyframeId(9));
    }
}
