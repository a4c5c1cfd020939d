//! Bounded FIFO pool for short-lived entities
//!
//! Particles and projectiles both live in a fixed-capacity ring. When the
//! pool is full the oldest entry is evicted to make room. Dead entries are
//! compacted in place with `retain`, so steady-state ticks never reallocate.

use std::collections::VecDeque;

/// Fixed-capacity collection with oldest-first eviction
#[derive(Debug, Clone)]
pub struct BoundedPool<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert an item, returning whatever had to be evicted.
    ///
    /// A zero-capacity pool rejects (returns) the item itself.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Keep only the items matching `keep`, preserving insertion order
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest live item
    pub fn oldest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}
