//! # History Queue
//! Fixed-capacity, insertion-ordered set of already-processed item ids.
//!
//! The poll loop uses this to answer "have we already acted on this item?"
//! in O(1) while bounding memory: once more than `capacity` distinct ids
//! have been added, the oldest is evicted (strict FIFO).

use std::collections::{HashSet, VecDeque};

/// Bounded dedup history over opaque item identifiers.
///
/// Single-owner structure: the poll loop owns it and mutates it; the fetcher
/// only reads it. Callers sharing it across tasks must add their own
/// synchronization.
#[derive(Debug)]
pub struct HistoryQueue {
    /// Arrival order, oldest at the front.
    order: VecDeque<String>,
    /// Membership index mirroring `order`.
    index: HashSet<String>,
    capacity: usize,
}

impl HistoryQueue {
    /// Create a queue holding at most `capacity` identifiers.
    ///
    /// # Panics
    /// Panics if `capacity` is zero; a zero-capacity history is a
    /// programming error, not an operational condition.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history queue capacity must be positive");
        Self {
            order: VecDeque::with_capacity(capacity),
            index: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Whether `id` is currently tracked. No side effects.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Insert `id` as the newest entry, evicting the oldest entry first if
    /// the queue is already full.
    ///
    /// Re-adding an id that is already present is a no-op: the id keeps its
    /// original position and eviction age. This keeps eviction order stable
    /// when the same item shows up in overlapping poll pages.
    pub fn add(&mut self, id: &str) {
        if self.index.contains(id) {
            return;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.index.remove(&oldest);
            }
        }
        self.order.push_back(id.to_string());
        self.index.insert(id.to_string());
    }

    /// Number of identifiers currently tracked (diagnostics only).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Configured capacity (useful for telemetry).
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_after_add() {
        let mut q = HistoryQueue::with_capacity(10);
        assert!(!q.contains("a"));
        q.add("a");
        assert!(q.contains("a"));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn fifo_eviction_at_capacity() {
        let mut q = HistoryQueue::with_capacity(2);
        q.add("a");
        q.add("b");
        q.add("c");
        assert!(!q.contains("a"));
        assert!(q.contains("b"));
        assert!(q.contains("c"));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn readd_is_a_noop() {
        let mut q = HistoryQueue::with_capacity(2);
        q.add("a");
        q.add("b");
        q.add("a"); // already present; must not refresh its age
        q.add("c"); // evicts "a", not "b"
        assert!(!q.contains("a"));
        assert!(q.contains("b"));
        assert!(q.contains("c"));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn long_add_sequence_keeps_last_n() {
        let mut q = HistoryQueue::with_capacity(3);
        for i in 0..100 {
            q.add(&format!("id{i}"));
        }
        assert_eq!(q.len(), 3);
        for i in 0..97 {
            assert!(!q.contains(&format!("id{i}")));
        }
        for i in 97..100 {
            assert!(q.contains(&format!("id{i}")));
        }
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = HistoryQueue::with_capacity(0);
    }
}
