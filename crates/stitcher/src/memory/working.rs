//! Working memory buffer
//!
//! A fixed-capacity FIFO of memory entries. Pushing past capacity evicts
//! the oldest entry. Working entries are never tag indexed, so eviction
//! needs no bookkeeping beyond dropping the entry.

use std::collections::VecDeque;

use super::types::MemoryEntry;

/// Default capacity for working memory
pub const DEFAULT_WORKING_CAPACITY: usize = 10;

/// Bounded, insertion-ordered buffer of recent memory entries
#[derive(Debug)]
pub struct WorkingMemory {
    entries: VecDeque<MemoryEntry>,
    capacity: usize,
}

impl WorkingMemory {
    /// Creates a working buffer holding at most `capacity` entries
    ///
    /// A capacity of 0 keeps nothing: every push evicts the entry just pushed.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an entry, returning the entry evicted to make room, if any
    pub fn push(&mut self, entry: MemoryEntry) -> Option<MemoryEntry> {
        self.entries.push_back(entry);
        self.enforce_capacity()
    }

    /// Position of the entry with the given id (oldest is 0)
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id.as_str() == id)
    }

    /// Look up an entry by id without touching it
    pub fn get(&self, id: &str) -> Option<&MemoryEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    pub(crate) fn get_mut_at(&mut self, position: usize) -> Option<&mut MemoryEntry> {
        self.entries.get_mut(position)
    }

    /// Remove the entry with the given id, keeping the order of the rest
    pub fn remove(&mut self, id: &str) -> Option<MemoryEntry> {
        let position = self.position(id)?;
        self.entries.remove(position)
    }

    /// The last `count` entries, oldest of the window first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &MemoryEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }

    /// Get an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter()
    }

    /// Get the number of entries in the buffer
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries the buffer holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn enforce_capacity(&mut self) -> Option<MemoryEntry> {
        let mut evicted = None;
        while self.entries.len() > self.capacity {
            evicted = self.entries.pop_front();
        }
        evicted
    }
}

impl Default for WorkingMemory {
    fn default() -> Self {
        Self::new(DEFAULT_WORKING_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::MemoryId;
    use chrono::Utc;
    use serde_json::json;

    fn entry(id: &str) -> MemoryEntry {
        MemoryEntry::new(MemoryId::from(id), json!(id), vec![], Utc::now())
    }

    fn ids(buffer: &WorkingMemory) -> Vec<String> {
        buffer.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = WorkingMemory::new(3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buffer = WorkingMemory::new(0);
        assert_eq!(buffer.capacity(), 0);

        let evicted = buffer.push(entry("a")).expect("pushed entry should be evicted");
        assert_eq!(evicted.id.as_str(), "a");
        assert!(buffer.is_empty());
        assert!(buffer.get("a").is_none());
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut buffer = WorkingMemory::new(3);

        assert!(buffer.push(entry("a")).is_none());
        assert!(buffer.push(entry("b")).is_none());
        assert!(buffer.push(entry("c")).is_none());

        let evicted = buffer.push(entry("d")).expect("oldest entry should be evicted");
        assert_eq!(evicted.id.as_str(), "a");
        assert_eq!(buffer.len(), 3);
        assert_eq!(ids(&buffer), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut buffer = WorkingMemory::new(5);
        for id in ["a", "b", "c"] {
            buffer.push(entry(id));
        }

        let removed = buffer.remove("b").expect("entry should be present");
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(ids(&buffer), vec!["a", "c"]);
        assert!(buffer.remove("b").is_none());
    }

    #[test]
    fn test_recent_window() {
        let mut buffer = WorkingMemory::new(5);
        for id in ["a", "b", "c", "d"] {
            buffer.push(entry(id));
        }

        let window: Vec<_> = buffer.recent(2).map(|e| e.id.to_string()).collect();
        assert_eq!(window, vec!["c", "d"]);

        let all: Vec<_> = buffer.recent(10).map(|e| e.id.to_string()).collect();
        assert_eq!(all, vec!["a", "b", "c", "d"]);

        assert_eq!(buffer.recent(0).count(), 0);
    }

    #[test]
    fn test_position_and_get() {
        let mut buffer = WorkingMemory::new(5);
        buffer.push(entry("a"));
        buffer.push(entry("b"));

        assert_eq!(buffer.position("b"), Some(1));
        assert_eq!(buffer.position("z"), None);
        assert!(buffer.get("a").is_some());
        assert!(buffer.get("z").is_none());
    }
}
