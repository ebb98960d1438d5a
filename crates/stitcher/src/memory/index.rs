//! Tag index over durable memory
//!
//! Maps each tag to the ids of durable entries that carried it, in the
//! order they entered durable memory. The index only grows.

use std::collections::BTreeMap;

use super::types::{MemoryEntry, MemoryId};

/// Append-only mapping from tag to durable entry ids
#[derive(Debug, Default)]
pub struct TagIndex {
    index: BTreeMap<String, Vec<MemoryId>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every tag of an entry that has just entered durable memory
    ///
    /// A tag listed twice on one entry appends the id twice.
    pub fn index_entry(&mut self, entry: &MemoryEntry) {
        for tag in &entry.tags {
            self.index
                .entry(tag.clone())
                .or_default()
                .push(entry.id.clone());
        }
    }

    /// Ids indexed under a tag, oldest first
    pub fn ids_for_tag(&self, tag: &str) -> &[MemoryId] {
        self.index.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct tags with at least one indexed id
    pub fn tag_count(&self) -> usize {
        self.index.len()
    }

    /// Iterate indexed tags in lexical order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
