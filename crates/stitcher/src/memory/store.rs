//! Two-tier memory store
//!
//! Combines a bounded working buffer with an unbounded durable list and a
//! tag index over the durable side. Entries enter through [`MemoryStore::store`],
//! move from working to durable only through [`MemoryStore::consolidate`], and
//! leave only by eviction from the working buffer.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::config::MemoryConfig;

use super::index::TagIndex;
use super::types::{MemoryEntry, MemoryId, MemoryIdGenerator, MemoryKind, MemoryStats};
use super::working::{DEFAULT_WORKING_CAPACITY, WorkingMemory};

/// Window used by [`MemoryStore::get_default_recent_memories`] unless configured
pub const DEFAULT_RECENT_WINDOW: usize = 5;

/// In-process memory store with working and durable tiers
#[derive(Debug)]
pub struct MemoryStore {
    working: WorkingMemory,
    durable: Vec<MemoryEntry>,
    /// Durable is append-only, so positions never shift
    durable_positions: HashMap<MemoryId, usize>,
    tag_index: TagIndex,
    ids: MemoryIdGenerator,
    recent_default: usize,
}

impl MemoryStore {
    /// Create a store with the default working capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WORKING_CAPACITY)
    }

    /// Create a store whose working memory holds `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            working: WorkingMemory::new(capacity),
            durable: Vec::new(),
            durable_positions: HashMap::new(),
            tag_index: TagIndex::new(),
            ids: MemoryIdGenerator::default(),
            recent_default: DEFAULT_RECENT_WINDOW,
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self {
            recent_default: config.recent_default,
            ..Self::with_capacity(config.short_term_capacity)
        }
    }

    /// Store new content and return its id
    ///
    /// Short-term entries go to working memory, evicting the oldest entry
    /// when the buffer is full. Anything else goes to durable memory and is
    /// indexed under each of its tags.
    pub fn store(&mut self, content: Value, kind: MemoryKind, tags: Vec<String>) -> MemoryId {
        let now = Utc::now();
        let id = self.ids.next_id(now);
        let entry = MemoryEntry::new(id.clone(), content, tags, now);

        debug!(
            memory_id = %id,
            kind = %kind,
            tags = ?entry.tags,
            "Storing memory"
        );

        match kind {
            MemoryKind::ShortTerm => {
                if let Some(evicted) = self.working.push(entry) {
                    debug!(memory_id = %evicted.id, "Evicted from working memory");
                }
            }
            MemoryKind::LongTerm => self.push_durable(entry),
        }

        id
    }

    /// Retrieve an entry by id, counting the retrieval
    ///
    /// Working memory is searched before durable memory. Returns `None` when
    /// neither tier holds the id.
    pub fn retrieve(&mut self, id: &str) -> Option<&MemoryEntry> {
        let entry = if let Some(position) = self.working.position(id) {
            self.working.get_mut_at(position)?
        } else {
            let position = *self.durable_positions.get(id)?;
            self.durable.get_mut(position)?
        };

        entry.mark_retrieved();
        debug!(
            memory_id = %entry.id,
            retrieval_count = entry.retrieval_count,
            "Retrieved memory"
        );
        Some(&*entry)
    }

    /// Look up an entry by id without counting a retrieval
    pub fn get(&self, id: &str) -> Option<&MemoryEntry> {
        self.working.get(id).or_else(|| {
            self.durable_positions
                .get(id)
                .and_then(|&position| self.durable.get(position))
        })
    }

    /// All entries carrying `tag`: working entries first, then durable,
    /// each in insertion order
    ///
    /// Scans both tiers directly. The tag index only covers durable entries
    /// and is not consulted here.
    pub fn recall_by_tag(&self, tag: &str) -> Vec<&MemoryEntry> {
        self.working
            .iter()
            .chain(self.durable.iter())
            .filter(|entry| entry.has_tag(tag))
            .collect()
    }

    /// The last `count` working entries, oldest of the window first
    pub fn get_recent_memories(&self, count: usize) -> Vec<&MemoryEntry> {
        self.working.recent(count).collect()
    }

    /// Recent working entries using the configured default window
    pub fn get_default_recent_memories(&self) -> Vec<&MemoryEntry> {
        self.get_recent_memories(self.recent_default)
    }

    /// Move a working entry to durable memory
    ///
    /// Returns `false` without side effects when the id is not in working
    /// memory, including when it is already durable.
    pub fn consolidate(&mut self, id: &str) -> bool {
        let Some(entry) = self.working.remove(id) else {
            debug!(memory_id = %id, "Nothing to consolidate");
            return false;
        };

        debug!(
            memory_id = %entry.id,
            retrieval_count = entry.retrieval_count,
            "Consolidating memory"
        );
        self.push_durable(entry);
        true
    }

    /// Fresh counts over both tiers and the tag index
    pub fn get_memory_stats(&self) -> MemoryStats {
        let short_term_count = self.working.len();
        let long_term_count = self.durable.len();
        MemoryStats {
            short_term_count,
            short_term_capacity: self.working.capacity(),
            long_term_count,
            total_memories: short_term_count + long_term_count,
            indexed_tags: self.tag_index.tag_count(),
        }
    }

    /// Ids indexed under a tag, in the order they became durable
    pub fn ids_for_tag(&self, tag: &str) -> &[MemoryId] {
        self.tag_index.ids_for_tag(tag)
    }

    /// Read-only view of the tag index
    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    /// Working entries, oldest first
    pub fn working_entries(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.working.iter()
    }

    /// Durable entries, oldest first
    pub fn durable_entries(&self) -> &[MemoryEntry] {
        &self.durable
    }

    pub fn working_len(&self) -> usize {
        self.working.len()
    }

    pub fn durable_len(&self) -> usize {
        self.durable.len()
    }

    /// Working memory capacity
    pub fn capacity(&self) -> usize {
        self.working.capacity()
    }

    fn push_durable(&mut self, entry: MemoryEntry) {
        self.tag_index.index_entry(&entry);
        self.durable_positions
            .insert(entry.id.clone(), self.durable.len());
        self.durable.push(entry);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
