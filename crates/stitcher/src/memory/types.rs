//! Memory types for the Stitcher memory store
//!
//! Defines the entry record held by both memory tiers, its identifier,
//! the tier selector used on insertion, and the statistics snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix carried by every generated memory id
pub const MEMORY_ID_PREFIX: &str = "mem_";

/// Identifier of a single memory entry
///
/// Ids have the form `mem_<microseconds since the Unix epoch>` and are
/// unique within the store that generated them. The store treats them as
/// opaque tokens; any string may be passed to lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryId(String);

impl MemoryId {
    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_micros(micros: i64) -> Self {
        MemoryId(format!("{MEMORY_ID_PREFIX}{micros}"))
    }
}

impl std::ops::Deref for MemoryId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for MemoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MemoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemoryId {
    fn from(value: &str) -> Self {
        MemoryId(value.to_string())
    }
}

impl From<String> for MemoryId {
    fn from(value: String) -> Self {
        MemoryId(value)
    }
}

impl From<MemoryId> for String {
    fn from(id: MemoryId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates timestamp-derived ids that never repeat within one store
///
/// Two entries created in the same microsecond would share a timestamp, so
/// the generator hands out `max(now, last + 1)`.
#[derive(Debug, Default)]
pub(crate) struct MemoryIdGenerator {
    last_micros: i64,
}

impl MemoryIdGenerator {
    pub(crate) fn next_id(&mut self, now: DateTime<Utc>) -> MemoryId {
        let micros = now.timestamp_micros().max(self.last_micros + 1);
        self.last_micros = micros;
        MemoryId::from_micros(micros)
    }
}

/// Which tier a new entry is placed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Bounded working memory, evicted oldest-first
    ShortTerm,
    /// Unbounded durable memory, tag indexed
    LongTerm,
}

impl MemoryKind {
    /// Convert kind to its label
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::ShortTerm => "short_term",
            MemoryKind::LongTerm => "long_term",
        }
    }
}

/// Labels other than `"short_term"` select durable memory.
impl From<&str> for MemoryKind {
    fn from(label: &str) -> Self {
        if label == "short_term" {
            MemoryKind::ShortTerm
        } else {
            MemoryKind::LongTerm
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single memory unit held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Unique identifier for this entry
    pub id: MemoryId,
    /// Caller payload, stored and returned untouched
    pub content: Value,
    /// When this entry was stored
    pub created_at: DateTime<Utc>,
    /// Caller-supplied labels, in the order given
    pub tags: Vec<String>,
    /// How many times this entry has been retrieved by id
    pub retrieval_count: u64,
}

impl MemoryEntry {
    pub(crate) fn new(
        id: MemoryId,
        content: Value,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            tags,
            retrieval_count: 0,
        }
    }

    /// Whether this entry carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub(crate) fn mark_retrieved(&mut self) {
        self.retrieval_count += 1;
    }
}

/// Aggregate counts over both tiers and the tag index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Entries currently in working memory
    pub short_term_count: usize,
    /// Working memory capacity
    pub short_term_capacity: usize,
    /// Entries in durable memory
    pub long_term_count: usize,
    /// Sum of both tiers
    pub total_memories: usize,
    /// Distinct tags with at least one indexed entry
    pub indexed_tags: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_memory_kind_from_label() {
        assert_eq!(MemoryKind::from("short_term"), MemoryKind::ShortTerm);
        assert_eq!(MemoryKind::from("long_term"), MemoryKind::LongTerm);
        assert_eq!(MemoryKind::from("episodic"), MemoryKind::LongTerm);
        assert_eq!(MemoryKind::from(""), MemoryKind::LongTerm);
        assert_eq!(MemoryKind::from("SHORT_TERM"), MemoryKind::LongTerm);
    }

    #[test]
    fn test_memory_kind_serializes_as_label() {
        let json = serde_json::to_string(&MemoryKind::ShortTerm).unwrap();
        assert_eq!(json, "\"short_term\"");
        assert_eq!(MemoryKind::LongTerm.to_string(), "long_term");
    }

    #[test]
    fn test_id_generator_uses_timestamp() {
        let mut ids = MemoryIdGenerator::default();
        let now = Utc.timestamp_micros(1_700_000_000_123_456).unwrap();

        let id = ids.next_id(now);
        assert_eq!(id.as_str(), "mem_1700000000123456");
    }

    #[test]
    fn test_id_generator_never_repeats_within_same_microsecond() {
        let mut ids = MemoryIdGenerator::default();
        let now = Utc.timestamp_micros(1_700_000_000_000_000).unwrap();

        let first = ids.next_id(now);
        let second = ids.next_id(now);
        let third = ids.next_id(now);

        assert_eq!(first.as_str(), "mem_1700000000000000");
        assert_eq!(second.as_str(), "mem_1700000000000001");
        assert_eq!(third.as_str(), "mem_1700000000000002");
    }

    #[test]
    fn test_id_generator_survives_clock_going_backwards() {
        let mut ids = MemoryIdGenerator::default();
        let later = Utc.timestamp_micros(2_000_000).unwrap();
        let earlier = Utc.timestamp_micros(1_000_000).unwrap();

        let first = ids.next_id(later);
        let second = ids.next_id(earlier);
        assert_ne!(first, second);
        assert_eq!(second.as_str(), "mem_2000001");
    }

    #[test]
    fn test_entry_new_defaults() {
        let entry = MemoryEntry::new(
            MemoryId::from("mem_1"),
            json!({"note": "hello"}),
            vec!["a".to_string(), "a".to_string()],
            Utc::now(),
        );

        assert_eq!(entry.retrieval_count, 0);
        assert_eq!(entry.tags, vec!["a", "a"]);
        assert!(entry.has_tag("a"));
        assert!(!entry.has_tag("b"));
    }

    #[test]
    fn test_entry_serializes_id_as_plain_string() {
        let entry = MemoryEntry::new(
            MemoryId::from("mem_42"),
            json!("payload"),
            vec![],
            Utc::now(),
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], json!("mem_42"));
        assert_eq!(value["retrieval_count"], json!(0));
    }
}
