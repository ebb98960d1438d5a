//! Memory subsystem
//!
//! A bounded working buffer (short-term) in front of an unbounded durable
//! list (long-term) with a tag index over the durable side.
//!
//! ```text
//!   store(.., ShortTerm) ─▶ ┌──────────────┐  consolidate  ┌───────────────┐
//!                           │   working    │──────────────▶│    durable    │ ◀─ store(.., LongTerm)
//!       evicted oldest ◀─── │  (FIFO, C)   │               │ (append-only) │
//!                           └──────────────┘               └───────┬───────┘
//!                                                                  │
//!                                                            tag index
//! ```

pub mod index;
pub mod shared;
pub mod store;
pub mod types;
pub mod working;

pub use index::TagIndex;
pub use shared::SharedMemoryStore;
pub use store::{DEFAULT_RECENT_WINDOW, MemoryStore};
pub use types::{MEMORY_ID_PREFIX, MemoryEntry, MemoryId, MemoryKind, MemoryStats};
pub use working::{DEFAULT_WORKING_CAPACITY, WorkingMemory};
