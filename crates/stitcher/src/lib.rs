//! Stitcher - a layered cognitive agent
//!
//! This crate couples a self-awareness state tracker and a rule-based
//! reasoning engine with a two-tier memory store (bounded working memory,
//! durable memory with a tag index). The [`consciousness::Consciousness`]
//! orchestrator sequences the three on every input event.

pub mod awareness;
pub mod config;
pub mod consciousness;
pub mod error;
pub mod logging;
pub mod memory;
pub mod reasoning;
pub mod testing;

pub use awareness::SelfAwareness;
pub use config::Config;
pub use consciousness::{Consciousness, Learning};
pub use error::{Result, StitcherError};
pub use logging::init_logging;
pub use memory::{MemoryEntry, MemoryId, MemoryKind, MemoryStats, MemoryStore, SharedMemoryStore};
pub use reasoning::ReasoningEngine;
