//! Test utilities for stitcher - logging and fixtures
//!
//! Shared by the unit tests and the integration tests under `tests/`.

use std::sync::Once;

use serde_json::json;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::memory::{MemoryId, MemoryKind, MemoryStore};

static TRACING: Once = Once::new();

/// Route tracing output through the test harness's captured writer.
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,stitcher=debug"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Owned tag list from string literals
pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

/// Store `count` short-term entries with contents `"<prefix>0"`, `"<prefix>1"`, ...
pub fn fill_working(store: &mut MemoryStore, prefix: &str, count: usize) -> Vec<MemoryId> {
    (0..count)
        .map(|i| store.store(json!(format!("{prefix}{i}")), MemoryKind::ShortTerm, vec![]))
        .collect()
}
