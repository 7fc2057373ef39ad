//! Element and slide identifier generation.
//!
//! Identifiers are injected rather than generated inline so that a conversion can be
//! made fully reproducible.

use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Produces identifiers that are unique within one conversion.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier. `prefix` names the kind of object ("text", "slide", ...).
    fn next_id(&self, prefix: &str) -> String;
}

/// Random v4 UUIDs, prefixed with the object kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

/// A deterministic counter: `text-1`, `shape-2`, `slide-3`, ...
/// The counter is shared across prefixes, so ids stay unique even if two kinds share a prefix.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicUsize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}
