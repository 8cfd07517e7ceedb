//! Producer-side construction of adjacency snapshots.
//!
//! Mirrors the upstream source's builder surface: nodes register
//! idempotently, edges auto-create missing endpoints, and duplicate targets
//! are kept in the raw adjacency (the reconciler collapses them later).
//! Self-referencing entries may be recorded here too; the reconciler skips
//! them when deriving desired edges.

use rustc_hash::FxHashMap;

use super::AdjacencySnapshot;
use crate::types::NodeKey;

/// Accumulates an adjacency description entry by entry.
///
/// Implementations differ in backing representation; all expose the same
/// producer contract.
pub trait AdjacencyBuilder {
    /// Registers a node. Re-adding an existing key is a no-op.
    fn add_node(&mut self, key: &str);

    /// Records a directed edge, auto-creating either endpoint if missing.
    ///
    /// Duplicate `(source, target)` pairs are preserved in the raw adjacency.
    fn add_edge(&mut self, source: &str, target: &str);

    /// Current accumulated state as an [`AdjacencySnapshot`].
    fn snapshot(&self) -> AdjacencySnapshot;
}

/// Map-backed [`AdjacencyBuilder`] preserving first-touch entry order.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::snapshot::{AdjacencyBuilder, SimpleAdjacencyBuilder};
///
/// let mut builder = SimpleAdjacencyBuilder::new();
/// builder.add_edge("1", "2");
/// builder.add_edge("1", "2"); // duplicate kept in the raw adjacency
///
/// let snapshot = builder.snapshot();
/// assert_eq!(snapshot.neighbors("1").unwrap().len(), 2);
/// assert_eq!(snapshot.neighbors("2").unwrap(), &[] as &[String]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleAdjacencyBuilder {
    entries: Vec<(NodeKey, Vec<NodeKey>)>,
    index: FxHashMap<NodeKey, usize>,
}

impl SimpleAdjacencyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all accumulated entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Number of registered entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn ensure_entry(&mut self, key: &str) -> usize {
        if let Some(&position) = self.index.get(key) {
            return position;
        }
        let position = self.entries.len();
        self.entries.push((key.to_string(), Vec::new()));
        self.index.insert(key.to_string(), position);
        position
    }
}

impl AdjacencyBuilder for SimpleAdjacencyBuilder {
    fn add_node(&mut self, key: &str) {
        self.ensure_entry(key);
    }

    fn add_edge(&mut self, source: &str, target: &str) {
        let source_position = self.ensure_entry(source);
        self.ensure_entry(target);
        self.entries[source_position].1.push(target.to_string());
    }

    fn snapshot(&self) -> AdjacencySnapshot {
        AdjacencySnapshot::from_entries(self.entries.clone())
    }
}
