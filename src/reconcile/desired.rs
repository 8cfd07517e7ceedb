//! Desired-state derivation from an adjacency snapshot.
//!
//! The desired node set is the union of every mapping key and every neighbor
//! value, so nodes that only ever appear as neighbors still materialize. The
//! desired edge set is the deduplicated expansion of the mapping, minus
//! self-pairs (the store's graph model has no self-loops; upstream producers
//! may still emit them).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::snapshot::AdjacencySnapshot;
use crate::types::NodeKey;

/// The node and edge sets a snapshot says the graph should have.
#[derive(Debug, Clone, Default)]
pub struct DesiredGraph {
    nodes: FxHashSet<NodeKey>,
    adjacency: FxHashMap<NodeKey, FxHashSet<NodeKey>>,
    edge_count: usize,
}

impl DesiredGraph {
    /// Derives desired nodes and edges from `snapshot`.
    ///
    /// Duplicate neighbor entries collapse; self-referencing entries are
    /// skipped for edges (logged at debug) while the key still counts as a
    /// desired node.
    #[must_use]
    pub fn from_snapshot(snapshot: &AdjacencySnapshot) -> Self {
        let mut desired = Self::default();
        for (key, neighbors) in snapshot.iter() {
            desired.nodes.insert(key.clone());
            for neighbor in neighbors {
                desired.nodes.insert(neighbor.clone());
                if neighbor == key {
                    tracing::debug!(key = %key, "skipping self-referencing neighbor entry");
                    continue;
                }
                let inserted = desired
                    .adjacency
                    .entry(key.clone())
                    .or_default()
                    .insert(neighbor.clone());
                if inserted {
                    desired.edge_count += 1;
                }
            }
        }
        desired
    }

    #[must_use]
    pub fn contains_node(&self, key: &str) -> bool {
        self.nodes.contains(key)
    }

    #[must_use]
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.adjacency
            .get(source)
            .is_some_and(|targets| targets.contains(target))
    }

    /// Iterates desired node keys (arbitrary order).
    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter()
    }

    /// Iterates desired `(source, target)` pairs (arbitrary order).
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey)> {
        self.adjacency
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
