//! Adjacency snapshots: the sole input that drives reconciliation.
//!
//! A snapshot is a complete description of the desired graph shape at one
//! point in time, as a mapping from node key to an ordered neighbor list.
//! Snapshots are stateless: each one fully describes the target graph, so a
//! missed or reordered delivery is healed by the next one.
//!
//! [`decode_value`] and [`decode_str`] parse inbound payloads;
//! [`AdjacencyBuilder`] constructs snapshots on the producer side.

mod builder;
mod decode;

pub use builder::{AdjacencyBuilder, SimpleAdjacencyBuilder};
pub use decode::{SnapshotError, decode_str, decode_value};

use crate::types::NodeKey;

/// Normalized adjacency description: node key to ordered neighbor keys.
///
/// Entry order and neighbor order are preserved as supplied. Duplicate
/// neighbor entries are kept here (the raw adjacency may legitimately repeat
/// a target); they collapse to a single edge during reconciliation.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::snapshot::AdjacencySnapshot;
///
/// let snapshot = AdjacencySnapshot::from_pairs([
///     ("1", vec!["2", "3"]),
///     ("2", vec![]),
/// ]);
/// assert_eq!(snapshot.entry_count(), 2);
/// assert_eq!(snapshot.neighbors("1"), Some(&["2".to_string(), "3".to_string()][..]));
/// assert_eq!(snapshot.neighbors("4"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencySnapshot {
    entries: Vec<(NodeKey, Vec<NodeKey>)>,
}

impl AdjacencySnapshot {
    /// An empty snapshot. Reconciling it clears the graph.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from `(key, neighbors)` pairs, preserving order.
    pub fn from_pairs<K, N, I>(pairs: I) -> Self
    where
        K: Into<NodeKey>,
        N: Into<NodeKey>,
        I: IntoIterator<Item = (K, Vec<N>)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, neighbors)| {
                    (
                        key.into(),
                        neighbors.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    pub(crate) fn from_entries(entries: Vec<(NodeKey, Vec<NodeKey>)>) -> Self {
        Self { entries }
    }

    /// Iterates entries in supplied order as `(key, neighbors)`.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &[NodeKey])> {
        self.entries
            .iter()
            .map(|(key, neighbors)| (key, neighbors.as_slice()))
    }

    /// Neighbor list of `key`, if the snapshot has an entry for it.
    ///
    /// Keys that appear only as neighbors have no entry of their own.
    #[must_use]
    pub fn neighbors(&self, key: &str) -> Option<&[NodeKey]> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, neighbors)| neighbors.as_slice())
    }

    /// Number of mapping entries (not the number of distinct nodes).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
