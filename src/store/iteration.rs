//! Lazy iteration over stored nodes and edges.
//!
//! Both iterators borrow the store immutably, are finite, and restart from
//! the beginning each time [`GraphStore::nodes`](super::GraphStore::nodes) or
//! [`GraphStore::edges`](super::GraphStore::edges) is called. The reconciler
//! uses them to discover removal candidates; presentation adapters use them
//! to project drawable primitives. Iteration order follows the underlying
//! hash maps and is not deterministic.
//!
//! # Examples
//!
//! ```rust
//! use mirrorgraph::store::{GraphStore, NodeAttributes, EdgeAttributes};
//!
//! let mut store = GraphStore::new();
//! store.add_node("a", NodeAttributes::for_key("a")).unwrap();
//! store.add_node("b", NodeAttributes::for_key("b")).unwrap();
//! store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
//!
//! assert_eq!(store.nodes().count(), 2);
//! for (source, target, _attrs) in store.edges() {
//!     println!("{source} -> {target}");
//! }
//! // Restartable: a fresh call iterates from the beginning again.
//! assert_eq!(store.edges().count(), 1);
//! ```

use std::collections::hash_map;

use rustc_hash::FxHashMap;

use super::attributes::{EdgeAttributes, NodeAttributes};
use crate::types::NodeKey;

/// Iterator over all current nodes as `(key, attributes)` pairs.
pub struct NodesIter<'a> {
    inner: hash_map::Iter<'a, NodeKey, NodeAttributes>,
}

impl<'a> NodesIter<'a> {
    pub(super) fn new(inner: hash_map::Iter<'a, NodeKey, NodeAttributes>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for NodesIter<'a> {
    type Item = (&'a NodeKey, &'a NodeAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for NodesIter<'a> {}

/// Iterator over all current edges as `(source, target, attributes)` triples.
///
/// Flattens the store's per-source adjacency maps.
pub struct EdgesIter<'a> {
    outer: hash_map::Iter<'a, NodeKey, FxHashMap<NodeKey, EdgeAttributes>>,
    current: Option<(&'a NodeKey, hash_map::Iter<'a, NodeKey, EdgeAttributes>)>,
}

impl<'a> EdgesIter<'a> {
    pub(super) fn new(adjacency: &'a FxHashMap<NodeKey, FxHashMap<NodeKey, EdgeAttributes>>) -> Self {
        let mut outer = adjacency.iter();
        let current = outer
            .next()
            .map(|(source, targets)| (source, targets.iter()));
        Self { outer, current }
    }
}

impl<'a> Iterator for EdgesIter<'a> {
    type Item = (&'a NodeKey, &'a NodeKey, &'a EdgeAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (source, targets) = self.current.as_mut()?;
            if let Some((target, attrs)) = targets.next() {
                return Some((source, target, attrs));
            }
            self.current = self
                .outer
                .next()
                .map(|(source, targets)| (source, targets.iter()));
        }
    }
}
