//! Optional petgraph compatibility layer.
//!
//! Converts a [`GraphStore`] into petgraph's `DiGraph` so the mirrored graph
//! can be fed to petgraph's algorithm library or rendered as DOT. This covers
//! the alternative graph-library backend the upstream system offers.
//!
//! # Feature Gate
//!
//! Only available with the `petgraph-compat` feature:
//!
//! ```toml
//! [dependencies]
//! mirrorgraph = { version = "0.1", features = ["petgraph-compat"] }
//! ```
//!
//! # Examples
//!
//! ```ignore
//! let conversion = store.to_petgraph();
//! use petgraph::algo::is_cyclic_directed;
//! assert!(!is_cyclic_directed(&conversion.graph));
//!
//! std::fs::write("mirror.dot", store.to_dot())?;
//! // Then: dot -Tpng mirror.dot -o mirror.png
//! ```

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use super::GraphStore;
use crate::types::NodeKey;

/// Petgraph representation of the mirrored graph.
///
/// Node weights are node keys, edge weights are unit.
pub type MirrorDiGraph = DiGraph<NodeKey, ()>;

/// Mapping from node key to petgraph `NodeIndex`.
pub type NodeIndexMap = FxHashMap<NodeKey, NodeIndex>;

/// Result of converting a store to petgraph format.
///
/// Carries the graph plus an index map for key-based lookups.
#[derive(Debug, Clone)]
pub struct PetgraphConversion {
    pub graph: MirrorDiGraph,
    pub index_map: NodeIndexMap,
}

impl PetgraphConversion {
    /// Petgraph index of `key`, if present.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<NodeIndex> {
        self.index_map.get(key).copied()
    }

    /// Node key at a petgraph index.
    #[must_use]
    pub fn key_at(&self, index: NodeIndex) -> Option<&NodeKey> {
        self.graph.node_weight(index)
    }
}

/// Convert the store into a petgraph `DiGraph`.
///
/// Keys are sorted before insertion so the same store contents always yield
/// the same indices.
pub(super) fn to_petgraph(store: &GraphStore) -> PetgraphConversion {
    let mut graph = DiGraph::new();
    let mut index_map: NodeIndexMap = FxHashMap::default();

    let mut keys: Vec<&NodeKey> = store.nodes().map(|(key, _)| key).collect();
    keys.sort();

    for key in keys {
        let index = graph.add_node(key.clone());
        index_map.insert(key.clone(), index);
    }

    for (source, target, _) in store.edges() {
        let source_index = index_map[source];
        let target_index = index_map[target];
        graph.add_edge(source_index, target_index, ());
    }

    PetgraphConversion { graph, index_map }
}

/// Render the store as DOT for Graphviz tooling.
///
/// Node labels come from the display label attribute.
pub(super) fn to_dot(store: &GraphStore) -> String {
    use std::fmt::Write;

    let conversion = to_petgraph(store);
    let mut output = String::new();

    writeln!(output, "digraph {{").unwrap();
    writeln!(output, "    rankdir=LR;").unwrap();
    writeln!(output, "    node [shape=circle];").unwrap();

    for index in conversion.graph.node_indices() {
        let key = conversion.graph.node_weight(index).unwrap();
        let label = store
            .node_attributes(key)
            .map_or(key.as_str(), |attributes| attributes.label.as_str());
        writeln!(output, "    {} [ label=\"{}\" ];", index.index(), label).unwrap();
    }

    writeln!(output).unwrap();

    for edge in conversion.graph.edge_indices() {
        let (source, target) = conversion.graph.edge_endpoints(edge).unwrap();
        writeln!(output, "    {} -> {};", source.index(), target.index()).unwrap();
    }

    writeln!(output, "}}").unwrap();

    output
}

/// Check the mirrored graph for cycles using petgraph's algorithm.
#[must_use]
pub fn is_cyclic(store: &GraphStore) -> bool {
    let conversion = to_petgraph(store);
    petgraph::algo::is_cyclic_directed(&conversion.graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EdgeAttributes, NodeAttributes};

    fn chain_store() -> GraphStore {
        let mut store = GraphStore::new();
        for key in ["a", "b", "c"] {
            store.add_node(key, NodeAttributes::for_key(key)).unwrap();
        }
        store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
        store.add_edge("b", "c", EdgeAttributes::default()).unwrap();
        store
    }

    #[test]
    fn conversion_preserves_counts_and_keys() {
        let store = chain_store();
        let conversion = to_petgraph(&store);

        assert_eq!(conversion.graph.node_count(), 3);
        assert_eq!(conversion.graph.edge_count(), 2);
        let index = conversion.index_of("b").unwrap();
        assert_eq!(conversion.key_at(index).unwrap(), "b");
    }

    #[test]
    fn indices_are_deterministic() {
        let store = chain_store();
        let first = to_petgraph(&store);
        let second = to_petgraph(&store);
        assert_eq!(first.index_of("a"), second.index_of("a"));
        assert_eq!(first.index_of("c"), second.index_of("c"));
    }

    #[test]
    fn cycle_detection() {
        let mut store = chain_store();
        assert!(!is_cyclic(&store));
        store.add_edge("c", "a", EdgeAttributes::default()).unwrap();
        assert!(is_cyclic(&store));
    }

    #[test]
    fn dot_output_uses_labels() {
        let mut store = chain_store();
        store.node_attributes_mut("a").unwrap().label = "alpha".to_string();
        let dot = store.to_dot();
        assert!(dot.contains("digraph {"));
        assert!(dot.contains("label=\"alpha\""));
        assert!(dot.contains("->"));
    }
}
