//! Addressable mutable graph mirroring the upstream source of truth.
//!
//! [`GraphStore`] holds the live graph a display session renders from:
//! nodes keyed by an opaque string, directed simple edges keyed by their
//! ordered endpoint pair, each carrying a mutable attribute bag. The store
//! is exclusively mutated by the reconciler (and by collaborators such as a
//! layout engine between reconciliations); it performs no I/O and knows
//! nothing about snapshots or transports.
//!
//! # Contract
//!
//! - Membership queries are O(1) expected.
//! - [`add_edge`](GraphStore::add_edge) requires both endpoints to exist and
//!   rejects self-loops and duplicates.
//! - [`drop_node`](GraphStore::drop_node) cascade-deletes every incident
//!   edge, in both directions, so the store never holds dangling references.
//! - [`nodes`](GraphStore::nodes) and [`edges`](GraphStore::edges) are lazy
//!   and restartable.
//!
//! # Examples
//!
//! ```rust
//! use mirrorgraph::store::{GraphStore, NodeAttributes, EdgeAttributes};
//!
//! let mut store = GraphStore::new();
//! store.add_node("1", NodeAttributes::for_key("1"))?;
//! store.add_node("2", NodeAttributes::for_key("2"))?;
//! store.add_edge("1", "2", EdgeAttributes::default())?;
//!
//! assert!(store.has_edge("1", "2"));
//!
//! // Cascade delete: dropping "1" also removes 1 -> 2.
//! store.drop_node("1")?;
//! assert!(!store.has_edge("1", "2"));
//! assert_eq!(store.edge_count(), 0);
//! # Ok::<(), mirrorgraph::store::StoreError>(())
//! ```

mod attributes;
mod iteration;

#[cfg(feature = "petgraph-compat")]
mod petgraph_compat;

pub use attributes::{
    DEFAULT_EDGE_COLOR, DEFAULT_EDGE_SIZE, DEFAULT_NODE_COLOR, DEFAULT_NODE_SIZE, EdgeAttributes,
    NodeAttributes, Position,
};
pub use iteration::{EdgesIter, NodesIter};

#[cfg(feature = "petgraph-compat")]
pub use petgraph_compat::{MirrorDiGraph, NodeIndexMap, PetgraphConversion, is_cyclic};

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::NodeKey;

/// Contract violations raised by [`GraphStore`] mutations.
///
/// A correct reconciler never triggers these in normal operation because it
/// checks existence before mutating. When one surfaces anyway it indicates a
/// bug in the calling phase logic, not a recoverable runtime condition.
// `Display`/`Error` are implemented by hand: `DanglingReference::source` is
// a node key, and thiserror's derive would treat any field named `source` as
// the `Error::source()` cause (which `String` cannot be).
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum StoreError {
    /// The node or edge being inserted already exists.
    #[diagnostic(
        code(mirrorgraph::store::duplicate_entity),
        help("Check existence with has_node/has_edge before inserting.")
    )]
    DuplicateEntity { entity: &'static str, key: String },

    /// The node or edge being removed does not exist.
    #[diagnostic(
        code(mirrorgraph::store::not_found),
        help("Check existence with has_node/has_edge before removing.")
    )]
    NotFound { entity: &'static str, key: String },

    /// An edge insertion referenced a node that is not in the store.
    #[diagnostic(
        code(mirrorgraph::store::dangling_reference),
        help("Add both endpoint nodes before adding the edge.")
    )]
    DanglingReference {
        source: String,
        target: String,
        missing: String,
    },

    /// Self-loops are not representable in this graph model.
    #[diagnostic(code(mirrorgraph::store::self_reference))]
    SelfReference { key: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { entity, key } => write!(f, "duplicate {entity}: {key}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::DanglingReference {
                source,
                target,
                missing,
            } => write!(f, "edge {source} -> {target} references missing node {missing}"),
            Self::SelfReference { key } => {
                write!(f, "self-referencing edge rejected: {key} -> {key}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

fn edge_key(source: &str, target: &str) -> String {
    format!("{source} -> {target}")
}

/// Mutable directed graph with per-entity attribute bags.
///
/// Created empty at session start, mutated through reconciliation, cleared
/// at session end. See the [module docs](self) for the full contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: FxHashMap<NodeKey, NodeAttributes>,
    /// Outgoing adjacency: source -> (target -> edge attributes).
    adjacency: FxHashMap<NodeKey, FxHashMap<NodeKey, EdgeAttributes>>,
    /// Reverse index so cascade delete only touches incident edges.
    incoming: FxHashMap<NodeKey, FxHashSet<NodeKey>>,
    edge_count: usize,
}

impl GraphStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a node with `key` exists. O(1) expected.
    #[must_use]
    pub fn has_node(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Returns `true` if the directed edge `source -> target` exists. O(1)
    /// expected.
    #[must_use]
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.adjacency
            .get(source)
            .is_some_and(|targets| targets.contains_key(target))
    }

    /// Inserts a node with the given attributes.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateEntity`] if `key` is already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mirrorgraph::store::{GraphStore, NodeAttributes};
    ///
    /// let mut store = GraphStore::new();
    /// store.add_node("1", NodeAttributes::for_key("1")).unwrap();
    /// assert!(store.add_node("1", NodeAttributes::for_key("1")).is_err());
    /// ```
    pub fn add_node(
        &mut self,
        key: impl Into<NodeKey>,
        attributes: NodeAttributes,
    ) -> Result<(), StoreError> {
        let key = key.into();
        if self.nodes.contains_key(&key) {
            return Err(StoreError::DuplicateEntity {
                entity: "node",
                key,
            });
        }
        self.nodes.insert(key, attributes);
        Ok(())
    }

    /// Inserts the directed edge `source -> target` with the given
    /// attributes.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DanglingReference`] if either endpoint is missing.
    /// - [`StoreError::SelfReference`] if `source == target`.
    /// - [`StoreError::DuplicateEntity`] if the edge already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mirrorgraph::store::{GraphStore, NodeAttributes, EdgeAttributes};
    ///
    /// let mut store = GraphStore::new();
    /// store.add_node("1", NodeAttributes::for_key("1")).unwrap();
    ///
    /// // "2" does not exist yet, so the edge is rejected.
    /// assert!(store.add_edge("1", "2", EdgeAttributes::default()).is_err());
    ///
    /// store.add_node("2", NodeAttributes::for_key("2")).unwrap();
    /// store.add_edge("1", "2", EdgeAttributes::default()).unwrap();
    /// ```
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
        attributes: EdgeAttributes,
    ) -> Result<(), StoreError> {
        let source = source.into();
        let target = target.into();
        if source == target {
            return Err(StoreError::SelfReference { key: source });
        }
        for endpoint in [&source, &target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(StoreError::DanglingReference {
                    missing: endpoint.clone(),
                    source: source.clone(),
                    target: target.clone(),
                });
            }
        }
        if self.has_edge(&source, &target) {
            return Err(StoreError::DuplicateEntity {
                entity: "edge",
                key: edge_key(&source, &target),
            });
        }
        self.incoming
            .entry(target.clone())
            .or_default()
            .insert(source.clone());
        self.adjacency
            .entry(source)
            .or_default()
            .insert(target, attributes);
        self.edge_count += 1;
        Ok(())
    }

    /// Removes the node and every edge incident to it, in both directions.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `key` is absent.
    pub fn drop_node(&mut self, key: &str) -> Result<(), StoreError> {
        if self.nodes.remove(key).is_none() {
            return Err(StoreError::NotFound {
                entity: "node",
                key: key.to_string(),
            });
        }
        if let Some(targets) = self.adjacency.remove(key) {
            self.edge_count -= targets.len();
            for target in targets.keys() {
                if let Some(sources) = self.incoming.get_mut(target) {
                    sources.remove(key);
                }
            }
        }
        if let Some(sources) = self.incoming.remove(key) {
            for source in sources {
                if let Some(targets) = self.adjacency.get_mut(&source)
                    && targets.remove(key).is_some()
                {
                    self.edge_count -= 1;
                }
            }
        }
        Ok(())
    }

    /// Removes the edge `source -> target` only; its endpoints stay.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the edge is absent.
    pub fn drop_edge(&mut self, source: &str, target: &str) -> Result<(), StoreError> {
        let removed = self
            .adjacency
            .get_mut(source)
            .and_then(|targets| targets.remove(target));
        if removed.is_none() {
            return Err(StoreError::NotFound {
                entity: "edge",
                key: edge_key(source, target),
            });
        }
        if let Some(sources) = self.incoming.get_mut(target) {
            sources.remove(source);
        }
        self.edge_count -= 1;
        Ok(())
    }

    /// Attribute bag of a node, if present.
    #[must_use]
    pub fn node_attributes(&self, key: &str) -> Option<&NodeAttributes> {
        self.nodes.get(key)
    }

    /// Mutable attribute bag of a node, if present.
    ///
    /// Keys are immutable; everything in the bag may change between
    /// reconciliations (layout nudges, user drags) and survives updates
    /// that keep the node desired.
    pub fn node_attributes_mut(&mut self, key: &str) -> Option<&mut NodeAttributes> {
        self.nodes.get_mut(key)
    }

    /// Attribute bag of an edge, if present.
    #[must_use]
    pub fn edge_attributes(&self, source: &str, target: &str) -> Option<&EdgeAttributes> {
        self.adjacency.get(source)?.get(target)
    }

    /// Mutable attribute bag of an edge, if present.
    pub fn edge_attributes_mut(
        &mut self,
        source: &str,
        target: &str,
    ) -> Option<&mut EdgeAttributes> {
        self.adjacency.get_mut(source)?.get_mut(target)
    }

    /// Lazy, restartable iteration over all current nodes.
    #[must_use]
    pub fn nodes(&self) -> NodesIter<'_> {
        NodesIter::new(self.nodes.iter())
    }

    /// Lazy, restartable iteration over all current edges.
    #[must_use]
    pub fn edges(&self) -> EdgesIter<'_> {
        EdgesIter::new(&self.adjacency)
    }

    /// Number of nodes currently stored.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges currently stored.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the store holds no nodes (and therefore no edges).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Releases all nodes and edges. Used at session teardown.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjacency.clear();
        self.incoming.clear();
        self.edge_count = 0;
    }
}

#[cfg(feature = "petgraph-compat")]
impl GraphStore {
    /// Convert to a petgraph `DiGraph` with deterministic indices.
    #[must_use]
    pub fn to_petgraph(&self) -> PetgraphConversion {
        petgraph_compat::to_petgraph(self)
    }

    /// Render as DOT for Graphviz tooling.
    #[must_use]
    pub fn to_dot(&self) -> String {
        petgraph_compat::to_dot(self)
    }
}
