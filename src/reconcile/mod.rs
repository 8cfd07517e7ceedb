//! The reconciliation engine: diff a live graph against a snapshot.
//!
//! Given the current [`GraphStore`] and a new [`AdjacencySnapshot`], the
//! [`Reconciler`] computes the desired node and edge sets and applies the
//! minimal mutations that bring the store into agreement, in four phases:
//!
//! 1. **Desired derivation**: union of mapping keys and neighbor values for
//!    nodes, deduplicated pair expansion for edges ([`DesiredGraph`]).
//! 2. **Node removal**: stored nodes outside the desired set are dropped,
//!    cascading to their incident edges.
//! 3. **Node addition**: desired nodes missing from the store materialize
//!    with default attributes and a placeholder position; surviving nodes
//!    are never touched, so their positions and attributes carry over.
//! 4. **Edge reconciliation**: stale edges dropped, missing edges added
//!    with default attributes, surviving edges untouched.
//!
//! Nodes reconcile before edges; every edge insertion happens after both its
//! endpoints exist. Reconciling the same snapshot twice in a row makes the
//! second pass a no-op, which [`ReconcileReport::is_noop`] makes observable.
//!
//! This is full-state reconciliation: desired state is recomputed from each
//! snapshot rather than patched from deltas, so a missed or reordered
//! delivery is healed by the next snapshot.
//!
//! # Examples
//!
//! ```rust
//! use mirrorgraph::reconcile::Reconciler;
//! use mirrorgraph::snapshot::decode_str;
//! use mirrorgraph::store::GraphStore;
//!
//! let mut store = GraphStore::new();
//! let mut reconciler = Reconciler::new();
//!
//! let report = reconciler
//!     .reconcile(&mut store, &decode_str(r#"{"1": ["2", "3"]}"#)?)?;
//! assert_eq!(report.nodes_added, 3);
//! assert_eq!(report.edges_added, 2);
//!
//! // Node 3 disappears from the next snapshot: it is dropped along with
//! // its incident edge, while 1 and 2 keep their attributes.
//! let report = reconciler
//!     .reconcile(&mut store, &decode_str(r#"{"1": ["2"]}"#)?)?;
//! assert_eq!(report.nodes_removed, 1);
//! assert_eq!(report.edges_removed, 1);
//! assert_eq!(report.nodes_kept, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod desired;
mod placement;
mod report;

pub use desired::DesiredGraph;
pub use placement::PlacementStrategy;
pub use report::ReconcileReport;

use chrono::Utc;
use miette::Diagnostic;
use thiserror::Error;
use tracing::instrument;

use crate::config::EngineConfig;
use crate::snapshot::AdjacencySnapshot;
use crate::store::{EdgeAttributes, GraphStore, NodeAttributes, StoreError};
use crate::types::NodeKey;

/// A reconciliation phase hit a store contract violation.
///
/// A correct reconciler checks existence before every mutation, so this
/// surfacing at all means the phase logic is wrong: a bug report, not a
/// transient condition. The store may have absorbed part of the failed
/// snapshot; callers must not service observers with it and should rely on
/// the next full snapshot to re-derive state.
#[derive(Debug, Error, Diagnostic)]
pub enum ReconcileError {
    #[error("graph store contract violated during {phase}: {source}")]
    #[diagnostic(
        code(mirrorgraph::reconcile::invariant),
        help("This indicates a reconciler bug; do not retry the snapshot.")
    )]
    Invariant {
        phase: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Applies adjacency snapshots to a [`GraphStore`] with identity
/// preservation.
///
/// Holds the placement strategy used for phase 3, so placeholder positions
/// advance through one RNG stream across updates.
#[derive(Debug, Clone)]
pub struct Reconciler {
    placement: PlacementStrategy,
}

impl Reconciler {
    /// Reconciler with default placement (spread 1.0, OS-seeded).
    #[must_use]
    pub fn new() -> Self {
        Self {
            placement: PlacementStrategy::new(),
        }
    }

    #[must_use]
    pub fn with_placement(placement: PlacementStrategy) -> Self {
        Self { placement }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_placement(PlacementStrategy::from_config(&config.placement))
    }

    /// Brings `store` into agreement with `snapshot`.
    ///
    /// Entities that persist across the update keep their attributes
    /// (notably positions) untouched. Reapplying the same snapshot is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::Invariant`] if a store mutation is rejected, which
    /// only happens when the phase logic itself is broken.
    #[instrument(skip_all, fields(entries = snapshot.entry_count()))]
    pub fn reconcile(
        &mut self,
        store: &mut GraphStore,
        snapshot: &AdjacencySnapshot,
    ) -> Result<ReconcileReport, ReconcileError> {
        let desired = DesiredGraph::from_snapshot(snapshot);
        let edges_before = store.edge_count();

        // Phase 2: drop stored nodes the snapshot no longer wants. Cascade
        // removes their incident edges, so order among them is free.
        let stale_nodes: Vec<NodeKey> = store
            .nodes()
            .map(|(key, _)| key.clone())
            .filter(|key| !desired.contains_node(key))
            .collect();
        let nodes_removed = stale_nodes.len();
        for key in &stale_nodes {
            store
                .drop_node(key)
                .map_err(|source| ReconcileError::Invariant {
                    phase: "node removal",
                    source,
                })?;
        }

        // Phase 3: materialize missing nodes. Existing keys are skipped so
        // their attributes survive.
        let mut nodes_added = 0;
        for key in desired.nodes() {
            if store.has_node(key) {
                continue;
            }
            let attributes =
                NodeAttributes::for_key(key.clone()).with_position(self.placement.place());
            store
                .add_node(key.clone(), attributes)
                .map_err(|source| ReconcileError::Invariant {
                    phase: "node addition",
                    source,
                })?;
            nodes_added += 1;
        }

        // Phase 4: edge diff. Both endpoints of every desired edge exist by
        // now; attempting this before the node phases would surface as
        // DanglingReference.
        let stale_edges: Vec<(NodeKey, NodeKey)> = store
            .edges()
            .filter(|(source, target, _)| !desired.contains_edge(source, target))
            .map(|(source, target, _)| (source.clone(), target.clone()))
            .collect();
        for (source, target) in &stale_edges {
            store
                .drop_edge(source, target)
                .map_err(|source| ReconcileError::Invariant {
                    phase: "edge removal",
                    source,
                })?;
        }
        // Counted against the pre-reconcile total so edges that vanished in
        // the node cascade are included.
        let edges_removed = edges_before - store.edge_count();

        let mut edges_added = 0;
        for (source, target) in desired.edges() {
            if store.has_edge(source, target) {
                continue;
            }
            store
                .add_edge(source.clone(), target.clone(), EdgeAttributes::default())
                .map_err(|source| ReconcileError::Invariant {
                    phase: "edge addition",
                    source,
                })?;
            edges_added += 1;
        }

        let report = ReconcileReport {
            at: Utc::now(),
            nodes_added,
            nodes_removed,
            nodes_kept: desired.node_count() - nodes_added,
            edges_added,
            edges_removed,
            edges_kept: desired.edge_count() - edges_added,
        };
        tracing::debug!(%report, "reconciled snapshot");
        Ok(report)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
