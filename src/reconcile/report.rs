//! Per-reconciliation mutation summaries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What one reconciliation did to the store.
///
/// Published to report subscribers and handed to view sinks; a no-op report
/// is the observable form of the idempotence guarantee.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::reconcile::{Reconciler, ReconcileReport};
/// use mirrorgraph::snapshot::decode_str;
/// use mirrorgraph::store::GraphStore;
///
/// let mut store = GraphStore::new();
/// let mut reconciler = Reconciler::new();
/// let snapshot = decode_str(r#"{"1": ["2"]}"#).unwrap();
///
/// let first = reconciler.reconcile(&mut store, &snapshot).unwrap();
/// assert_eq!((first.nodes_added, first.edges_added), (2, 1));
///
/// let second = reconciler.reconcile(&mut store, &snapshot).unwrap();
/// assert!(second.is_noop());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReconcileReport {
    /// When the reconciliation completed.
    #[serde(default = "chrono::Utc::now")]
    pub at: DateTime<Utc>,
    pub nodes_added: usize,
    pub nodes_removed: usize,
    /// Desired nodes that already existed and kept their attributes.
    pub nodes_kept: usize,
    pub edges_added: usize,
    pub edges_removed: usize,
    pub edges_kept: usize,
}

impl ReconcileReport {
    /// `true` when the store already matched the snapshot.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.mutation_count() == 0
    }

    /// Total adds and removes across nodes and edges.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.nodes_added + self.nodes_removed + self.edges_added + self.edges_removed
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes +{}/-{} (kept {}), edges +{}/-{} (kept {})",
            self.nodes_added,
            self.nodes_removed,
            self.nodes_kept,
            self.edges_added,
            self.edges_removed,
            self.edges_kept,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(counts: [usize; 6]) -> ReconcileReport {
        ReconcileReport {
            at: Utc::now(),
            nodes_added: counts[0],
            nodes_removed: counts[1],
            nodes_kept: counts[2],
            edges_added: counts[3],
            edges_removed: counts[4],
            edges_kept: counts[5],
        }
    }

    #[test]
    fn noop_ignores_kept_counts() {
        assert!(report([0, 0, 5, 0, 0, 3]).is_noop());
        assert!(!report([1, 0, 0, 0, 0, 0]).is_noop());
        assert!(!report([0, 0, 0, 0, 2, 0]).is_noop());
    }

    #[test]
    fn display_summarizes_counts() {
        let rendered = report([2, 1, 4, 3, 0, 2]).to_string();
        assert_eq!(rendered, "nodes +2/-1 (kept 4), edges +3/-0 (kept 2)");
    }
}
