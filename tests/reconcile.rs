//! Reconciliation scenarios: materialization, identity preservation,
//! removal cascades, and idempotence.

use mirrorgraph::config::PlacementConfig;
use mirrorgraph::reconcile::{PlacementStrategy, Reconciler};
use mirrorgraph::snapshot::{AdjacencySnapshot, decode_value};
use mirrorgraph::store::{GraphStore, Position};
use serde_json::json;

mod common;
use common::*;

fn seeded_reconciler() -> Reconciler {
    Reconciler::with_placement(PlacementStrategy::from_config(&PlacementConfig::new(
        1.0,
        Some(42),
    )))
}

#[test]
fn first_snapshot_materializes_the_full_graph() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    let snapshot = triangle_snapshot();

    let report = reconciler.reconcile(&mut store, &snapshot).unwrap();

    assert_eq!(report.nodes_added, 3);
    assert_eq!(report.edges_added, 3);
    assert_eq!(report.nodes_removed, 0);
    assert_eq!(report.nodes_kept, 0);
    // "3" never appears as a mapping key, only as a neighbor.
    assert!(store.has_node("3"));
    assert_store_matches_snapshot(&store, &snapshot);
}

#[test]
fn materialized_nodes_default_their_attributes() {
    let mut store = GraphStore::new();
    seeded_reconciler()
        .reconcile(&mut store, &triangle_snapshot())
        .unwrap();

    for (key, attributes) in store.nodes() {
        assert_eq!(&attributes.label, key, "label defaults to the key");
        assert!(attributes.position.x.abs() <= 1.0);
        assert!(attributes.position.y.abs() <= 1.0);
    }
}

#[test]
fn surviving_nodes_keep_their_positions_and_colors() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    reconciler
        .reconcile(&mut store, &triangle_snapshot())
        .unwrap();

    // A user drags node 1 and recolors it between updates.
    let dragged = store.node_attributes_mut("1").unwrap();
    dragged.position = Position::new(0.3, 0.7);
    dragged.color = "#1a6".to_string();

    let next = AdjacencySnapshot::from_pairs([("1", vec!["2"]), ("4", vec!["1"])]);
    let report = reconciler.reconcile(&mut store, &next).unwrap();

    let kept = store.node_attributes("1").unwrap();
    assert_eq!(kept.position, Position::new(0.3, 0.7));
    assert_eq!(kept.color, "#1a6");
    assert!(!store.has_node("3"));
    assert!(store.has_node("4"));
    assert_eq!(report.nodes_removed, 1);
    assert_eq!(report.nodes_added, 1);
    assert_eq!(report.nodes_kept, 2);
    assert_store_matches_snapshot(&store, &next);
}

#[test]
fn surviving_edges_keep_their_attributes() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    reconciler
        .reconcile(&mut store, &triangle_snapshot())
        .unwrap();

    store.edge_attributes_mut("1", "2").unwrap().size = 9.0;

    // 1 -> 2 survives the refresh, 2 -> 3 does not.
    reconciler
        .reconcile(
            &mut store,
            &AdjacencySnapshot::from_pairs([("1", vec!["2", "3"])]),
        )
        .unwrap();
    assert_eq!(store.edge_attributes("1", "2").unwrap().size, 9.0);
    assert!(store.edge_attributes("2", "3").is_none());
}

#[test]
fn removed_nodes_take_their_incident_edges_along() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    reconciler
        .reconcile(
            &mut store,
            &AdjacencySnapshot::from_pairs([("a", vec!["b", "c"]), ("b", vec!["c"])]),
        )
        .unwrap();

    // c vanishes: a -> c and b -> c must go with it.
    let next = AdjacencySnapshot::from_pairs([("a", vec!["b"])]);
    let report = reconciler.reconcile(&mut store, &next).unwrap();

    assert_eq!(report.nodes_removed, 1);
    assert_eq!(report.edges_removed, 2);
    assert_eq!(report.edges_kept, 1);
    assert_store_matches_snapshot(&store, &next);
}

#[test]
fn reapplying_a_snapshot_is_a_noop() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    let snapshot = triangle_snapshot();

    reconciler.reconcile(&mut store, &snapshot).unwrap();
    let before = store.clone();

    let report = reconciler.reconcile(&mut store, &snapshot).unwrap();
    assert!(report.is_noop());
    assert_eq!(report.mutation_count(), 0);
    assert_eq!(report.nodes_kept, 3);
    assert_eq!(report.edges_kept, 3);
    assert_eq!(store, before, "a no-op must leave the store bit-identical");
}

#[test]
fn disjoint_snapshot_replaces_the_whole_graph() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    reconciler
        .reconcile(&mut store, &triangle_snapshot())
        .unwrap();

    let rebuilt = AdjacencySnapshot::from_pairs([("x", vec!["y"])]);
    let report = reconciler.reconcile(&mut store, &rebuilt).unwrap();

    assert_eq!(report.nodes_removed, 3);
    assert_eq!(report.nodes_added, 2);
    assert_eq!(report.nodes_kept, 0);
    assert_store_matches_snapshot(&store, &rebuilt);
}

#[test]
fn duplicate_neighbors_and_self_references_collapse() {
    let mut store = GraphStore::new();
    let report = seeded_reconciler()
        .reconcile(
            &mut store,
            &decode_value(&json!({"a": ["b", "b", "a", "b"]})).unwrap(),
        )
        .unwrap();

    assert_eq!(report.nodes_added, 2);
    assert_eq!(report.edges_added, 1);
    assert!(store.has_edge("a", "b"));
    assert!(!store.has_edge("a", "a"));
}

#[test]
fn a_snapshot_sequence_converges_on_the_latest() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    let sequence = [
        AdjacencySnapshot::from_pairs([("1", vec!["2", "3"]), ("2", vec!["3"])]),
        AdjacencySnapshot::from_pairs([("1", vec!["2"]), ("4", vec!["1", "2"])]),
        AdjacencySnapshot::empty(),
        chain_snapshot(5),
    ];

    for snapshot in &sequence {
        reconciler.reconcile(&mut store, snapshot).unwrap();
        assert_store_matches_snapshot(&store, snapshot);
    }
    assert_eq!(store.node_count(), 5);
}

#[test]
fn seeded_placement_is_reproducible_across_engines() {
    let config = PlacementConfig::new(1.0, Some(7));
    let mut first_store = GraphStore::new();
    let mut second_store = GraphStore::new();
    let snapshot = chain_snapshot(6);

    Reconciler::with_placement(PlacementStrategy::from_config(&config))
        .reconcile(&mut first_store, &snapshot)
        .unwrap();
    Reconciler::with_placement(PlacementStrategy::from_config(&config))
        .reconcile(&mut second_store, &snapshot)
        .unwrap();

    for (key, attributes) in first_store.nodes() {
        assert_eq!(
            attributes.position,
            second_store.node_attributes(key).unwrap().position,
            "placement diverged for node {key}"
        );
    }
}

#[test]
fn spread_bounds_every_placeholder_position() {
    let mut store = GraphStore::new();
    let mut reconciler = Reconciler::with_placement(PlacementStrategy::from_config(
        &PlacementConfig::new(0.25, None),
    ));
    reconciler
        .reconcile(&mut store, &chain_snapshot(20))
        .unwrap();

    for (key, attributes) in store.nodes() {
        assert!(
            attributes.position.x.abs() <= 0.25 && attributes.position.y.abs() <= 0.25,
            "node {key} placed outside the spread at {:?}",
            attributes.position
        );
    }
}

#[test]
fn kept_counters_account_for_every_desired_entity() {
    let mut store = GraphStore::new();
    let mut reconciler = seeded_reconciler();
    reconciler
        .reconcile(&mut store, &triangle_snapshot())
        .unwrap();

    let next = AdjacencySnapshot::from_pairs([("1", vec!["2", "4"]), ("2", vec!["3"])]);
    let report = reconciler.reconcile(&mut store, &next).unwrap();

    assert_eq!(report.nodes_kept + report.nodes_added, store.node_count());
    assert_eq!(report.edges_kept + report.edges_added, store.edge_count());
}
