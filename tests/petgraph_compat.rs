//! Coverage for the optional petgraph conversion layer, driven through full
//! reconciliations rather than hand-built stores.

#![cfg(feature = "petgraph-compat")]

use mirrorgraph::channel::UpdateMessage;
use mirrorgraph::store::is_cyclic;
use serde_json::json;

mod common;
use common::*;

#[test]
fn conversion_mirrors_the_reconciled_graph() {
    let mut session = seeded_session();
    session.apply_snapshot(&triangle_snapshot()).unwrap();

    let conversion = session.store().to_petgraph();
    assert_eq!(conversion.graph.node_count(), 3);
    assert_eq!(conversion.graph.edge_count(), 3);

    let index = conversion.index_of("2").expect("node 2 is indexed");
    assert_eq!(conversion.key_at(index).unwrap(), "2");
    assert!(conversion.index_of("missing").is_none());
}

#[test]
fn indices_stay_deterministic_across_conversions() {
    let mut session = seeded_session();
    session.apply_snapshot(&chain_snapshot(5)).unwrap();

    let first = session.store().to_petgraph();
    let second = session.store().to_petgraph();
    for key in ["n0", "n2", "n4"] {
        assert_eq!(first.index_of(key), second.index_of(key));
    }
}

#[test]
fn cycle_detection_follows_the_snapshots() {
    let mut session = seeded_session();

    session
        .apply_message(&UpdateMessage::init(json!({"a": ["b"], "b": ["c"]})))
        .unwrap();
    assert!(!is_cyclic(session.store()));

    session
        .apply_message(&UpdateMessage::update(json!({"a": ["b"], "b": ["a"]})))
        .unwrap();
    assert!(is_cyclic(session.store()));
}

#[test]
fn dot_output_reflects_relabeled_nodes() {
    let mut session = seeded_session();
    session.apply_snapshot(&triangle_snapshot()).unwrap();
    session
        .store_mut()
        .node_attributes_mut("1")
        .unwrap()
        .label = "origin".to_string();

    let dot = session.store().to_dot();
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("label=\"origin\""));
    assert!(dot.trim_end().ends_with('}'));
}
