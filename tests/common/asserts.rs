use mirrorgraph::snapshot::AdjacencySnapshot;
use mirrorgraph::store::GraphStore;
use rustc_hash::FxHashSet;

#[allow(dead_code)]
pub fn assert_edge(store: &GraphStore, source: &str, target: &str) {
    assert!(
        store.has_edge(source, target),
        "expected edge {source} -> {target}, got: {:?}",
        store
            .edges()
            .map(|(s, t, _)| format!("{s} -> {t}"))
            .collect::<Vec<_>>()
    );
}

#[allow(dead_code)]
pub fn assert_no_dangling_edges(store: &GraphStore) {
    for (source, target, _) in store.edges() {
        assert!(
            store.has_node(source),
            "edge {source} -> {target} dangles: source node is gone"
        );
        assert!(
            store.has_node(target),
            "edge {source} -> {target} dangles: target node is gone"
        );
    }
}

/// Asserts the store holds exactly the nodes and edges `snapshot` describes:
/// every mapping key and neighbor as a node, every non-self pair as an edge,
/// and nothing else.
#[allow(dead_code)]
pub fn assert_store_matches_snapshot(store: &GraphStore, snapshot: &AdjacencySnapshot) {
    let mut desired_nodes: FxHashSet<&str> = FxHashSet::default();
    let mut desired_edges: FxHashSet<(&str, &str)> = FxHashSet::default();
    for (key, neighbors) in snapshot.iter() {
        desired_nodes.insert(key.as_str());
        for neighbor in neighbors {
            desired_nodes.insert(neighbor.as_str());
            if neighbor != key {
                desired_edges.insert((key.as_str(), neighbor.as_str()));
            }
        }
    }

    assert_eq!(
        store.node_count(),
        desired_nodes.len(),
        "node count diverged from the snapshot's desired set"
    );
    for key in &desired_nodes {
        assert!(store.has_node(key), "store is missing desired node {key}");
    }

    assert_eq!(
        store.edge_count(),
        desired_edges.len(),
        "edge count diverged from the snapshot's desired set"
    );
    for (source, target) in &desired_edges {
        assert!(
            store.has_edge(source, target),
            "store is missing desired edge {source} -> {target}"
        );
    }

    assert_no_dangling_edges(store);
}
