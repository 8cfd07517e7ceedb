use mirrorgraph::config::{EngineConfig, PlacementConfig};
use mirrorgraph::session::SyncSession;
use mirrorgraph::snapshot::AdjacencySnapshot;

/// The triangle 1 -> 2 -> 3 with a 1 -> 3 chord: three nodes, three edges,
/// and node 3 appearing only as a neighbor.
#[allow(dead_code)]
pub fn triangle_snapshot() -> AdjacencySnapshot {
    AdjacencySnapshot::from_pairs([("1", vec!["2", "3"]), ("2", vec!["3"])])
}

/// A linear chain n0 -> n1 -> ... of `len` nodes.
#[allow(dead_code)]
pub fn chain_snapshot(len: usize) -> AdjacencySnapshot {
    AdjacencySnapshot::from_pairs(
        (0..len.saturating_sub(1)).map(|i| (format!("n{i}"), vec![format!("n{}", i + 1)])),
    )
}

/// Engine configuration with seeded placement so positions are reproducible.
#[allow(dead_code)]
pub fn seeded_config() -> EngineConfig {
    EngineConfig::default().with_placement(PlacementConfig::new(1.0, Some(42)))
}

#[allow(dead_code)]
pub fn seeded_session() -> SyncSession {
    SyncSession::with_config(&seeded_config())
}
