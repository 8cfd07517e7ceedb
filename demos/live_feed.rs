//! Live Update Feed Demo
//!
//! Showcases the async side of the engine: a feed listener owning the
//! session, a scripted transport standing in for a live channel, view sinks
//! refreshing after every applied snapshot, and the report broadcast.
//!
//! What You'll Learn:
//! 1. Feed Construction: `UpdateFeed::spawn_with_config` with configured sinks
//! 2. Transports: pumping a `SnapshotSource` into the inbound queue
//! 3. Resilience: unknown tags and malformed payloads never stop the feed
//! 4. Observability: report subscription and feed metrics
//! 5. Shutdown: recovering the session (and its store) from `stop()`
//!
//! Running This Demo:
//! ```bash
//! cargo run --example live_feed
//! ```

use std::time::Duration;

use miette::Result;
use serde_json::json;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mirrorgraph::channel::{MemoryView, ScriptedSource, UpdateFeed, UpdateMessage};
use mirrorgraph::config::{EngineConfig, FeedConfig, PlacementConfig};
use mirrorgraph::session::SyncSession;

fn init_tracing() {
    let fmt_layer = fmt::layer().with_target(false).with_ansi(true);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,mirrorgraph=info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    miette::set_panic_hook();
    demo().await
}

async fn demo() -> Result<()> {
    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║                 Live Update Feed Demo                    ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    // Step 1: session + feed. A fixed placement seed keeps the layout
    // reproducible between runs; the stdout view renders every frame.
    info!("Step 1: spawning feed with stdout view and seeded placement");
    let config = EngineConfig::default()
        .with_placement(PlacementConfig::new(1.0, Some(42)))
        .with_feed(FeedConfig::with_stdout_view());
    let session = SyncSession::with_config(&config);
    let session_id = session.session_id().to_string();
    info!(session = %session_id, "session ready");

    let feed = UpdateFeed::spawn_with_config(session, &config.feed);

    // A memory view on the side, so we can inspect captured frames later.
    let memory = MemoryView::new();
    feed.add_sink(memory.clone());

    let mut reports = feed.subscribe();
    let metrics = feed.metrics();

    // Step 2: a scripted transport plays the part of a live channel,
    // including the traffic a well-behaved feed must shrug off.
    info!("Step 2: pumping a scripted update channel");
    let pump = feed.pump(
        ScriptedSource::new([
            UpdateMessage::init(json!({"1": ["2", "3"], "2": ["3"]})),
            UpdateMessage::new("heartbeat", json!({"seq": 1})),
            UpdateMessage::update(json!({"1": ["2"], "4": ["1"]})),
            UpdateMessage::update(json!({"1": "not-an-array"})),
            UpdateMessage::reset(json!({"a": ["b"]})),
        ])
        .with_delay(Duration::from_millis(20))
        .with_description("scripted-demo"),
    );

    // Step 3: consume the report stream until the channel goes quiet.
    info!("Step 3: consuming reconcile reports");
    while let Some(report) = reports.next_timeout(Duration::from_millis(500)).await {
        info!(%report, "reconciled");
    }
    pump.await.ok();

    // Step 4: metrics tell the whole story, including what was dropped.
    info!("Step 4: feed metrics");
    info!(
        applied = metrics.applied(),
        ignored = metrics.ignored(),
        discarded = metrics.discarded(),
        invariant_failures = metrics.invariant_failures(),
        "listener counters"
    );

    let frames = memory.snapshot();
    info!(frames = frames.len(), "frames captured by memory view");

    // Step 5: stop the feed and recover the session.
    info!("Step 5: stopping feed");
    let session = feed.stop().await.expect("listener should still be running");
    info!(
        session = %session.session_id(),
        nodes = session.store().node_count(),
        edges = session.store().edge_count(),
        "final store after reset snapshot"
    );
    assert_eq!(session.store().node_count(), 2);
    assert!(session.store().has_edge("a", "b"));

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║                      Demo Complete                       ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    Ok(())
}
