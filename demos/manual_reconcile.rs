//! Manual Reconciliation Walkthrough
//!
//! Drives a `SyncSession` by hand through the full reconciliation story:
//! materializing a first snapshot, preserving dragged positions across
//! updates, cascading edge removal, idempotent re-application, and the
//! diagnostics produced by malformed payloads.
//!
//! Running This Demo:
//! ```bash
//! cargo run --example manual_reconcile
//! ```

use miette::Result;
use serde_json::json;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mirrorgraph::channel::{UpdateMessage, ViewFrame};
use mirrorgraph::session::{MessageOutcome, SyncSession};
use mirrorgraph::snapshot::decode_str;
use mirrorgraph::store::Position;
use mirrorgraph::telemetry::{FormatterMode, PlainFormatter, ViewFormatter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(true),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive("mirrorgraph=info".parse().unwrap())
                .add_directive("manual_reconcile=info".parse().unwrap()),
        )
        .with(ErrorLayer::default())
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    miette::set_panic_hook();

    let mut session = SyncSession::new();
    let formatter = PlainFormatter::with_mode(FormatterMode::Plain);

    // First snapshot: everything it mentions materializes, including node
    // "3" which only ever appears as a neighbor.
    println!("=== Initial snapshot ===");
    let outcome = session.apply_message(&UpdateMessage::init(json!({
        "1": ["2", "3"],
        "2": ["3"],
    })))?;
    if let MessageOutcome::Applied(report) = outcome {
        println!("{report}");
    }

    // A user drags node "1" somewhere meaningful between updates.
    println!("\n=== Dragging node 1 to (0.30, 0.70) ===");
    let attrs = session
        .store_mut()
        .node_attributes_mut("1")
        .expect("node 1 just materialized");
    attrs.position = Position::new(0.3, 0.7);
    attrs.color = "#1a6".to_string();

    // The update drops node "3" (cascading its edges), adds node "4", and
    // keeps "1" and "2" untouched.
    println!("\n=== Update: drop 3, add 4 ===");
    let report = session.apply_snapshot(&decode_str(r#"{"1": ["2"], "4": ["1"]}"#)?)?;
    println!("{report}");

    let kept = session
        .store()
        .node_attributes("1")
        .expect("node 1 survives");
    println!(
        "node 1 survived at ({:.2}, {:.2}) in {}",
        kept.position.x, kept.position.y, kept.color
    );
    assert_eq!(kept.position, Position::new(0.3, 0.7));
    assert!(!session.store().has_node("3"));

    // Re-applying the same snapshot is a no-op.
    println!("\n=== Idempotent re-application ===");
    let report = session.apply_snapshot(&decode_str(r#"{"1": ["2"], "4": ["1"]}"#)?)?;
    println!("{report} (noop: {})", report.is_noop());

    // Malformed payloads are rejected wholesale; the store is untouched.
    println!("\n=== Malformed payload diagnostics ===");
    let before = session.store().node_count();
    match session.apply_message(&UpdateMessage::update(json!({"1": "not-an-array"}))) {
        Ok(_) => unreachable!("malformed body must not apply"),
        Err(err) => println!("{:?}", miette::Report::new(err)),
    }
    assert_eq!(session.store().node_count(), before);

    // Render the final state the way a stdout sink would.
    println!("\n=== Final frame (plain mode) ===");
    let last_report = session.apply_snapshot(&decode_str(r#"{"1": ["2"], "4": ["1"]}"#)?)?;
    let frame = ViewFrame::capture(session.store(), &last_report);
    print!("{}", formatter.render_frame(&frame).join_lines());

    Ok(())
}
