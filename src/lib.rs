//! # Mirrorgraph: Live Graph Reconciliation Engine
//!
//! Mirrorgraph keeps a mutable, in-memory directed graph synchronized against
//! a stream of adjacency-list snapshots while preserving entity identity:
//! nodes and edges that survive an update keep their attribute objects
//! (positions, labels, colors) untouched, so a presentation layer never sees
//! surviving entities jump or restyle.
//!
//! ## Core Concepts
//!
//! - **Graph Store**: Keyed nodes and directed edges with mutable attribute bags
//! - **Snapshots**: Decoded adjacency lists describing the desired graph
//! - **Reconciler**: Diffs store against snapshot and applies the minimal mutation
//! - **Update Feed**: Async queue + listener that drives a session from channel messages
//! - **View Sinks**: Presentation boundary consuming drawable frames per reconciliation
//!
//! ## Quick Start
//!
//! ### Driving a Session by Hand
//!
//! [`session::SyncSession`] owns the store and reconciler; feed it envelope
//! messages or pre-decoded snapshots:
//!
//! ```
//! use mirrorgraph::channel::UpdateMessage;
//! use mirrorgraph::session::SyncSession;
//! use serde_json::json;
//!
//! let mut session = SyncSession::new();
//!
//! // First snapshot materializes everything it mentions.
//! session
//!     .apply_message(&UpdateMessage::init(json!({"1": ["2", "3"]})))
//!     .unwrap();
//! assert_eq!(session.store().node_count(), 3);
//! assert!(session.store().has_edge("1", "2"));
//!
//! // The next snapshot drops node "3"; "1" and "2" keep their attributes.
//! session
//!     .apply_message(&UpdateMessage::update(json!({"1": ["2"]})))
//!     .unwrap();
//! assert!(!session.store().has_node("3"));
//! ```
//!
//! ### Identity Preservation
//!
//! Attribute edits made between updates survive any snapshot that keeps the
//! entity:
//!
//! ```
//! use mirrorgraph::session::SyncSession;
//! use mirrorgraph::snapshot::decode_str;
//! use mirrorgraph::store::Position;
//!
//! let mut session = SyncSession::new();
//! let snapshot = decode_str(r#"{"1": ["2"]}"#).unwrap();
//! session.apply_snapshot(&snapshot).unwrap();
//!
//! // A user drags node "1" somewhere meaningful...
//! session
//!     .store_mut()
//!     .node_attributes_mut("1")
//!     .unwrap()
//!     .position = Position::new(0.3, 0.7);
//!
//! // ...and the position survives the next update wholesale.
//! session.apply_snapshot(&snapshot).unwrap();
//! assert_eq!(
//!     session.store().node_attributes("1").unwrap().position,
//!     Position::new(0.3, 0.7),
//! );
//! ```
//!
//! ### Streaming Through a Feed
//!
//! [`channel::UpdateFeed`] runs the session on a listener task, refreshes
//! view sinks after every applied snapshot, and broadcasts reports:
//!
//! ```no_run
//! use mirrorgraph::channel::{ScriptedSource, UpdateFeed, UpdateMessage};
//! use mirrorgraph::session::SyncSession;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let feed = UpdateFeed::spawn(SyncSession::new());
//! let mut reports = feed.subscribe();
//!
//! let pump = feed.pump(ScriptedSource::new([
//!     UpdateMessage::init(json!({"1": ["2", "3"]})),
//!     UpdateMessage::update(json!({"1": ["2"], "4": ["1"]})),
//! ]));
//!
//! while let Ok(report) = reports.recv().await {
//!     println!("reconciled: {report}");
//! #   break;
//! }
//!
//! pump.await.expect("source drained");
//! let session = feed.stop().await.expect("listener running");
//! println!("final graph: {} nodes", session.store().node_count());
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Malformed payloads never corrupt the store: decoding is all-or-nothing,
//! and the feed logs and discards bad messages while the graph retains its
//! last-reconciled state. Domain errors carry miette diagnostics:
//!
//! ```
//! use mirrorgraph::snapshot::{decode_str, SnapshotError};
//!
//! let err = decode_str(r#"{"1": "not-an-array"}"#).unwrap_err();
//! assert!(matches!(err, SnapshotError::NeighborsNotAnArray { .. }));
//! ```
//!
//! ## Module Guide
//!
//! - [`store`] - Graph store: nodes, edges, attributes, iteration
//! - [`snapshot`] - Snapshot decoding and incremental builders
//! - [`reconcile`] - Diff-and-apply engine with placement and reports
//! - [`channel`] - Update feed, envelopes, view sinks, report fan-out
//! - [`session`] - Per-session ownership of store and reconciler
//! - [`config`] - Engine configuration with environment fallback
//! - [`telemetry`] - Frame/report formatting for terminal sinks
//! - [`types`] - Node keys and update tags

pub mod channel;
pub mod config;
pub mod reconcile;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod utils;
