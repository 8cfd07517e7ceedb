//! Per-session ownership of the graph store and reconciler.
//!
//! A [`SyncSession`] lives for the duration of one display session: it owns
//! the [`GraphStore`] and the [`Reconciler`], dispatches inbound messages,
//! and exposes the store to collaborators between reconciliations. Mutation
//! goes through the session only; there is no ambient global graph.
//!
//! # Examples
//!
//! ```rust
//! use mirrorgraph::channel::UpdateMessage;
//! use mirrorgraph::session::{MessageOutcome, SyncSession};
//! use serde_json::json;
//!
//! let mut session = SyncSession::new();
//!
//! let outcome = session
//!     .apply_message(&UpdateMessage::init(json!({"1": ["2"]})))
//!     .unwrap();
//! assert!(matches!(outcome, MessageOutcome::Applied(_)));
//! assert_eq!(session.store().node_count(), 2);
//!
//! // Unrecognized tags are ignored without touching the store.
//! let outcome = session
//!     .apply_message(&UpdateMessage::new("heartbeat", json!({})))
//!     .unwrap();
//! assert!(matches!(outcome, MessageOutcome::Ignored { .. }));
//! assert_eq!(session.store().node_count(), 2);
//! ```

use miette::Diagnostic;
use thiserror::Error;

use crate::channel::UpdateMessage;
use crate::config::EngineConfig;
use crate::reconcile::{ReconcileError, ReconcileReport, Reconciler};
use crate::snapshot::{AdjacencySnapshot, SnapshotError, decode_value};
use crate::store::GraphStore;
use crate::types::UpdateTag;
use crate::utils::id_generator::IdGenerator;

/// Failures surfaced through the session boundary.
#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    /// The message body failed snapshot decoding; the store is untouched.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Snapshot(#[from] SnapshotError),

    /// A reconciliation phase violated the store contract. Not transient:
    /// this indicates a reconciler bug.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// How the session handled one inbound message.
#[derive(Debug, Clone)]
pub enum MessageOutcome {
    /// A recognized tag; the body was decoded and reconciled.
    Applied(ReconcileReport),
    /// An unrecognized tag; no decode, no mutation.
    Ignored { tag: UpdateTag },
}

/// Owns one display session's graph and its reconciliation state.
#[derive(Debug)]
pub struct SyncSession {
    session_id: String,
    store: GraphStore,
    reconciler: Reconciler,
}

impl SyncSession {
    /// Fresh session with an empty store, default placement, and a generated
    /// id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        let session_id = IdGenerator::new().generate_session_id();
        tracing::info!(session = %session_id, "starting graph mirror session");
        Self {
            session_id,
            store: GraphStore::new(),
            reconciler: Reconciler::from_config(config),
        }
    }

    /// Overrides the generated session id (useful for correlating logs with
    /// an external session identity).
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Dispatches one inbound message.
    ///
    /// The three recognized tags all trigger the identical reconciliation;
    /// anything else is ignored without decoding the body.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Snapshot`] if a recognized message's body fails
    ///   decoding (store untouched; discard and move on).
    /// - [`SessionError::Reconcile`] on a store contract violation
    ///   (reconciler bug; observers must not be serviced).
    pub fn apply_message(
        &mut self,
        message: &UpdateMessage,
    ) -> Result<MessageOutcome, SessionError> {
        if !message.tag.is_recognized() {
            tracing::debug!(
                session = %self.session_id,
                tag = %message.tag,
                "ignoring message with unrecognized tag"
            );
            return Ok(MessageOutcome::Ignored {
                tag: message.tag.clone(),
            });
        }
        let snapshot = decode_value(&message.body)?;
        let report = self.apply_snapshot(&snapshot)?;
        Ok(MessageOutcome::Applied(report))
    }

    /// Reconciles an already-decoded snapshot against the store.
    ///
    /// # Errors
    ///
    /// [`SessionError::Reconcile`] on a store contract violation.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &AdjacencySnapshot,
    ) -> Result<ReconcileReport, SessionError> {
        let report = self.reconciler.reconcile(&mut self.store, snapshot)?;
        tracing::debug!(session = %self.session_id, report = %report, "applied snapshot");
        Ok(report)
    }

    /// The live graph, observable between reconciliations.
    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Mutable access for presentation-side attribute updates (layout
    /// nudges, drags) between reconciliations.
    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    /// Tears the graph down without ending the session.
    pub fn clear(&mut self) {
        tracing::info!(session = %self.session_id, "clearing session graph");
        self.store.clear();
    }

    /// Ends the session, releasing the store to the caller.
    #[must_use]
    pub fn into_store(self) -> GraphStore {
        self.store
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}
