//! Core types for the mirrorgraph engine.
//!
//! This module defines the fundamental identifiers used throughout the
//! system: node keys and the inbound update tags that classify messages on
//! the update channel.
//!
//! # Key Types
//!
//! - [`NodeKey`]: Opaque string identity of a node in the mirrored graph
//! - [`UpdateTag`]: Classifies inbound messages from the update channel
//!
//! # Examples
//!
//! ```rust
//! use mirrorgraph::types::UpdateTag;
//!
//! let tag = UpdateTag::from("graph_update");
//! assert!(tag.is_recognized());
//!
//! // Encode for persistence or logging
//! assert_eq!(tag.encode(), "graph_update");
//! assert_eq!(UpdateTag::decode("graph_reset"), UpdateTag::Reset);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque string identity of a node in the mirrored graph.
///
/// Keys are supplied by the upstream source of truth and are treated as
/// immutable once a node exists; the engine never interprets their content.
pub type NodeKey = String;

/// Classifies an inbound message on the update channel.
///
/// The three recognized tags all trigger the identical reconciliation: the
/// tag is informational and the engine never branches on which of the three
/// arrived. Anything else decodes to [`Other`](Self::Other) and is ignored
/// by the feed without error.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::types::UpdateTag;
///
/// assert_eq!(UpdateTag::decode("graph_init"), UpdateTag::Init);
/// assert_eq!(
///     UpdateTag::decode("heartbeat"),
///     UpdateTag::Other("heartbeat".to_string()),
/// );
/// assert!(!UpdateTag::Other("heartbeat".into()).is_recognized());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateTag {
    /// First full snapshot after a channel (re)connect.
    Init,

    /// Routine snapshot refresh.
    Update,

    /// Upstream rebuilt its graph from scratch.
    ///
    /// Reconciliation is full-state either way, so this carries no special
    /// behavior; it exists so producers can signal intent.
    Reset,

    /// Any tag the engine does not recognize. Ignored by the feed.
    Other(String),
}

impl UpdateTag {
    /// Encode an UpdateTag into its wire/persisted string form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mirrorgraph::types::UpdateTag;
    /// assert_eq!(UpdateTag::Init.encode(), "graph_init");
    /// assert_eq!(UpdateTag::Other("ping".into()).encode(), "ping");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            UpdateTag::Init => "graph_init".to_string(),
            UpdateTag::Update => "graph_update".to_string(),
            UpdateTag::Reset => "graph_reset".to_string(),
            UpdateTag::Other(s) => s.clone(),
        }
    }

    /// Decode a wire string back into an UpdateTag.
    ///
    /// Unrecognized strings become [`Other`](Self::Other) so that new
    /// upstream event types never fail decoding; they are simply ignored
    /// downstream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mirrorgraph::types::UpdateTag;
    /// assert_eq!(UpdateTag::decode("graph_update"), UpdateTag::Update);
    /// assert_eq!(UpdateTag::decode("ping"), UpdateTag::Other("ping".to_string()));
    /// ```
    pub fn decode(s: &str) -> Self {
        match s {
            "graph_init" => UpdateTag::Init,
            "graph_update" => UpdateTag::Update,
            "graph_reset" => UpdateTag::Reset,
            other => UpdateTag::Other(other.to_string()),
        }
    }

    /// Returns `true` if this tag triggers reconciliation.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for UpdateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "graph_init"),
            Self::Update => write!(f, "graph_update"),
            Self::Reset => write!(f, "graph_reset"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

// Developer Experience: allow using string literals where an UpdateTag is expected.
impl From<&str> for UpdateTag {
    fn from(s: &str) -> Self {
        UpdateTag::decode(s)
    }
}
