//! Session identifier generation.
//!
//! Every display session gets a unique id so logs, reports, and frames from
//! concurrent sessions can be told apart. Ids are UUID v4 based and carry a
//! `session-` prefix for greppability.

use uuid::Uuid;

/// Generates unique session identifiers.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::utils::id_generator::IdGenerator;
///
/// let id = IdGenerator::new().generate_session_id();
/// assert!(id.starts_with("session-"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// New globally unique session id.
    #[must_use]
    pub fn generate_session_id(&self) -> String {
        format!("session-{}", Uuid::new_v4())
    }
}
