use miette::Diagnostic;
use serde_json::{Value, json};
use thiserror::Error;

use crate::types::UpdateTag;
use crate::utils::json_ext::json_type_name;

const TAG_FIELD: &str = "event";
const BODY_FIELD: &str = "graph";

/// One inbound message from the update channel.
///
/// The wire form is a two-field JSON envelope:
///
/// ```json
/// {"event": "graph_update", "graph": {"1": ["2", "3"]}}
/// ```
///
/// The body stays an opaque [`Value`] here; it is only decoded into a
/// snapshot once the tag is known to be recognized, so unknown event types
/// never pay (or fail) body decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMessage {
    pub tag: UpdateTag,
    pub body: Value,
}

impl UpdateMessage {
    pub fn new(tag: impl Into<UpdateTag>, body: Value) -> Self {
        Self {
            tag: tag.into(),
            body,
        }
    }

    /// Message tagged as the first snapshot after a (re)connect.
    pub fn init(body: Value) -> Self {
        Self::new(UpdateTag::Init, body)
    }

    /// Message tagged as a routine snapshot refresh.
    pub fn update(body: Value) -> Self {
        Self::new(UpdateTag::Update, body)
    }

    /// Message tagged as an upstream rebuild.
    pub fn reset(body: Value) -> Self {
        Self::new(UpdateTag::Reset, body)
    }

    /// Parses a raw channel payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the payload is not valid JSON or does
    /// not carry the two envelope fields.
    pub fn from_json_str(raw: &str) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Unpacks an already-parsed envelope value.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the value is not an object or lacks an
    /// envelope field.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut envelope) = value else {
            return Err(EnvelopeError::NotAnObject {
                found: json_type_name(&value),
            });
        };
        let tag = match envelope.remove(TAG_FIELD) {
            Some(Value::String(tag)) => UpdateTag::decode(&tag),
            Some(other) => {
                return Err(EnvelopeError::TagNotAString {
                    found: json_type_name(&other),
                });
            }
            None => return Err(EnvelopeError::MissingTag),
        };
        let body = envelope.remove(BODY_FIELD).ok_or(EnvelopeError::MissingBody)?;
        Ok(Self { tag, body })
    }

    /// Renders the envelope back to its wire form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            TAG_FIELD: self.tag.encode(),
            BODY_FIELD: self.body,
        })
    }

    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

/// Failures unpacking a channel payload into an [`UpdateMessage`].
///
/// These are producer-side defects; the feed logs and discards the payload
/// rather than tearing the channel down.
#[derive(Debug, Error, Diagnostic)]
pub enum EnvelopeError {
    #[error("payload is not valid JSON")]
    #[diagnostic(
        code(mirrorgraph::channel::invalid_json),
        help("channel payloads must be JSON objects like {{\"event\": ..., \"graph\": ...}}")
    )]
    InvalidJson(#[from] serde_json::Error),

    #[error("envelope must be a JSON object, found {found}")]
    #[diagnostic(code(mirrorgraph::channel::not_an_object))]
    NotAnObject { found: &'static str },

    #[error("envelope is missing the \"event\" field")]
    #[diagnostic(
        code(mirrorgraph::channel::missing_tag),
        help("producers must tag every message, e.g. {{\"event\": \"graph_update\", ...}}")
    )]
    MissingTag,

    #[error("envelope \"event\" field must be a string, found {found}")]
    #[diagnostic(code(mirrorgraph::channel::tag_not_a_string))]
    TagNotAString { found: &'static str },

    #[error("envelope is missing the \"graph\" field")]
    #[diagnostic(
        code(mirrorgraph::channel::missing_body),
        help("every tagged message carries a body, even if empty: {{\"graph\": {{}}}}")
    )]
    MissingBody,
}
