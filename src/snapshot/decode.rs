//! Payload decoding into [`AdjacencySnapshot`].
//!
//! Decoding is pure and all-or-nothing: a structural violation anywhere in
//! the payload rejects the whole thing, and the graph store is never touched
//! by a rejected payload. Error variants carry the offending key/position and
//! the JSON type that was found so dropped messages leave a useful trace.

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

use super::AdjacencySnapshot;
use crate::utils::json_ext::json_type_name;

/// A payload failed structural validation and was discarded.
///
/// These are recovered locally: the feed logs a warning and moves on to the
/// next message. They never reach the graph store.
#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    /// The payload root is not a JSON object.
    #[error("snapshot body must be an object mapping node keys to neighbor lists, found {found}")]
    #[diagnostic(
        code(mirrorgraph::snapshot::not_an_object),
        help("Send a JSON object like {{\"1\": [\"2\", \"3\"]}}.")
    )]
    NotAnObject { found: &'static str },

    /// A mapping value is not an array.
    #[error("neighbor list for node {key:?} must be an array, found {found}")]
    #[diagnostic(code(mirrorgraph::snapshot::neighbors_not_an_array))]
    NeighborsNotAnArray { key: String, found: &'static str },

    /// A neighbor entry is not a string.
    #[error("neighbor {index} of node {key:?} must be a string key, found {found}")]
    #[diagnostic(code(mirrorgraph::snapshot::neighbor_not_a_string))]
    NeighborNotAString {
        key: String,
        index: usize,
        found: &'static str,
    },

    /// The payload text is not valid JSON at all.
    #[error("snapshot payload is not valid JSON")]
    #[diagnostic(code(mirrorgraph::snapshot::invalid_json))]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },
}

/// Decodes a parsed JSON value into an [`AdjacencySnapshot`].
///
/// # Errors
///
/// [`SnapshotError`] on any structural violation; the payload is rejected
/// whole.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::snapshot::decode_value;
/// use serde_json::json;
///
/// let snapshot = decode_value(&json!({"1": ["2", "3"]})).unwrap();
/// assert_eq!(snapshot.entry_count(), 1);
///
/// // Scenario: body is a string instead of a mapping.
/// assert!(decode_value(&json!("not a graph")).is_err());
/// ```
pub fn decode_value(value: &Value) -> Result<AdjacencySnapshot, SnapshotError> {
    let object = value.as_object().ok_or_else(|| SnapshotError::NotAnObject {
        found: json_type_name(value),
    })?;

    let mut entries = Vec::with_capacity(object.len());
    for (key, neighbors_value) in object {
        let neighbors_array =
            neighbors_value
                .as_array()
                .ok_or_else(|| SnapshotError::NeighborsNotAnArray {
                    key: key.clone(),
                    found: json_type_name(neighbors_value),
                })?;

        let mut neighbors = Vec::with_capacity(neighbors_array.len());
        for (index, neighbor_value) in neighbors_array.iter().enumerate() {
            let neighbor =
                neighbor_value
                    .as_str()
                    .ok_or_else(|| SnapshotError::NeighborNotAString {
                        key: key.clone(),
                        index,
                        found: json_type_name(neighbor_value),
                    })?;
            neighbors.push(neighbor.to_string());
        }
        entries.push((key.clone(), neighbors));
    }

    Ok(AdjacencySnapshot::from_entries(entries))
}

/// Parses JSON text and decodes it into an [`AdjacencySnapshot`].
///
/// # Errors
///
/// [`SnapshotError::InvalidJson`] for unparseable text, otherwise as
/// [`decode_value`].
pub fn decode_str(text: &str) -> Result<AdjacencySnapshot, SnapshotError> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_mapping_with_neighbor_order() {
        let snapshot = decode_value(&json!({"1": ["2", "3"], "4": []})).unwrap();
        assert_eq!(snapshot.entry_count(), 2);
        assert_eq!(
            snapshot.neighbors("1").unwrap(),
            &["2".to_string(), "3".to_string()]
        );
        assert_eq!(snapshot.neighbors("4").unwrap(), &[] as &[String]);
    }

    #[test]
    fn rejects_non_object_root() {
        let err = decode_value(&json!(["1", "2"])).unwrap_err();
        assert!(matches!(err, SnapshotError::NotAnObject { found: "array" }));
    }

    #[test]
    fn rejects_non_array_neighbor_list() {
        let err = decode_value(&json!({"1": "2"})).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::NeighborsNotAnArray { ref key, found: "string" } if key == "1"
        ));
    }

    #[test]
    fn rejects_non_string_neighbor_with_position() {
        let err = decode_value(&json!({"1": ["2", 3]})).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::NeighborNotAString { ref key, index: 1, found: "number" } if key == "1"
        ));
    }

    #[test]
    fn rejects_invalid_json_text() {
        let err = decode_str("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidJson { .. }));
    }

    #[test]
    fn decode_str_matches_decode_value() {
        let from_text = decode_str(r#"{"a": ["b"]}"#).unwrap();
        let from_value = decode_value(&json!({"a": ["b"]})).unwrap();
        assert_eq!(from_text, from_value);
    }
}
