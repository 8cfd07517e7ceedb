//! Attribute bags carried by stored nodes and edges.
//!
//! Attributes are display-oriented data the engine preserves across
//! reconciliations but never interprets: a label, a spatial position, a
//! visual size, and a color string. Defaults mirror what a typical
//! presentation layer starts from; the reconciler assigns them to entities
//! it materializes and leaves surviving entities untouched.
//!
//! # Examples
//!
//! ```rust
//! use mirrorgraph::store::{NodeAttributes, Position};
//!
//! // Default attributes for a newly materialized node
//! let attrs = NodeAttributes::for_key("42");
//! assert_eq!(attrs.label, "42");
//!
//! // Builder-style customization
//! let attrs = NodeAttributes::for_key("hub")
//!     .with_position(Position::new(0.3, 0.7))
//!     .with_size(20.0)
//!     .with_color("#1a6");
//! assert_eq!(attrs.position, Position::new(0.3, 0.7));
//! ```

use serde::{Deserialize, Serialize};

/// Default visual size for nodes the reconciler materializes.
pub const DEFAULT_NODE_SIZE: f64 = 10.0;

/// Default visual size for edges the reconciler materializes.
pub const DEFAULT_EDGE_SIZE: f64 = 5.0;

/// Default color for nodes the reconciler materializes.
pub const DEFAULT_NODE_COLOR: &str = "#999";

/// Default color for edges the reconciler materializes.
pub const DEFAULT_EDGE_COLOR: &str = "#ccc";

/// A 2D position in the presentation layer's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Mutable attribute bag for a stored node.
///
/// The node's key is immutable and lives in the store's table; everything
/// here may change between reconciliations (a layout engine nudging
/// positions, a user dragging a node) and survives any update that keeps the
/// node in the desired set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Display label. Defaults to the key's string form.
    pub label: String,
    /// Spatial position assigned at materialization and preserved afterwards.
    pub position: Position,
    /// Visual size.
    pub size: f64,
    /// Visual color.
    pub color: String,
}

impl NodeAttributes {
    /// Default attributes for `key`: label = key, origin position, default
    /// size and color.
    ///
    /// The reconciler replaces the origin position with a placeholder drawn
    /// from its placement strategy; direct store users get a deterministic
    /// starting point.
    #[must_use]
    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            label: key.into(),
            position: Position::default(),
            size: DEFAULT_NODE_SIZE,
            color: DEFAULT_NODE_COLOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Mutable attribute bag for a stored edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    /// Visual size.
    pub size: f64,
    /// Visual color.
    pub color: String,
}

impl EdgeAttributes {
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl Default for EdgeAttributes {
    fn default() -> Self {
        Self {
            size: DEFAULT_EDGE_SIZE,
            color: DEFAULT_EDGE_COLOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_defaults_label_to_key() {
        let attrs = NodeAttributes::for_key("n1");
        assert_eq!(attrs.label, "n1");
        assert_eq!(attrs.position, Position::default());
        assert_eq!(attrs.size, DEFAULT_NODE_SIZE);
        assert_eq!(attrs.color, DEFAULT_NODE_COLOR);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let attrs = NodeAttributes::for_key("n1")
            .with_label("first")
            .with_position((1.5, -2.0))
            .with_size(14.0)
            .with_color("#fff");
        assert_eq!(attrs.label, "first");
        assert_eq!(attrs.position, Position::new(1.5, -2.0));
        assert_eq!(attrs.size, 14.0);
        assert_eq!(attrs.color, "#fff");
    }

    #[test]
    fn edge_defaults() {
        let attrs = EdgeAttributes::default();
        assert_eq!(attrs.size, DEFAULT_EDGE_SIZE);
        assert_eq!(attrs.color, DEFAULT_EDGE_COLOR);
    }
}
