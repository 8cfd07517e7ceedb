use std::io::IsTerminal;

use crate::channel::sink::ViewFrame;
use crate::reconcile::ReconcileReport;

pub const CONTEXT_COLOR: &str = "\x1b[32m"; // green
pub const LINE_COLOR: &str = "\x1b[35m"; // magenta / dark pink
pub const RESET_COLOR: &str = "\x1b[0m";

/// Formatter color mode for rendered view output.
///
/// Controls whether ANSI color codes are included in formatted output:
/// - [`FormatterMode::Auto`]: Automatically detects TTY capability via `stderr.is_terminal()`
/// - [`FormatterMode::Colored`]: Always include color codes (for forced color output)
/// - [`FormatterMode::Plain`]: Never include color codes (for logs/files)
///
/// # Examples
/// ```
/// use mirrorgraph::telemetry::FormatterMode;
///
/// // Auto-detect based on TTY
/// let mode = FormatterMode::auto_detect();
///
/// // Force colored output
/// let mode = FormatterMode::Colored;
///
/// // Force plain output for logging
/// let mode = FormatterMode::Plain;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterMode {
    /// Auto-detect TTY capability (checks `stderr.is_terminal()`)
    #[default]
    Auto,
    /// Always include ANSI color codes
    Colored,
    /// Never include ANSI color codes
    Plain,
}

impl FormatterMode {
    /// Auto-detect formatter mode based on stderr TTY capability.
    ///
    /// Returns `FormatterMode::Colored` if stderr is a terminal, otherwise `FormatterMode::Plain`.
    pub fn auto_detect() -> Self {
        if std::io::stderr().is_terminal() {
            FormatterMode::Colored
        } else {
            FormatterMode::Plain
        }
    }

    /// Returns true if this mode should use colored output.
    ///
    /// For `Auto` mode, performs TTY detection on each call.
    pub fn is_colored(&self) -> bool {
        match self {
            FormatterMode::Auto => std::io::stderr().is_terminal(),
            FormatterMode::Colored => true,
            FormatterMode::Plain => false,
        }
    }
}

/// Rendered output for a view item that can be consumed by sinks.
#[derive(Clone, Debug, Default)]
pub struct ViewRender {
    pub context: Option<String>,
    pub lines: Vec<String>,
}

impl ViewRender {
    pub fn join_lines(&self) -> String {
        self.lines.join("")
    }
}

pub trait ViewFormatter: Send + Sync {
    fn render_frame(&self, frame: &ViewFrame) -> ViewRender;
    fn render_report(&self, report: &ReconcileReport) -> ViewRender;
}

/// Plain text formatter with optional ANSI color codes.
///
/// Color output is controlled by [`FormatterMode`]:
/// - `Auto`: Uses color when stderr is a TTY
/// - `Colored`: Always uses color
/// - `Plain`: Never uses color
///
/// # Examples
/// ```
/// use mirrorgraph::telemetry::{PlainFormatter, FormatterMode};
///
/// // Auto-detect TTY
/// let formatter = PlainFormatter::new();
///
/// // Force plain output (no colors)
/// let formatter = PlainFormatter::with_mode(FormatterMode::Plain);
/// ```
pub struct PlainFormatter {
    mode: FormatterMode,
}

impl PlainFormatter {
    /// Create a new formatter with auto-detected color mode.
    pub fn new() -> Self {
        Self {
            mode: FormatterMode::Auto,
        }
    }

    /// Create a new formatter with explicit color mode.
    pub fn with_mode(mode: FormatterMode) -> Self {
        Self { mode }
    }

    /// Get color prefix string based on current mode.
    fn color<'a>(&self, ansi_code: &'a str) -> &'a str {
        if self.mode.is_colored() {
            ansi_code
        } else {
            ""
        }
    }

    /// Get reset color string based on current mode.
    fn reset(&self) -> &str {
        if self.mode.is_colored() {
            RESET_COLOR
        } else {
            ""
        }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFormatter for PlainFormatter {
    fn render_frame(&self, frame: &ViewFrame) -> ViewRender {
        let mut lines = Vec::with_capacity(1 + frame.nodes.len() + frame.edges.len());
        lines.push(format!(
            "{}[{}] {}{}\n",
            self.color(CONTEXT_COLOR),
            frame.report.at.format("%H:%M:%S%.3f"),
            frame.report,
            self.reset()
        ));
        for node in &frame.nodes {
            lines.push(format!(
                "{}  node {} \"{}\" @ ({:.2}, {:.2}){}\n",
                self.color(LINE_COLOR),
                node.key,
                node.attributes.label,
                node.attributes.position.x,
                node.attributes.position.y,
                self.reset()
            ));
        }
        for edge in &frame.edges {
            lines.push(format!(
                "{}  edge {} -> {}{}\n",
                self.color(LINE_COLOR),
                edge.source,
                edge.target,
                self.reset()
            ));
        }
        ViewRender {
            context: Some(frame.report.to_string()),
            lines,
        }
    }

    fn render_report(&self, report: &ReconcileReport) -> ViewRender {
        let line = if self.mode.is_colored() {
            format!("{LINE_COLOR}{report}{RESET_COLOR}\n")
        } else {
            format!("{report}\n")
        };
        ViewRender {
            context: Some(report.to_string()),
            lines: vec![line],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EdgeAttributes, GraphStore, NodeAttributes, Position};

    fn sample_frame() -> ViewFrame {
        let mut store = GraphStore::new();
        store
            .add_node(
                "1",
                NodeAttributes::for_key("1").with_position(Position::new(0.25, -0.5)),
            )
            .unwrap();
        store.add_node("2", NodeAttributes::for_key("2")).unwrap();
        store
            .add_edge("1", "2", EdgeAttributes::default())
            .unwrap();
        ViewFrame::capture(&store, &ReconcileReport::default())
    }

    #[test]
    fn plain_mode_emits_no_ansi_codes() {
        let formatter = PlainFormatter::with_mode(FormatterMode::Plain);
        let rendered = formatter.render_frame(&sample_frame()).join_lines();
        assert!(!rendered.contains("\x1b["));
        assert!(rendered.contains("node 1 \"1\" @ (0.25, -0.50)"));
        assert!(rendered.contains("edge 1 -> 2"));
    }

    #[test]
    fn colored_mode_wraps_lines() {
        let formatter = PlainFormatter::with_mode(FormatterMode::Colored);
        let rendered = formatter.render_frame(&sample_frame()).join_lines();
        assert!(rendered.contains(CONTEXT_COLOR));
        assert!(rendered.contains(LINE_COLOR));
        assert!(rendered.contains(RESET_COLOR));
    }

    #[test]
    fn report_render_is_one_line() {
        let formatter = PlainFormatter::with_mode(FormatterMode::Plain);
        let render = formatter.render_report(&ReconcileReport::default());
        assert_eq!(render.lines.len(), 1);
        assert!(render.context.is_some());
    }
}
