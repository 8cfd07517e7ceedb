use std::io::{self, Result as IoResult, Stdout, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::reconcile::ReconcileReport;
use crate::store::{EdgeAttributes, GraphStore, NodeAttributes};
use crate::telemetry::{PlainFormatter, ViewFormatter};
use crate::types::NodeKey;

/// Drawable projection of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub key: NodeKey,
    #[serde(flatten)]
    pub attributes: NodeAttributes,
}

/// Drawable projection of one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(flatten)]
    pub attributes: EdgeAttributes,
}

/// Everything a presentation layer needs to redraw after one reconciliation:
/// the mutation summary plus the full current graph as drawable primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub report: ReconcileReport,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl ViewFrame {
    /// Projects the store's current state. Entries are sorted by key so the
    /// same graph always renders the same frame.
    #[must_use]
    pub fn capture(store: &GraphStore, report: &ReconcileReport) -> Self {
        let mut nodes: Vec<NodeView> = store
            .nodes()
            .map(|(key, attributes)| NodeView {
                key: key.clone(),
                attributes: attributes.clone(),
            })
            .collect();
        nodes.sort_by(|a, b| a.key.cmp(&b.key));

        let mut edges: Vec<EdgeView> = store
            .edges()
            .map(|(source, target, attributes)| EdgeView {
                source: source.clone(),
                target: target.clone(),
                attributes: attributes.clone(),
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        Self {
            report: report.clone(),
            nodes,
            edges,
        }
    }
}

/// Abstraction over an output target that consumes full view frames.
pub trait ViewSink: Sync + Send {
    /// Handle one frame. The sink decides how to serialize/format it.
    fn refresh(&mut self, frame: &ViewFrame) -> IoResult<()>;
}

/// Stdout sink with optional formatting.
pub struct StdOutView<F: ViewFormatter = PlainFormatter> {
    handle: Stdout,
    formatter: F,
}

impl Default for StdOutView {
    fn default() -> Self {
        Self {
            handle: io::stdout(),
            formatter: PlainFormatter::default(),
        }
    }
}

impl<F: ViewFormatter> StdOutView<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            handle: io::stdout(),
            formatter,
        }
    }
}

impl<F: ViewFormatter> ViewSink for StdOutView<F> {
    fn refresh(&mut self, frame: &ViewFrame) -> IoResult<()> {
        let rendered = self.formatter.render_frame(frame).join_lines();
        self.handle.write_all(rendered.as_bytes())?;
        self.handle.flush()
    }
}

/// In-memory sink for testing and snapshots.
#[derive(Clone, Default)]
pub struct MemoryView {
    frames: Arc<Mutex<Vec<ViewFrame>>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames captured so far.
    pub fn snapshot(&self) -> Vec<ViewFrame> {
        self.frames.lock().clone()
    }

    /// The most recent frame, if any reconciliation has run.
    pub fn latest(&self) -> Option<ViewFrame> {
        self.frames.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl ViewSink for MemoryView {
    fn refresh(&mut self, frame: &ViewFrame) -> IoResult<()> {
        self.frames.lock().push(frame.clone());
        Ok(())
    }
}

/// Channel-based sink for streaming frames to async consumers (e.g. a
/// websocket handler pushing redraws to a browser).
pub struct ChannelView {
    tx: mpsc::UnboundedSender<ViewFrame>,
}

impl ChannelView {
    pub fn new(tx: mpsc::UnboundedSender<ViewFrame>) -> Self {
        Self { tx }
    }
}

impl ViewSink for ChannelView {
    fn refresh(&mut self, frame: &ViewFrame) -> IoResult<()> {
        self.tx
            .send(frame.clone())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "frame receiver dropped"))
    }
}
