//! Update channel plumbing: envelopes, the feed, view sinks, and report fan-out.
//!
//! The module is organised around a queue-fed [`UpdateFeed`] whose listener
//! task owns the session, with [`ViewSink`]s for presentation refresh and a
//! broadcast-based [`ReportHub`] for consuming the resulting [`ReportStream`].

pub mod feed;
pub mod message;
pub mod sink;
pub mod source;
pub mod stream;

pub use feed::{FeedMetrics, UpdateFeed};
pub use message::{EnvelopeError, UpdateMessage};
pub use sink::{ChannelView, EdgeView, MemoryView, NodeView, StdOutView, ViewFrame, ViewSink};
pub use source::{ScriptedSource, SnapshotSource};
pub use stream::{BlockingReportIter, EmitError, ReportHub, ReportStream};
