use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::{sync::oneshot, task};

use super::message::UpdateMessage;
use super::sink::{MemoryView, StdOutView, ViewFrame, ViewSink};
use super::source::SnapshotSource;
use super::stream::{ReportHub, ReportStream};
use crate::config::{FeedConfig, ViewSinkConfig};
use crate::session::{MessageOutcome, SessionError, SyncSession};

/// Counters for everything the feed's listener has seen.
///
/// Applied and ignored messages are routine; discarded payloads point at a
/// misbehaving producer, and invariant failures at a reconciler bug.
#[derive(Debug, Default)]
pub struct FeedMetrics {
    applied: AtomicU64,
    discarded: AtomicU64,
    ignored: AtomicU64,
    invariant_failures: AtomicU64,
}

impl FeedMetrics {
    /// Reconciliations applied to the store.
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }

    /// Recognized messages whose body failed snapshot decoding.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Messages skipped because their tag was not recognized.
    pub fn ignored(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }

    /// Reconciliations aborted on a store contract violation.
    pub fn invariant_failures(&self) -> u64 {
        self.invariant_failures.load(Ordering::Relaxed)
    }
}

/// UpdateFeed owns the listener task that drains inbound messages into a
/// session, refreshes view sinks, and broadcasts reconcile reports.
pub struct UpdateFeed {
    sinks: Arc<Mutex<Vec<Box<dyn ViewSink>>>>,
    inbound: (flume::Sender<UpdateMessage>, flume::Receiver<UpdateMessage>),
    hub: Arc<ReportHub>,
    metrics: Arc<FeedMetrics>,
    listener: Mutex<Option<ListenerState>>,
}

impl UpdateFeed {
    /// Start a feed around `session` with default configuration.
    pub fn spawn(session: SyncSession) -> Self {
        Self::spawn_with_config(session, &FeedConfig::default())
    }

    /// Start a feed around `session`, materializing the configured sinks.
    pub fn spawn_with_config(session: SyncSession, config: &FeedConfig) -> Self {
        let sinks: Vec<Box<dyn ViewSink>> = config
            .sinks
            .iter()
            .map(|sink| match sink {
                ViewSinkConfig::StdOut => Box::new(StdOutView::default()) as Box<dyn ViewSink>,
                ViewSinkConfig::Memory => Box::new(MemoryView::new()) as Box<dyn ViewSink>,
            })
            .collect();
        let feed = Self {
            sinks: Arc::new(Mutex::new(sinks)),
            inbound: flume::unbounded(),
            hub: ReportHub::new(config.report_capacity),
            metrics: Arc::new(FeedMetrics::default()),
            listener: Mutex::new(None),
        };
        feed.listen(session);
        feed
    }

    /// Dynamically add a sink (useful for per-request streaming).
    ///
    /// # Example
    /// ```no_run
    /// use tokio::sync::mpsc;
    /// use mirrorgraph::channel::{ChannelView, UpdateFeed};
    /// use mirrorgraph::session::SyncSession;
    ///
    /// let feed = UpdateFeed::spawn(SyncSession::new());
    ///
    /// let (tx, rx) = mpsc::unbounded_channel();
    /// feed.add_sink(ChannelView::new(tx));
    /// // Frames now go to the channel as well
    /// ```
    pub fn add_sink<T: ViewSink + 'static>(&self, sink: T) {
        self.sinks.lock().push(Box::new(sink));
    }

    /// Get a clone of the sender side so producers can submit messages.
    pub fn sender(&self) -> flume::Sender<UpdateMessage> {
        self.inbound.0.clone()
    }

    /// Subscribe to the stream of reconcile reports.
    pub fn subscribe(&self) -> ReportStream {
        self.hub.subscribe()
    }

    pub fn metrics(&self) -> Arc<FeedMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Spawn a task that drains `source` into this feed's inbound queue,
    /// logging channel lifecycle on the way.
    pub fn pump<S>(&self, mut source: S) -> task::JoinHandle<()>
    where
        S: SnapshotSource + 'static,
    {
        let sender = self.sender();
        task::spawn(async move {
            tracing::info!(transport = source.describe(), "update channel connected");
            while let Some(message) = source.next_message().await {
                if sender.send(message).is_err() {
                    tracing::warn!("update feed gone; stopping channel pump");
                    return;
                }
            }
            tracing::info!(transport = source.describe(), "update channel closed");
        })
    }

    fn listen(&self, mut session: SyncSession) {
        let mut guard = self.listener.lock();
        let receiver = self.inbound.1.clone();
        let sinks = Arc::clone(&self.sinks);
        let hub = Arc::clone(&self.hub);
        let metrics = Arc::clone(&self.metrics);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = task::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    recv = receiver.recv_async() => match recv {
                        Err(_) => break,
                        Ok(message) => {
                            dispatch(&mut session, &message, &sinks, &hub, &metrics);
                        }
                    }
                }
            }
            session
        });

        *guard = Some(ListenerState {
            shutdown_tx,
            handle,
        });
    }

    /// Stop the listener and recover the session it owned.
    ///
    /// Messages still queued at shutdown are dropped. Returns `None` if the
    /// feed was already stopped or the listener panicked.
    pub async fn stop(&self) -> Option<SyncSession> {
        let state = self.listener.lock().take()?;
        let _ = state.shutdown_tx.send(());
        match state.handle.await {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(error = %err, "update feed listener did not shut down cleanly");
                None
            }
        }
    }
}

impl Drop for UpdateFeed {
    fn drop(&mut self) {
        if let Some(state) = self.listener.lock().take() {
            let _ = state.shutdown_tx.send(());
            state.handle.abort();
        }
    }
}

fn dispatch(
    session: &mut SyncSession,
    message: &UpdateMessage,
    sinks: &Arc<Mutex<Vec<Box<dyn ViewSink>>>>,
    hub: &Arc<ReportHub>,
    metrics: &Arc<FeedMetrics>,
) {
    match session.apply_message(message) {
        Ok(MessageOutcome::Applied(report)) => {
            metrics.applied.fetch_add(1, Ordering::Relaxed);
            let frame = ViewFrame::capture(session.store(), &report);
            {
                let mut sinks_guard = sinks.lock();
                for sink in sinks_guard.iter_mut() {
                    if let Err(err) = sink.refresh(&frame) {
                        tracing::warn!(error = %err, "view sink refresh failed");
                    }
                }
            }
            if hub.publish(report).is_err() {
                tracing::trace!("no live report subscribers");
            }
        }
        Ok(MessageOutcome::Ignored { tag }) => {
            metrics.ignored.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%tag, "ignored message with unrecognized tag");
        }
        Err(SessionError::Snapshot(err)) => {
            metrics.discarded.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(error = %err, "discarding malformed snapshot payload");
        }
        Err(SessionError::Reconcile(err)) => {
            metrics.invariant_failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!(error = %err, "reconciliation aborted on invariant failure");
        }
    }
}

struct ListenerState {
    shutdown_tx: oneshot::Sender<()>,
    handle: task::JoinHandle<SyncSession>,
}
