use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::stream;
use thiserror::Error;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tokio::time::timeout;

use crate::reconcile::ReconcileReport;

/// Errors publishing a report to the hub.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("report hub closed")]
    Closed,
    #[error("report lag exceeded buffer; dropped {0} reports")]
    Lagged(usize),
}

/// Broadcast fan-out for reconcile reports. Slow subscribers lag rather than
/// backpressure the feed; lagged reports are counted on the hub.
#[derive(Debug)]
pub struct ReportHub {
    sender: Sender<ReconcileReport>,
    dropped_reports: AtomicUsize,
    capacity: usize,
}

impl ReportHub {
    pub fn new(capacity: usize) -> Arc<Self> {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Arc::new(Self {
            sender,
            dropped_reports: AtomicUsize::new(0),
            capacity,
        })
    }

    pub fn publish(&self, report: ReconcileReport) -> Result<(), EmitError> {
        match self.sender.send(report) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(report)) => {
                drop(report);
                Err(EmitError::Closed)
            }
        }
    }

    pub fn subscribe(self: &Arc<Self>) -> ReportStream {
        ReportStream {
            receiver: self.sender.subscribe(),
            hub: Arc::clone(self),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped(&self) -> usize {
        self.dropped_reports.load(Ordering::Relaxed)
    }
}

/// One subscriber's view of the report broadcast.
#[derive(Debug)]
pub struct ReportStream {
    receiver: Receiver<ReconcileReport>,
    hub: Arc<ReportHub>,
}

impl ReportStream {
    pub async fn recv(&mut self) -> Result<ReconcileReport, broadcast::error::RecvError> {
        match self.receiver.recv().await {
            Ok(report) => Ok(report),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                self.hub
                    .dropped_reports
                    .fetch_add(missed as usize, Ordering::Relaxed);
                Err(broadcast::error::RecvError::Lagged(missed))
            }
            Err(err) => Err(err),
        }
    }

    pub fn try_recv(&mut self) -> Result<ReconcileReport, broadcast::error::TryRecvError> {
        match self.receiver.try_recv() {
            Ok(report) => Ok(report),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                self.hub
                    .dropped_reports
                    .fetch_add(missed as usize, Ordering::Relaxed);
                Err(broadcast::error::TryRecvError::Lagged(missed))
            }
            Err(err) => Err(err),
        }
    }

    pub fn into_inner(self) -> Receiver<ReconcileReport> {
        self.receiver
    }

    pub fn into_blocking_iter(self) -> BlockingReportIter {
        BlockingReportIter {
            receiver: self.receiver,
            hub: self.hub,
        }
    }

    pub fn into_async_stream(self) -> impl futures_util::stream::Stream<Item = ReconcileReport> {
        stream::unfold(self, |mut stream| async move {
            loop {
                match stream.recv().await {
                    Ok(report) => return Some((report, stream)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }

    pub async fn next_timeout(&mut self, duration: Duration) -> Option<ReconcileReport> {
        loop {
            match timeout(duration, self.recv()).await {
                Ok(Ok(report)) => return Some(report),
                Ok(Err(broadcast::error::RecvError::Lagged(_))) => continue,
                Ok(Err(broadcast::error::RecvError::Closed)) => return None,
                Err(_) => return None,
            }
        }
    }
}

pub struct BlockingReportIter {
    receiver: Receiver<ReconcileReport>,
    hub: Arc<ReportHub>,
}

impl Iterator for BlockingReportIter {
    type Item = ReconcileReport;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.receiver.blocking_recv() {
                Ok(report) => return Some(report),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    self.hub
                        .dropped_reports
                        .fetch_add(missed as usize, Ordering::Relaxed);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let hub = ReportHub::new(8);
        let mut stream = hub.subscribe();
        hub.publish(ReconcileReport::default()).unwrap();
        let report = stream.recv().await.unwrap();
        assert!(report.is_noop());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_closed() {
        let hub = ReportHub::new(8);
        let err = hub.publish(ReconcileReport::default()).unwrap_err();
        assert!(matches!(err, EmitError::Closed));
    }

    #[tokio::test]
    async fn lagged_reports_are_counted() {
        let hub = ReportHub::new(1);
        let mut stream = hub.subscribe();
        for _ in 0..3 {
            hub.publish(ReconcileReport::default()).unwrap();
        }
        // Capacity 1: the first recv observes the overwrite as lag.
        let err = stream.recv().await.unwrap_err();
        assert!(matches!(err, broadcast::error::RecvError::Lagged(_)));
        assert!(hub.dropped() >= 1);
        assert_eq!(hub.capacity(), 1);
    }

    #[tokio::test]
    async fn next_timeout_returns_none_when_idle() {
        let hub = ReportHub::new(4);
        let mut stream = hub.subscribe();
        let got = stream.next_timeout(Duration::from_millis(10)).await;
        assert!(got.is_none());
    }
}
