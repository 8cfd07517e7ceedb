use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use super::message::UpdateMessage;

/// Pluggable transport feeding messages into an update feed.
///
/// Implementors wrap whatever actually delivers snapshots (a websocket, an
/// SSE stream, a replayed capture) and surface them one envelope at a time.
/// Returning `None` signals the channel closed; the feed logs the closure
/// and keeps the store at its last-reconciled state.
#[async_trait]
pub trait SnapshotSource: Send {
    /// Next inbound message, or `None` once the channel is exhausted.
    async fn next_message(&mut self) -> Option<UpdateMessage>;

    /// Human-readable transport description for lifecycle logs.
    fn describe(&self) -> &str;
}

/// Replays a fixed message sequence, optionally pacing them out.
///
/// Backs tests and demos: stands in for a live transport without any I/O.
pub struct ScriptedSource {
    messages: VecDeque<UpdateMessage>,
    delay: Option<Duration>,
    description: String,
}

impl ScriptedSource {
    pub fn new(messages: impl IntoIterator<Item = UpdateMessage>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
            delay: None,
            description: "scripted".to_string(),
        }
    }

    /// Sleep this long before yielding each message.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn remaining(&self) -> usize {
        self.messages.len()
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn next_message(&mut self) -> Option<UpdateMessage> {
        let message = self.messages.pop_front()?;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Some(message)
    }

    fn describe(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scripted_source_drains_in_order() {
        let mut source = ScriptedSource::new([
            UpdateMessage::init(json!({})),
            UpdateMessage::update(json!({"1": []})),
        ]);
        assert_eq!(source.remaining(), 2);

        let first = source.next_message().await.unwrap();
        assert_eq!(first.tag, crate::types::UpdateTag::Init);
        let second = source.next_message().await.unwrap();
        assert_eq!(second.tag, crate::types::UpdateTag::Update);
        assert!(source.next_message().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn delay_paces_messages() {
        let mut source = ScriptedSource::new([UpdateMessage::init(json!({}))])
            .with_delay(Duration::from_millis(50));
        let started = tokio::time::Instant::now();
        source.next_message().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
