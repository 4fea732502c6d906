use std::sync::Arc;

use pw_core::ports::SnapshotSinkPort;
use pw_core::snapshot::PasteboardSnapshot;
use tokio::sync::mpsc;

/// Sink that forwards snapshots onto an unbounded channel.
///
/// `publish` never blocks. If the receiving side has gone away the snapshot
/// is dropped with a log line rather than stalling the capture loop.
pub struct ChannelSnapshotSink {
    tx: mpsc::UnboundedSender<Arc<PasteboardSnapshot>>,
}

impl ChannelSnapshotSink {
    pub fn new(tx: mpsc::UnboundedSender<Arc<PasteboardSnapshot>>) -> Self {
        Self { tx }
    }

    /// The sink and the receiving end for the history/UI side.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Arc<PasteboardSnapshot>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl SnapshotSinkPort for ChannelSnapshotSink {
    fn publish(&self, snapshot: Arc<PasteboardSnapshot>) {
        if self.tx.send(snapshot).is_err() {
            log::debug!("history sink receiver dropped; snapshot discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_snapshot(text: &str) -> Arc<PasteboardSnapshot> {
        Arc::new(PasteboardSnapshot {
            captured_at_ms: 0,
            source_app: None,
            text: Some(text.to_string()),
            rich_text: None,
            image: None,
            files: Vec::new(),
        })
    }

    #[tokio::test]
    async fn snapshots_arrive_in_publish_order() {
        let (sink, mut rx) = ChannelSnapshotSink::channel();
        sink.publish(text_snapshot("first"));
        sink.publish(text_snapshot("second"));

        assert_eq!(rx.recv().await.unwrap().text.as_deref(), Some("first"));
        assert_eq!(rx.recv().await.unwrap().text.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn publish_after_receiver_dropped_does_not_panic() {
        let (sink, rx) = ChannelSnapshotSink::channel();
        drop(rx);
        sink.publish(text_snapshot("ignored"));
    }
}
