use std::sync::Arc;

use crate::snapshot::PasteboardSnapshot;

/// Outbound edge to the external history/UI component.
///
/// Invoked at most once per accepted cycle. `publish` must not block: the
/// sink's latency must never delay the next poll, so implementations enqueue
/// and return. A sink that has gone away is the sink's problem, not the
/// loop's.
pub trait SnapshotSinkPort: Send + Sync {
    fn publish(&self, snapshot: Arc<PasteboardSnapshot>);
}
