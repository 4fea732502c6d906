use crate::snapshot::SourceApp;

/// Resolves the application that owns focus at capture time.
///
/// `None` means the frontmost app could not be determined; the snapshot is
/// still emitted, just without a source. Implementations log their own
/// failures rather than surfacing them.
pub trait ActiveAppPort: Send + Sync {
    fn current_app(&self) -> Option<SourceApp>;
}
