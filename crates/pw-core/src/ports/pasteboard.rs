use anyhow::Result;

use crate::pasteboard::PasteboardFormat;

/// Narrow capability interface over the OS pasteboard.
///
/// Everything the engine needs from a platform is these four operations;
/// the capture loop, classifier and merge write-back stay platform-agnostic.
/// Reads are expected to be fast (sub-millisecond) and are called from the
/// capture loop's own task.
pub trait PasteboardPort: Send + Sync {
    /// Current value of the OS change counter. Incremented by the OS on
    /// every clipboard write from any application.
    fn read_change_count(&self) -> Result<i64>;

    /// Format identifiers currently advertised on the pasteboard. Queried
    /// once per cycle; callers must not re-query per format.
    fn read_formats(&self) -> Result<Vec<PasteboardFormat>>;

    /// Payload bytes for one format, `None` when the pasteboard does not
    /// carry that representation.
    fn read_bytes(&self, format: &PasteboardFormat) -> Result<Option<Vec<u8>>>;

    /// Replace the pasteboard content with plain text. Used by the merge
    /// write-back; bumps the OS change counter like any other write.
    fn write_text(&self, text: &str) -> Result<()>;
}
