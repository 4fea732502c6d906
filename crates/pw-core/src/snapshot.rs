//! The captured clipboard state handed to the history sink.

use serde::{Deserialize, Serialize};

/// Application that owned focus when the capture happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceApp {
    /// Filesystem path or bundle identifier, e.g. `/Applications/Safari.app`.
    /// The app-ignore list matches against this field.
    pub path: String,
    pub name: String,
    pub icon: Option<String>,
}

impl SourceApp {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            icon: None,
        }
    }
}

/// Styled counterparts of a text capture. Either variant may be present on
/// its own; both ride along with the plain text when the producer offers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    pub html: Option<String>,
    pub rtf: Option<String>,
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        self.html.is_none() && self.rtf.is_none()
    }
}

/// A persisted raster artifact. `thumb_file_name` is `None` when thumbnail
/// generation failed; the snapshot is still emitted in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageArtifact {
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
    pub file_name: String,
    pub thumb_file_name: Option<String>,
}

/// One entry of a file-list capture, in pasteboard promise order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    /// Display name (final path component).
    pub file_name: String,
    pub thumb_file_name: Option<String>,
    pub size_bytes: u64,
    pub is_directory: bool,
}

/// One immutable captured clipboard state.
///
/// Constructed atomically by the capture loop after classification and
/// filtering succeed, then handed to the sink behind `Arc` and never mutated.
/// The engine keeps no snapshot history of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteboardSnapshot {
    pub captured_at_ms: i64,
    pub source_app: Option<SourceApp>,
    pub text: Option<String>,
    pub rich_text: Option<RichText>,
    pub image: Option<ImageArtifact>,
    pub files: Vec<FileEntry>,
}

impl PasteboardSnapshot {
    /// An all-empty snapshot is never emitted; callers check this before
    /// handing the snapshot to the sink.
    pub fn has_content(&self) -> bool {
        self.text.is_some()
            || self.rich_text.as_ref().is_some_and(|rt| !rt.is_empty())
            || self.image.is_some()
            || !self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> PasteboardSnapshot {
        PasteboardSnapshot {
            captured_at_ms: 0,
            source_app: None,
            text: None,
            rich_text: None,
            image: None,
            files: Vec::new(),
        }
    }

    #[test]
    fn empty_snapshot_has_no_content() {
        assert!(!empty_snapshot().has_content());
    }

    #[test]
    fn text_counts_as_content() {
        let snapshot = PasteboardSnapshot {
            text: Some("hello".into()),
            ..empty_snapshot()
        };
        assert!(snapshot.has_content());
    }

    #[test]
    fn empty_rich_text_is_not_content() {
        let snapshot = PasteboardSnapshot {
            rich_text: Some(RichText::default()),
            ..empty_snapshot()
        };
        assert!(!snapshot.has_content());
    }

    #[test]
    fn files_count_as_content() {
        let snapshot = PasteboardSnapshot {
            files: vec![FileEntry {
                path: "/tmp/report.pdf".into(),
                file_name: "report.pdf".into(),
                thumb_file_name: None,
                size_bytes: 12,
                is_directory: false,
            }],
            ..empty_snapshot()
        };
        assert!(snapshot.has_content());
    }
}
