//! Classification of a raw pasteboard read.
//!
//! A capture may carry several representations at once (copying a file in a
//! file manager typically advertises a file list, an icon bitmap and the
//! path as text). No single winner is picked here: every representation that
//! is present and decodable lands in its own field, and dropping any of them
//! is the sink's call, not the engine's.

use crate::fingerprint::{Fingerprint, FingerprintHasher};
use crate::pasteboard::{PasteboardFormat, RawCapture};

/// Decoded representations of one capture. `None` fields were either absent
/// on the pasteboard or failed to decode (a decode failure of one
/// representation never discards the others).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedContent {
    pub text: Option<String>,
    pub html: Option<String>,
    pub rtf: Option<String>,
    /// Undecoded raster bytes, handed to the artifact store as-is. Pixel
    /// decoding happens where the thumbnail is generated, not here.
    pub image_bytes: Option<Vec<u8>>,
    /// File paths in pasteboard promise order.
    pub file_paths: Vec<String>,
}

impl ClassifiedContent {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.html.is_none()
            && self.rtf.is_none()
            && self.image_bytes.is_none()
            && self.file_paths.is_empty()
    }

    /// A capture the merge accumulator may absorb: textual content without
    /// an image or file list.
    pub fn is_text_only(&self) -> bool {
        self.text.is_some() && self.image_bytes.is_none() && self.file_paths.is_empty()
    }

    /// Content-equality signature over every captured representation.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = FingerprintHasher::new();
        if let Some(text) = &self.text {
            hasher.section(PasteboardFormat::TEXT, text.as_bytes());
        }
        if let Some(html) = &self.html {
            hasher.section(PasteboardFormat::HTML, html.as_bytes());
        }
        if let Some(rtf) = &self.rtf {
            hasher.section(PasteboardFormat::RTF, rtf.as_bytes());
        }
        if let Some(bytes) = &self.image_bytes {
            hasher.section(PasteboardFormat::IMAGE, bytes);
        }
        if !self.file_paths.is_empty() {
            hasher.section(PasteboardFormat::FILE_LIST, self.file_paths.join("\n").as_bytes());
        }
        hasher.finish()
    }
}

/// Decode a raw read into classified content, or `None` when nothing
/// decodable remains.
pub fn classify(capture: &RawCapture) -> Option<ClassifiedContent> {
    let content = ClassifiedContent {
        text: capture
            .bytes_for(PasteboardFormat::TEXT)
            .and_then(decode_meaningful_text),
        html: capture
            .bytes_for(PasteboardFormat::HTML)
            .and_then(decode_meaningful_text),
        rtf: capture
            .bytes_for(PasteboardFormat::RTF)
            .and_then(decode_meaningful_text),
        image_bytes: capture
            .bytes_for(PasteboardFormat::IMAGE)
            .filter(|bytes| !bytes.is_empty())
            .map(<[u8]>::to_vec),
        file_paths: capture
            .bytes_for(PasteboardFormat::FILE_LIST)
            .map(decode_file_list)
            .unwrap_or_default(),
    };

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// UTF-8 decode; invalid bytes or whitespace-only payloads count as absent.
/// Surrounding whitespace of real text is preserved untouched -- trimming is
/// presentation, not capture.
fn decode_meaningful_text(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(text.to_string())
}

/// Paths arrive newline-separated, one per promised entry. Order is
/// meaningful and preserved; blank lines are skipped.
fn decode_file_list(bytes: &[u8]) -> Vec<String> {
    let Ok(listing) = std::str::from_utf8(bytes) else {
        return Vec::new();
    };
    listing
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pasteboard::ObservedRepresentation;

    fn capture_of(reps: Vec<(&str, &[u8])>) -> RawCapture {
        RawCapture {
            representations: reps
                .into_iter()
                .map(|(format, bytes)| ObservedRepresentation {
                    format: format.into(),
                    bytes: bytes.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn plain_text_is_classified() {
        let content = classify(&capture_of(vec![("text", b"hello")])).unwrap();
        assert_eq!(content.text.as_deref(), Some("hello"));
        assert!(content.is_text_only());
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        assert!(classify(&capture_of(vec![("text", b"   \n\t  ")])).is_none());
    }

    #[test]
    fn surrounding_whitespace_is_preserved() {
        let content = classify(&capture_of(vec![("text", b"  hello  ")])).unwrap();
        assert_eq!(content.text.as_deref(), Some("  hello  "));
    }

    #[test]
    fn invalid_utf8_text_does_not_discard_other_representations() {
        let content = classify(&capture_of(vec![
            ("text", &[0xff, 0xfe][..]),
            ("image", b"not-really-png"),
        ]))
        .unwrap();
        assert!(content.text.is_none());
        assert!(content.image_bytes.is_some());
    }

    #[test]
    fn coexisting_representations_are_all_kept() {
        let content = classify(&capture_of(vec![
            ("text", b"report.pdf"),
            ("image", b"\x89PNG"),
            ("file-list", b"/tmp/report.pdf"),
        ]))
        .unwrap();
        assert!(content.text.is_some());
        assert!(content.image_bytes.is_some());
        assert_eq!(content.file_paths, vec!["/tmp/report.pdf"]);
        assert!(!content.is_text_only());
    }

    #[test]
    fn file_list_order_is_preserved() {
        let content = classify(&capture_of(vec![(
            "file-list",
            b"/b/second\n/a/first\n\n/c/third" as &[u8],
        )]))
        .unwrap();
        assert_eq!(content.file_paths, vec!["/b/second", "/a/first", "/c/third"]);
    }

    #[test]
    fn empty_capture_classifies_to_none() {
        assert!(classify(&RawCapture::default()).is_none());
    }

    #[test]
    fn identical_content_has_identical_fingerprint() {
        let a = classify(&capture_of(vec![("text", b"same")])).unwrap();
        let b = classify(&capture_of(vec![("text", b"same")])).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_representation_kind() {
        let text = classify(&capture_of(vec![("text", b"same")])).unwrap();
        let html = classify(&capture_of(vec![("html", b"same")])).unwrap();
        assert_ne!(text.fingerprint(), html.fingerprint());
    }
}
