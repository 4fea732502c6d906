//! Platform-neutral pasteboard vocabulary.
//!
//! Platform adapters translate their native type names (macOS UTIs,
//! clipboard-rs formats, Win32 format ids) onto the small set of well-known
//! format ids declared here before anything else in the engine sees them.

use std::fmt;

/// Identifier of one pasteboard representation format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PasteboardFormat(pub String);

impl PasteboardFormat {
    pub const TEXT: &'static str = "text";
    pub const HTML: &'static str = "html";
    pub const RTF: &'static str = "rtf";
    pub const IMAGE: &'static str = "image";
    pub const FILE_LIST: &'static str = "file-list";

    /// Marker advertised by producers (password managers and the like) for
    /// content that is rewritten in place and should not be persisted.
    pub const TRANSIENT: &'static str = "transient";

    /// Marker for confidential content (macOS `org.nspasteboard.ConcealedType`).
    pub const CONCEALED: &'static str = "concealed";

    pub fn text() -> Self {
        Self(Self::TEXT.into())
    }

    pub fn html() -> Self {
        Self(Self::HTML.into())
    }

    pub fn rtf() -> Self {
        Self(Self::RTF.into())
    }

    pub fn image() -> Self {
        Self(Self::IMAGE.into())
    }

    pub fn file_list() -> Self {
        Self(Self::FILE_LIST.into())
    }

    pub fn transient() -> Self {
        Self(Self::TRANSIENT.into())
    }

    pub fn concealed() -> Self {
        Self(Self::CONCEALED.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Marker formats carry no payload of their own.
    pub fn is_marker(&self) -> bool {
        self.0 == Self::TRANSIENT || self.0 == Self::CONCEALED
    }
}

impl fmt::Display for PasteboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PasteboardFormat {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One representation as read off the pasteboard, still undecoded.
#[derive(Debug, Clone)]
pub struct ObservedRepresentation {
    pub format: PasteboardFormat,
    pub bytes: Vec<u8>,
}

/// Everything read off the pasteboard in a single cycle.
///
/// The format list is read exactly once per cycle; payload bytes are fetched
/// only for formats that appeared in that one listing.
#[derive(Debug, Clone, Default)]
pub struct RawCapture {
    pub representations: Vec<ObservedRepresentation>,
}

impl RawCapture {
    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }

    pub fn bytes_for(&self, format: &str) -> Option<&[u8]> {
        self.representations
            .iter()
            .find(|rep| rep.format.as_str() == format)
            .map(|rep| rep.bytes.as_slice())
    }

    pub fn total_size_bytes(&self) -> usize {
        self.representations.iter().map(|r| r.bytes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_formats_are_recognized() {
        assert!(PasteboardFormat::transient().is_marker());
        assert!(PasteboardFormat::concealed().is_marker());
        assert!(!PasteboardFormat::text().is_marker());
    }

    #[test]
    fn bytes_for_finds_representation_by_format() {
        let capture = RawCapture {
            representations: vec![ObservedRepresentation {
                format: PasteboardFormat::text(),
                bytes: b"hello".to_vec(),
            }],
        };
        assert_eq!(capture.bytes_for(PasteboardFormat::TEXT), Some(&b"hello"[..]));
        assert_eq!(capture.bytes_for(PasteboardFormat::IMAGE), None);
        assert_eq!(capture.total_size_bytes(), 5);
    }
}
