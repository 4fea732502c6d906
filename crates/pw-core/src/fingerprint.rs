//! Content-equality signature used to reject no-op counter bumps.
//!
//! Some pasteboard producers bump the change counter while writing the exact
//! same bytes again. The fingerprint lets the loop recognize such echoes of
//! the immediately preceding accepted capture without consulting history.

use std::fmt;

const FINGERPRINT_DOMAIN: &[u8] = b"pastewatch-fingerprint-v1|";

/// blake3 digest over a length-framed encoding of captured content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First eight hex chars are plenty for log lines.
        write!(
            f,
            "Fingerprint({:02x}{:02x}{:02x}{:02x})",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Incremental fingerprint construction with per-section framing so that
/// `("ab", "c")` and `("a", "bc")` never collide.
pub struct FingerprintHasher {
    inner: blake3::Hasher,
}

impl FingerprintHasher {
    pub fn new() -> Self {
        let mut inner = blake3::Hasher::new();
        inner.update(FINGERPRINT_DOMAIN);
        Self { inner }
    }

    pub fn section(&mut self, tag: &str, bytes: &[u8]) {
        self.inner.update(tag.as_bytes());
        self.inner.update(&(bytes.len() as u64).to_le_bytes());
        self.inner.update(bytes);
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(*self.inner.finalize().as_bytes())
    }
}

impl Default for FingerprintHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sections_yield_identical_fingerprints() {
        let mut a = FingerprintHasher::new();
        a.section("text", b"hello");
        let mut b = FingerprintHasher::new();
        b.section("text", b"hello");
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn section_boundaries_matter() {
        let mut a = FingerprintHasher::new();
        a.section("text", b"ab");
        a.section("html", b"c");
        let mut b = FingerprintHasher::new();
        b.section("text", b"a");
        b.section("html", b"bc");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn tag_participates_in_the_digest() {
        let mut a = FingerprintHasher::new();
        a.section("text", b"x");
        let mut b = FingerprintHasher::new();
        b.section("html", b"x");
        assert_ne!(a.finish(), b.finish());
    }
}
