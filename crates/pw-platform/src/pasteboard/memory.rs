use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use pw_core::pasteboard::{ObservedRepresentation, PasteboardFormat};
use pw_core::ports::PasteboardPort;

/// In-memory pasteboard for tests and headless runs.
///
/// `set_content`/`set_text` simulate another application writing to the
/// clipboard: they replace the content and bump the change counter exactly
/// like the OS would. Every port call is counted, so tests can assert that
/// a paused engine performs no pasteboard access at all.
#[derive(Default)]
pub struct MemoryPasteboard {
    state: Mutex<State>,
    port_calls: AtomicU64,
}

#[derive(Default)]
struct State {
    change_count: i64,
    representations: Vec<ObservedRepresentation>,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a copy from another application.
    pub fn set_content(&self, representations: Vec<ObservedRepresentation>) {
        let mut state = self.lock_state();
        state.change_count += 1;
        state.representations = representations;
    }

    pub fn set_text(&self, text: &str) {
        self.set_content(vec![text_representation(text)]);
    }

    /// Text plus a payload-free marker format, the way password managers
    /// advertise transient or concealed content.
    pub fn set_text_with_marker(&self, text: &str, marker: PasteboardFormat) {
        self.set_content(vec![
            text_representation(text),
            ObservedRepresentation {
                format: marker,
                bytes: Vec::new(),
            },
        ]);
    }

    /// Total number of port calls made so far.
    pub fn port_calls(&self) -> u64 {
        self.port_calls.load(Ordering::SeqCst)
    }

    pub fn change_count(&self) -> i64 {
        self.lock_state().change_count
    }

    /// Current plain-text payload, for asserting the merge write-back.
    pub fn current_text(&self) -> Option<String> {
        self.lock_state()
            .representations
            .iter()
            .find(|r| r.format.as_str() == PasteboardFormat::TEXT)
            .and_then(|r| String::from_utf8(r.bytes.clone()).ok())
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn text_representation(text: &str) -> ObservedRepresentation {
    ObservedRepresentation {
        format: PasteboardFormat::text(),
        bytes: text.as_bytes().to_vec(),
    }
}

impl PasteboardPort for MemoryPasteboard {
    fn read_change_count(&self) -> Result<i64> {
        self.port_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock_state().change_count)
    }

    fn read_formats(&self) -> Result<Vec<PasteboardFormat>> {
        self.port_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lock_state()
            .representations
            .iter()
            .map(|r| r.format.clone())
            .collect())
    }

    fn read_bytes(&self, format: &PasteboardFormat) -> Result<Option<Vec<u8>>> {
        self.port_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lock_state()
            .representations
            .iter()
            .find(|r| r.format == *format)
            .map(|r| r.bytes.clone()))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.port_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock_state();
        state.change_count += 1;
        state.representations = vec![text_representation(text)];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_bumps_the_change_counter() {
        let pasteboard = MemoryPasteboard::new();
        assert_eq!(pasteboard.change_count(), 0);
        pasteboard.set_text("one");
        pasteboard.set_text("two");
        assert_eq!(pasteboard.change_count(), 2);
        assert_eq!(pasteboard.current_text().as_deref(), Some("two"));
    }

    #[test]
    fn write_text_behaves_like_any_other_clipboard_write() {
        let pasteboard = MemoryPasteboard::new();
        pasteboard.set_text("copied");
        let before = pasteboard.change_count();

        pasteboard.write_text("merged").unwrap();
        assert_eq!(pasteboard.change_count(), before + 1);
        assert_eq!(pasteboard.current_text().as_deref(), Some("merged"));
    }

    #[test]
    fn port_calls_are_counted() {
        let pasteboard = MemoryPasteboard::new();
        pasteboard.set_text("x");
        assert_eq!(pasteboard.port_calls(), 0);

        let _ = pasteboard.read_change_count();
        let _ = pasteboard.read_formats();
        let _ = pasteboard.read_bytes(&PasteboardFormat::text());
        assert_eq!(pasteboard.port_calls(), 3);
    }

    #[test]
    fn read_bytes_resolves_by_format() {
        let pasteboard = MemoryPasteboard::new();
        pasteboard.set_text_with_marker("secret", PasteboardFormat::concealed());

        let formats = pasteboard.read_formats().unwrap();
        assert!(formats.contains(&PasteboardFormat::concealed()));
        assert_eq!(
            pasteboard.read_bytes(&PasteboardFormat::text()).unwrap(),
            Some(b"secret".to_vec())
        );
        assert_eq!(
            pasteboard.read_bytes(&PasteboardFormat::image()).unwrap(),
            None
        );
    }
}
