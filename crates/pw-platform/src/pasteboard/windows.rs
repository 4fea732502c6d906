use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::ClipboardContext;
use pw_core::pasteboard::PasteboardFormat;
use pw_core::ports::PasteboardPort;
use tracing::debug_span;

use super::common;

/// Windows pasteboard backend: clipboard-rs for content, the native
/// clipboard sequence number for change detection.
pub struct WindowsPasteboard {
    ctx: Arc<Mutex<ClipboardContext>>,
    seq_warned: AtomicBool,
}

impl WindowsPasteboard {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            ctx: Arc::new(Mutex::new(ctx)),
            seq_warned: AtomicBool::new(false),
        })
    }

    fn lock_ctx(&self) -> MutexGuard<'_, ClipboardContext> {
        self.ctx.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// GetClipboardSequenceNumber yields nothing on desktops without
/// WINSTA_ACCESSCLIPBOARD. The constant fallback reads as "no change", so
/// capture stops; the warning fires once per process.
fn change_count_from(seq: Option<NonZeroU32>, warned: &AtomicBool) -> i64 {
    match seq {
        Some(n) => i64::from(n.get()),
        None => {
            if !warned.swap(true, Ordering::Relaxed) {
                log::warn!("clipboard sequence number unavailable; change detection is off");
            }
            0
        }
    }
}

impl PasteboardPort for WindowsPasteboard {
    fn read_change_count(&self) -> Result<i64> {
        Ok(change_count_from(
            clipboard_win::raw::seq_num(),
            &self.seq_warned,
        ))
    }

    fn read_formats(&self) -> Result<Vec<PasteboardFormat>> {
        let span = debug_span!("platform.windows.read_formats");
        span.in_scope(|| common::read_formats(&mut self.lock_ctx()))
    }

    fn read_bytes(&self, format: &PasteboardFormat) -> Result<Option<Vec<u8>>> {
        let span = debug_span!("platform.windows.read_bytes", format = %format);
        span.in_scope(|| common::read_bytes(&mut self.lock_ctx(), format))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let span = debug_span!("platform.windows.write_text", len = text.len());
        span.in_scope(|| common::write_text(&mut self.lock_ctx(), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sequence_number_reads_as_constant_and_warns_once() {
        let warned = AtomicBool::new(false);
        assert_eq!(change_count_from(None, &warned), 0);
        assert!(warned.load(Ordering::Relaxed));
        assert_eq!(change_count_from(None, &warned), 0);
        assert_eq!(change_count_from(NonZeroU32::new(7), &warned), 7);
    }
}
