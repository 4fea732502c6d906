use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use anyhow::{anyhow, Result};
use clipboard_rs::{
    ClipboardContext, ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext, WatcherShutdown,
};
use pw_core::pasteboard::PasteboardFormat;
use pw_core::ports::PasteboardPort;
use tracing::debug_span;

use super::common;

/// Pasteboard backend for platforms without a native change counter.
///
/// X11 and Wayland expose nothing like the macOS `changeCount`, so the
/// counter is emulated: a clipboard-rs watcher thread bumps an atomic on
/// every change notification and `read_change_count` just loads it. The
/// counter therefore lags the actual clipboard by at most one notification
/// delivery, which the content fingerprint check downstream absorbs.
pub struct GenericPasteboard {
    ctx: Arc<Mutex<ClipboardContext>>,
    change_count: Arc<AtomicI64>,
    // Mutex-wrapped because WatcherShutdown is Send but not Sync, while
    // PasteboardPort requires Sync; only touched in Drop.
    shutdown: Mutex<Option<WatcherShutdown>>,
}

struct CounterBump(Arc<AtomicI64>);

impl ClipboardHandler for CounterBump {
    fn on_clipboard_change(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl GenericPasteboard {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        let change_count = Arc::new(AtomicI64::new(0));

        let mut watcher = ClipboardWatcherContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard watcher: {}", e))?;
        let shutdown = watcher
            .add_handler(CounterBump(change_count.clone()))
            .get_shutdown_channel();
        thread::spawn(move || {
            log::debug!("clipboard watcher thread started");
            watcher.start_watch();
        });

        Ok(Self {
            ctx: Arc::new(Mutex::new(ctx)),
            change_count,
            shutdown: Mutex::new(Some(shutdown)),
        })
    }

    fn lock_ctx(&self) -> MutexGuard<'_, ClipboardContext> {
        self.ctx.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PasteboardPort for GenericPasteboard {
    fn read_change_count(&self) -> Result<i64> {
        Ok(self.change_count.load(Ordering::SeqCst))
    }

    fn read_formats(&self) -> Result<Vec<PasteboardFormat>> {
        let span = debug_span!("platform.generic.read_formats");
        span.in_scope(|| common::read_formats(&mut self.lock_ctx()))
    }

    fn read_bytes(&self, format: &PasteboardFormat) -> Result<Option<Vec<u8>>> {
        let span = debug_span!("platform.generic.read_bytes", format = %format);
        span.in_scope(|| common::read_bytes(&mut self.lock_ctx(), format))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let span = debug_span!("platform.generic.write_text", len = text.len());
        span.in_scope(|| common::write_text(&mut self.lock_ctx(), text))
    }
}

impl Drop for GenericPasteboard {
    fn drop(&mut self) {
        let shutdown = self
            .shutdown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(shutdown) = shutdown {
            shutdown.stop();
        }
    }
}
