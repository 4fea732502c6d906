//! One capture cycle, from counter poll to sink emission.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use pw_core::change::{ChangeCounterState, ChangeOutcome};
use pw_core::classify::{classify, ClassifiedContent};
use pw_core::merge::MergeAccumulator;
use pw_core::pasteboard::{ObservedRepresentation, PasteboardFormat, RawCapture};
use pw_core::policy::PrivacyPolicy;
use pw_core::ports::{
    ActiveAppPort, ArtifactStorePort, ClockPort, PasteboardPort, SettingsSnapshotPort,
    SnapshotSinkPort,
};
use pw_core::snapshot::{FileEntry, PasteboardSnapshot, RichText, SourceApp};
use tracing::{debug, info, warn};

/// What a single tick amounted to. The loop logs it; tests use it to pin
/// down which path a cycle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    NoChange,
    Suppressed,
    Empty,
    Duplicate,
    Absorbed,
    Emitted,
}

/// The capture pipeline and all of its mutable state.
///
/// The engine task is the sole caller, so the change detector and merge
/// accumulator see strictly sequential cycles; nothing outside this struct
/// can observe a cycle half-done.
pub struct CaptureCycle {
    pasteboard: Arc<dyn PasteboardPort>,
    active_app: Arc<dyn ActiveAppPort>,
    artifacts: Arc<dyn ArtifactStorePort>,
    sink: Arc<dyn SnapshotSinkPort>,
    settings: Arc<dyn SettingsSnapshotPort>,
    clock: Arc<dyn ClockPort>,
    policy: PrivacyPolicy,
    detector: ChangeCounterState,
    merge: MergeAccumulator,
}

impl CaptureCycle {
    pub fn new(
        pasteboard: Arc<dyn PasteboardPort>,
        active_app: Arc<dyn ActiveAppPort>,
        artifacts: Arc<dyn ArtifactStorePort>,
        sink: Arc<dyn SnapshotSinkPort>,
        settings: Arc<dyn SettingsSnapshotPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            pasteboard,
            active_app,
            artifacts,
            sink,
            settings,
            clock,
            policy: PrivacyPolicy::new(),
            detector: ChangeCounterState::default(),
            merge: MergeAccumulator::new(),
        }
    }

    /// Run one tick of the pipeline.
    ///
    /// An error means a pasteboard read failed outright; the caller logs it
    /// and moves on. Detector state is left untouched in that case, so the
    /// next tick sees the same counter difference and retries.
    pub async fn run_once(&mut self) -> Result<CycleOutcome> {
        let change_count = self
            .pasteboard
            .read_change_count()
            .context("read pasteboard change counter")?;
        if self.detector.observe(change_count) == ChangeOutcome::NoChange {
            return Ok(CycleOutcome::NoChange);
        }

        let settings = self.settings.current();

        // Markers are visible on the format listing alone; suppressing here
        // means the payload bytes are never read at all.
        let formats = self
            .pasteboard
            .read_formats()
            .context("list pasteboard formats")?;
        if let Some(reason) = self.policy.marker_suppression(&formats, &settings) {
            self.detector.record_rejected(change_count);
            debug!(%reason, "capture suppressed");
            return Ok(CycleOutcome::Suppressed);
        }

        let capture = self.read_payloads(&formats);
        if capture.is_empty() {
            self.detector.record_rejected(change_count);
            return Ok(CycleOutcome::Empty);
        }
        debug!(
            representations = capture.representations.len(),
            total_bytes = capture.total_size_bytes(),
            "pasteboard read"
        );

        let Some(content) = classify(&capture) else {
            self.detector.record_rejected(change_count);
            return Ok(CycleOutcome::Empty);
        };

        let fingerprint = content.fingerprint();
        if self.detector.is_duplicate(&fingerprint) {
            self.detector.record_duplicate(change_count);
            return Ok(CycleOutcome::Duplicate);
        }

        let source_app = self.active_app.current_app();
        if let Some(reason) = self.policy.app_suppression(source_app.as_ref(), &settings) {
            self.detector.record_rejected(change_count);
            debug!(%reason, "capture suppressed");
            return Ok(CycleOutcome::Suppressed);
        }

        if self.merge.is_active() && content.is_text_only() {
            if let Some(text) = &content.text {
                self.merge
                    .absorb(text, settings.copy_and_merge_separator.as_str());
                self.detector.record_accepted(change_count, fingerprint);
                debug!(len = text.len(), "capture absorbed into merge buffer");
                return Ok(CycleOutcome::Absorbed);
            }
        }

        self.detector.record_accepted(change_count, fingerprint);
        let snapshot = self.build_snapshot(content, source_app).await;
        if !snapshot.has_content() {
            warn!("nothing persistable survived this capture, no snapshot emitted");
            return Ok(CycleOutcome::Empty);
        }
        self.sink.publish(Arc::new(snapshot));
        Ok(CycleOutcome::Emitted)
    }

    /// Poll cadence, read once when the loop starts. Clamped to at least
    /// one second so a zero setting cannot spin the loop.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.settings.current().poll_interval_secs.max(1))
    }

    pub fn enable_merge(&mut self) {
        self.merge.enable();
        info!("merge session active");
    }

    /// Flush the merge session: one snapshot for the whole accumulated
    /// buffer, then (if configured) write the merged text back to the
    /// pasteboard so a subsequent manual paste reflects it.
    pub async fn commit_merge(&mut self) {
        let Some(merged) = self.merge.commit() else {
            debug!("merge session ended with nothing accumulated");
            return;
        };
        info!(len = merged.len(), "merge session committed");

        // Fingerprint the buffer exactly as a fresh text-only capture would
        // be fingerprinted, so the write-back below dedups against it.
        let content = ClassifiedContent {
            text: Some(merged),
            ..ClassifiedContent::default()
        };
        let fingerprint = content.fingerprint();

        let snapshot = Arc::new(PasteboardSnapshot {
            captured_at_ms: self.clock.now_ms(),
            // Absorbed entries may have come from several applications, so
            // the merged snapshot carries no single source.
            source_app: None,
            text: content.text,
            rich_text: None,
            image: None,
            files: Vec::new(),
        });
        self.sink.publish(snapshot.clone());

        let settings = self.settings.current();
        if settings.copy_to_clipboard_after_merge {
            if let Some(text) = snapshot.text.as_deref() {
                if let Err(err) = self.pasteboard.write_text(text) {
                    warn!("merge write-back failed: {err:#}");
                    return;
                }
                // Our own write bumped the OS counter. Adopt the new counter
                // value and the buffer's fingerprint so the next tick does
                // not capture the merge result as a fresh user copy.
                match self.pasteboard.read_change_count() {
                    Ok(count) => self.detector.record_accepted(count, fingerprint),
                    Err(err) => {
                        warn!("could not adopt the post-write change counter: {err:#}")
                    }
                }
            }
        }
    }

    /// One pass over the advertised formats. A representation whose read
    /// fails is absent for this cycle; the others still make it through.
    fn read_payloads(&self, formats: &[PasteboardFormat]) -> RawCapture {
        let mut representations = Vec::new();
        for format in formats {
            if format.is_marker() {
                continue;
            }
            match self.pasteboard.read_bytes(format) {
                Ok(Some(bytes)) => representations.push(ObservedRepresentation {
                    format: format.clone(),
                    bytes,
                }),
                Ok(None) => {}
                Err(err) => warn!("pasteboard read for {format} failed: {err:#}"),
            }
        }
        RawCapture { representations }
    }

    async fn build_snapshot(
        &self,
        content: ClassifiedContent,
        source_app: Option<SourceApp>,
    ) -> PasteboardSnapshot {
        let ClassifiedContent {
            text,
            html,
            rtf,
            image_bytes,
            file_paths,
        } = content;

        let image = match image_bytes {
            Some(bytes) => match self.artifacts.persist_image(&bytes).await {
                Ok(artifact) => Some(artifact),
                Err(err) => {
                    warn!("image artifact not persisted: {err:#}");
                    None
                }
            },
            None => None,
        };

        let files = join_all(file_paths.into_iter().map(|path| self.file_entry(path))).await;

        let rich_text = (html.is_some() || rtf.is_some()).then(|| RichText { html, rtf });

        PasteboardSnapshot {
            captured_at_ms: self.clock.now_ms(),
            source_app,
            text,
            rich_text,
            image,
            files,
        }
    }

    /// Stat one copied path at capture time. The entry survives even when
    /// the file is already gone; a vanished path simply carries no size and
    /// no preview.
    async fn file_entry(&self, path: String) -> FileEntry {
        let file_name = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        let metadata = tokio::fs::metadata(&path).await.ok();
        let is_directory = metadata.as_ref().is_some_and(std::fs::Metadata::is_dir);
        let size_bytes = metadata.as_ref().map_or(0, std::fs::Metadata::len);

        let thumb_file_name = if is_directory {
            None
        } else {
            self.artifacts.persist_file_preview(&path).await
        };

        FileEntry {
            path,
            file_name,
            thumb_file_name,
            size_bytes,
            is_directory,
        }
    }
}
