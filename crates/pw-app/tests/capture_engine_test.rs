//! Loop-level behavior: tick gating, pause, merge commands, shutdown.
//!
//! Time is paused in every test, so ticks fire exactly when the test
//! advances the clock and the assertions are deterministic.

use std::sync::Arc;
use std::time::Duration;

use pw_app::{CaptureCycle, CaptureEngine, EngineControlError, EngineHandle};
use pw_core::settings::CaptureSettings;
use pw_core::snapshot::PasteboardSnapshot;
use pw_infra::{ChannelSnapshotSink, FsArtifactStore, SharedSettings, SystemClock};
use pw_platform::{FixedActiveApp, MemoryPasteboard};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

struct Harness {
    pasteboard: Arc<MemoryPasteboard>,
    snapshots: UnboundedReceiver<Arc<PasteboardSnapshot>>,
    handle: EngineHandle,
    _images: TempDir,
}

fn start_engine() -> Harness {
    let pasteboard = Arc::new(MemoryPasteboard::new());
    let images = TempDir::new().unwrap();
    let (sink, snapshots) = ChannelSnapshotSink::channel();
    let cycle = CaptureCycle::new(
        pasteboard.clone(),
        Arc::new(FixedActiveApp::unknown()),
        Arc::new(FsArtifactStore::new(images.path().join("images"))),
        Arc::new(sink),
        Arc::new(SharedSettings::new(CaptureSettings::default())),
        Arc::new(SystemClock),
    );
    Harness {
        pasteboard,
        snapshots,
        handle: CaptureEngine::new(cycle).start(),
        _images: images,
    }
}

/// Let the loop task run everything that is already due.
async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

/// Advance past one poll tick and let the cycle finish.
async fn one_tick() {
    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
}

fn drain(rx: &mut UnboundedReceiver<Arc<PasteboardSnapshot>>) -> Vec<Arc<PasteboardSnapshot>> {
    let mut out = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        out.push(snapshot);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn unchanged_counter_emits_nothing() {
    let mut harness = start_engine();
    settle().await;

    harness.pasteboard.set_text("hello");
    one_tick().await;
    assert_eq!(drain(&mut harness.snapshots).len(), 1);

    for _ in 0..5 {
        one_tick().await;
    }
    assert!(drain(&mut harness.snapshots).is_empty());
}

#[tokio::test(start_paused = true)]
async fn paused_engine_performs_no_pasteboard_access() {
    let mut harness = start_engine();
    harness.handle.pause();
    assert!(harness.handle.is_paused());

    harness.pasteboard.set_text("while paused");
    for _ in 0..3 {
        one_tick().await;
    }
    assert_eq!(harness.pasteboard.port_calls(), 0);
    assert!(drain(&mut harness.snapshots).is_empty());

    harness.handle.resume();
    assert!(!harness.handle.is_paused());
    one_tick().await;
    assert!(harness.pasteboard.port_calls() > 0);
    let snapshots = drain(&mut harness.snapshots);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].text.as_deref(), Some("while paused"));
}

#[tokio::test(start_paused = true)]
async fn merge_session_produces_exactly_one_snapshot() {
    let mut harness = start_engine();
    settle().await;

    harness.handle.enable_merge().unwrap();
    harness.pasteboard.set_text("foo");
    one_tick().await;
    harness.pasteboard.set_text("bar");
    one_tick().await;
    assert!(drain(&mut harness.snapshots).is_empty());

    harness.handle.commit_merge().unwrap();
    one_tick().await;

    let snapshots = drain(&mut harness.snapshots);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].text.as_deref(), Some("foo\nbar"));
    assert_eq!(
        harness.pasteboard.current_text().as_deref(),
        Some("foo\nbar")
    );

    // The write-back itself is never captured.
    for _ in 0..3 {
        one_tick().await;
    }
    assert!(drain(&mut harness.snapshots).is_empty());
}

#[tokio::test(start_paused = true)]
async fn queued_commands_apply_before_the_next_capture() {
    let mut harness = start_engine();
    settle().await;

    // Enable and commit queued back to back: the empty session just ends.
    harness.handle.enable_merge().unwrap();
    harness.handle.commit_merge().unwrap();
    harness.pasteboard.set_text("plain again");
    one_tick().await;

    // Merge was already over when the capture ran, so the text is standalone.
    let snapshots = drain(&mut harness.snapshots);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].text.as_deref(), Some("plain again"));
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_loop_and_closes_the_control_channel() {
    let mut harness = start_engine();
    settle().await;

    harness.pasteboard.set_text("before");
    one_tick().await;
    assert_eq!(drain(&mut harness.snapshots).len(), 1);

    harness.handle.shutdown().await.unwrap();

    let calls = harness.pasteboard.port_calls();
    harness.pasteboard.set_text("after");
    tokio::time::advance(Duration::from_secs(5)).await;
    settle().await;
    assert_eq!(harness.pasteboard.port_calls(), calls);
    assert!(drain(&mut harness.snapshots).is_empty());

    assert!(matches!(
        harness.handle.enable_merge(),
        Err(EngineControlError::ChannelClosed)
    ));
}
