//! Headless capture demo: watches the system pasteboard and prints every
//! snapshot the engine emits until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info, warn};
use pw_app::{CaptureCycle, CaptureEngine};
use pw_core::snapshot::PasteboardSnapshot;
use pw_infra::fs::{app_data_dir, images_dir, settings_path};
use pw_infra::{
    ChannelSnapshotSink, FileSettingsRepository, FsArtifactStore, SharedSettings, SystemClock,
};
use pw_platform::{SystemActiveApp, SystemPasteboard};
use tokio::sync::mpsc::UnboundedReceiver;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data_dir = app_data_dir()?;
    let repository = FileSettingsRepository::new(settings_path(&data_dir));
    let settings = match repository.load().await {
        Ok(settings) => settings,
        Err(err) => {
            warn!("settings load failed, using defaults: {err:#}");
            Default::default()
        }
    };

    let pasteboard = Arc::new(SystemPasteboard::new().context("open system pasteboard")?);
    let (sink, snapshots) = ChannelSnapshotSink::channel();
    let cycle = CaptureCycle::new(
        pasteboard,
        Arc::new(SystemActiveApp::default()),
        Arc::new(FsArtifactStore::new(images_dir(&data_dir))),
        Arc::new(sink),
        Arc::new(SharedSettings::new(settings)),
        Arc::new(SystemClock),
    );

    let printer = tokio::spawn(print_snapshots(snapshots));
    let engine = CaptureEngine::new(cycle).start();
    info!("pastewatch: capturing into {}", data_dir.display());
    println!("pastewatch: copy something; Ctrl+C stops");

    tokio::signal::ctrl_c().await.context("wait for Ctrl+C")?;
    info!("pastewatch: shutting down");
    if let Err(err) = engine.shutdown().await {
        error!("engine shutdown failed: {err}");
    }
    printer.abort();

    Ok(())
}

async fn print_snapshots(mut snapshots: UnboundedReceiver<Arc<PasteboardSnapshot>>) {
    let mut count = 0usize;
    while let Some(snapshot) = snapshots.recv().await {
        count += 1;
        println!("\nsnapshot #{count}");
        println!("- captured_at_ms: {}", snapshot.captured_at_ms);
        if let Some(app) = &snapshot.source_app {
            println!("- source: {} ({})", app.name, app.path);
        }
        if let Some(text) = &snapshot.text {
            println!("- text: {} chars", text.chars().count());
        }
        if snapshot.rich_text.is_some() {
            println!("- rich text attached");
        }
        if let Some(image) = &snapshot.image {
            println!(
                "- image: {}x{}, {} bytes -> {}",
                image.width, image.height, image.size_bytes, image.file_name
            );
        }
        for file in &snapshot.files {
            let kind = if file.is_directory { "dir" } else { "file" };
            println!("- {kind}: {} ({} bytes)", file.path, file.size_bytes);
        }
    }
}
