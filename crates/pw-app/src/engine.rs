//! The capture loop task and its control surface.
//!
//! The loop owns the [`CaptureCycle`] outright. Control flows in through a
//! command channel drained at the top of every tick plus an atomic pause
//! flag, so a cross-thread caller never takes a lock that a running cycle
//! could be holding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, debug_span, info, info_span, warn, Instrument};

use crate::cycle::{CaptureCycle, CycleOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineCommand {
    EnableMerge,
    CommitMerge,
    Shutdown,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineControlError {
    #[error("capture loop is no longer running")]
    ChannelClosed,
}

/// Owns a configured pipeline until [`start`](Self::start) moves it onto its
/// background task.
pub struct CaptureEngine {
    cycle: CaptureCycle,
}

impl CaptureEngine {
    pub fn new(cycle: CaptureCycle) -> Self {
        Self { cycle }
    }

    /// Spawn the capture loop on the current tokio runtime and hand back its
    /// control surface. Starting consumes the engine, so a second start of
    /// the same loop is unrepresentable.
    pub fn start(self) -> EngineHandle {
        let paused = Arc::new(AtomicBool::new(false));
        let (commands, command_rx) = mpsc::unbounded_channel();
        let poll_interval = self.cycle.poll_interval();

        info!(
            poll_interval_secs = poll_interval.as_secs(),
            "capture loop starting"
        );
        let task = tokio::spawn(run_loop(
            self.cycle,
            paused.clone(),
            command_rx,
            poll_interval,
        ));

        EngineHandle {
            paused,
            commands,
            task: Arc::new(Mutex::new(Some(task))),
        }
    }
}

/// Cloneable control surface over the running capture loop.
///
/// Pause and resume are plain atomic stores observed at the top of the next
/// tick; a paused loop performs no pasteboard access at all. Merge commands
/// and shutdown travel over the command channel and likewise take effect at
/// the next tick, so control latency is bounded by one poll interval.
#[derive(Clone)]
pub struct EngineHandle {
    paused: Arc<AtomicBool>,
    commands: mpsc::UnboundedSender<EngineCommand>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl EngineHandle {
    pub fn pause(&self) {
        if !self.paused.swap(true, Ordering::SeqCst) {
            info!("capture paused");
        }
    }

    pub fn resume(&self) {
        if self.paused.swap(false, Ordering::SeqCst) {
            info!("capture resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Start folding subsequent text captures into one merge buffer.
    pub fn enable_merge(&self) -> Result<(), EngineControlError> {
        self.send(EngineCommand::EnableMerge)
    }

    /// End the merge session: emit the accumulated buffer as one snapshot
    /// and, if configured, write it back to the pasteboard.
    pub fn commit_merge(&self) -> Result<(), EngineControlError> {
        self.send(EngineCommand::CommitMerge)
    }

    /// Stop the loop and wait for its task to finish. An uncommitted merge
    /// buffer is discarded; callers that want it kept commit first.
    pub async fn shutdown(&self) -> Result<(), EngineControlError> {
        self.send(EngineCommand::Shutdown)?;
        if let Some(task) = self.task.lock().await.take() {
            if let Err(err) = task.await {
                warn!("capture loop task ended abnormally: {err}");
            }
        }
        Ok(())
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineControlError> {
        self.commands
            .send(command)
            .map_err(|_| EngineControlError::ChannelClosed)
    }
}

async fn run_loop(
    mut cycle: CaptureCycle,
    paused: Arc<AtomicBool>,
    mut commands: mpsc::UnboundedReceiver<EngineCommand>,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    // A slow cycle delays the next tick instead of queueing a catch-up burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        loop {
            match commands.try_recv() {
                Ok(EngineCommand::EnableMerge) => cycle.enable_merge(),
                Ok(EngineCommand::CommitMerge) => {
                    cycle
                        .commit_merge()
                        .instrument(info_span!("engine.commit_merge"))
                        .await
                }
                Ok(EngineCommand::Shutdown) => {
                    info!("capture loop shut down");
                    return;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("all engine handles dropped, capture loop exiting");
                    return;
                }
            }
        }

        if paused.load(Ordering::SeqCst) {
            continue;
        }

        match cycle
            .run_once()
            .instrument(debug_span!("engine.capture_cycle"))
            .await
        {
            Ok(CycleOutcome::NoChange) => {}
            Ok(outcome) => debug!(?outcome, "capture cycle finished"),
            Err(err) => warn!("capture cycle failed: {err:#}"),
        }
    }
}
