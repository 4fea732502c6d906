//! # pw-app
//!
//! Orchestration layer for PasteWatch: wires the pw-core pipeline to the
//! platform and infrastructure adapters and runs it on a dedicated tokio
//! task behind a small control surface.

pub mod cycle;
pub mod engine;

pub use cycle::{CaptureCycle, CycleOutcome};
pub use engine::{CaptureEngine, EngineControlError, EngineHandle};
