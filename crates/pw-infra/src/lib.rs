//! # pw-infra
//!
//! Filesystem, channel and clock adapters behind the pw-core ports.

pub mod artifacts;
pub mod fs;
pub mod settings;
pub mod sink;
pub mod time;

pub use artifacts::FsArtifactStore;
pub use settings::{FileSettingsRepository, SharedSettings};
pub use sink::ChannelSnapshotSink;
pub use time::SystemClock;
