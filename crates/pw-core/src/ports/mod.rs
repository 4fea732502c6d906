//! Port interfaces between the capture engine and the outside world.
//!
//! The engine's use cases depend on these traits only; platform pasteboard
//! access, filesystem persistence and the history sink plug in behind them.

mod active_app;
mod artifacts;
mod clock;
mod pasteboard;
mod settings;
mod sink;

pub use active_app::ActiveAppPort;
pub use artifacts::ArtifactStorePort;
pub use clock::ClockPort;
pub use pasteboard::PasteboardPort;
pub use settings::SettingsSnapshotPort;
pub use sink::SnapshotSinkPort;
