use crate::settings::CaptureSettings;

/// Thread-safe read access to user configuration.
///
/// The settings store is shared with the UI, which may replace values at any
/// time. The engine takes one snapshot at the top of a cycle and treats it
/// as read-only for the rest of that cycle.
pub trait SettingsSnapshotPort: Send + Sync {
    fn current(&self) -> CaptureSettings;
}
