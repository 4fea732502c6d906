use std::sync::{Arc, RwLock};

use pw_core::ports::SettingsSnapshotPort;
use pw_core::settings::CaptureSettings;

/// Shared handle over the live settings.
///
/// The UI side replaces values through [`SharedSettings::replace`]; the
/// engine reads one clone per cycle through the snapshot port. The lock is
/// held only for the duration of the clone, never across a cycle.
#[derive(Clone)]
pub struct SharedSettings {
    inner: Arc<RwLock<CaptureSettings>>,
}

impl SharedSettings {
    pub fn new(settings: CaptureSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Replace the live value; the engine picks it up on its next cycle.
    pub fn replace(&self, settings: CaptureSettings) {
        // A poisoned lock still holds a usable value.
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = settings;
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(CaptureSettings::default())
    }
}

impl SettingsSnapshotPort for SharedSettings {
    fn current(&self) -> CaptureSettings {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_visible_through_the_port() {
        let shared = SharedSettings::default();
        assert!(shared.current().apps_to_ignore.is_empty());

        let mut next = CaptureSettings::default();
        next.apps_to_ignore.push("Terminal".to_string());
        shared.replace(next);

        assert_eq!(shared.current().apps_to_ignore, vec!["Terminal".to_string()]);
    }

    #[test]
    fn clones_share_the_same_store() {
        let shared = SharedSettings::default();
        let other = shared.clone();

        let mut next = CaptureSettings::default();
        next.poll_interval_secs = 5;
        other.replace(next);

        assert_eq!(shared.current().poll_interval_secs, 5);
    }
}
