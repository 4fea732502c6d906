use std::sync::Mutex;

use pw_core::ports::ActiveAppPort;
use pw_core::snapshot::SourceApp;

/// Active-app source that reports a preset answer.
///
/// Stands in on platforms without a frontmost-application query, and lets
/// tests script which app "owns" a capture.
#[derive(Default)]
pub struct FixedActiveApp {
    app: Mutex<Option<SourceApp>>,
}

impl FixedActiveApp {
    /// Never attributes captures to any app.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn reporting(app: SourceApp) -> Self {
        Self {
            app: Mutex::new(Some(app)),
        }
    }

    pub fn set(&self, app: Option<SourceApp>) {
        *self.app.lock().unwrap_or_else(|e| e.into_inner()) = app;
    }
}

impl ActiveAppPort for FixedActiveApp {
    fn current_app(&self) -> Option<SourceApp> {
        self.app.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_reports_none() {
        assert!(FixedActiveApp::unknown().current_app().is_none());
    }

    #[test]
    fn preset_app_is_returned_until_replaced() {
        let source = FixedActiveApp::reporting(SourceApp::new("/Applications/Notes.app", "Notes"));
        assert_eq!(
            source.current_app().map(|a| a.path),
            Some("/Applications/Notes.app".to_string())
        );

        source.set(None);
        assert!(source.current_app().is_none());
    }
}
