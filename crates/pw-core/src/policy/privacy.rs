//! Suppression policy: privacy markers and the app-ignore list.
//!
//! Both policy sources are user configuration owned by the settings
//! component; this module only consumes a settings snapshot. Suppression is
//! silent: no snapshot, no artifact write, no error.

use std::fmt;

use crate::pasteboard::PasteboardFormat;
use crate::settings::CaptureSettings;
use crate::snapshot::SourceApp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressReason {
    TransientMarker,
    ConcealedMarker,
    IgnoredApp { matched_entry: String },
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransientMarker => write!(f, "transient marker"),
            Self::ConcealedMarker => write!(f, "concealed marker"),
            Self::IgnoredApp { matched_entry } => {
                write!(f, "ignored app (matched {matched_entry:?})")
            }
        }
    }
}

/// Stateless policy evaluation. The two checks run at different points of a
/// cycle: markers before any payload byte is read, the app check after the
/// source app is known and before the snapshot reaches the sink.
#[derive(Debug, Default)]
pub struct PrivacyPolicy;

impl PrivacyPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Cheap check against the advertised format list alone.
    pub fn marker_suppression(
        &self,
        formats: &[PasteboardFormat],
        settings: &CaptureSettings,
    ) -> Option<SuppressReason> {
        if settings.ignore_transient_content
            && formats.iter().any(|f| f.as_str() == PasteboardFormat::TRANSIENT)
        {
            return Some(SuppressReason::TransientMarker);
        }
        if settings.ignore_confidential_content
            && formats.iter().any(|f| f.as_str() == PasteboardFormat::CONCEALED)
        {
            return Some(SuppressReason::ConcealedMarker);
        }
        None
    }

    /// Match the source app path against the configured ignore list.
    ///
    /// Matching is a case-sensitive substring test of the configured entry
    /// within the app path, so `/Applications/Keychain Access.app` matches
    /// itself exactly and `Keychain Access` matches it as well. Empty
    /// entries are skipped. An unknown source app never matches.
    pub fn app_suppression(
        &self,
        source_app: Option<&SourceApp>,
        settings: &CaptureSettings,
    ) -> Option<SuppressReason> {
        let app = source_app?;
        settings
            .apps_to_ignore
            .iter()
            .filter(|entry| !entry.is_empty())
            .find(|entry| app.path.contains(entry.as_str()))
            .map(|entry| SuppressReason::IgnoredApp {
                matched_entry: entry.clone(),
            })
    }
}
