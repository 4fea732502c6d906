use super::model::*;

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            // Both privacy markers are honored out of the box; password
            // managers rely on this.
            ignore_transient_content: true,
            ignore_confidential_content: true,
            apps_to_ignore: Vec::new(),
            copy_and_merge_separator: MergeSeparator::Line,
            copy_to_clipboard_after_merge: true,
            poll_interval_secs: 1,
        }
    }
}
