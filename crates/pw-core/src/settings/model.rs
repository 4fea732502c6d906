use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Joining string placed between merged text captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeSeparator {
    Line,
    Space,
}

impl MergeSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "\n",
            Self::Space => " ",
        }
    }
}

/// User configuration consumed by the capture engine.
///
/// Owned by the settings store; the engine reads a cloned snapshot per cycle
/// and never writes back. Container-level `default` keeps files written by
/// older versions loadable: missing fields take their current defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub schema_version: u32,
    pub ignore_transient_content: bool,
    pub ignore_confidential_content: bool,
    pub apps_to_ignore: Vec<String>,
    pub copy_and_merge_separator: MergeSeparator,
    pub copy_to_clipboard_after_merge: bool,
    pub poll_interval_secs: u64,
}
