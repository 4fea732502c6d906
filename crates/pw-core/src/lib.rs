//! # pw-core
//!
//! Domain models and pure capture logic for PasteWatch.
//!
//! Everything in this crate is free of infrastructure concerns: change
//! detection, content classification, privacy policy and merge accumulation
//! are plain state machines and functions over the data model, wired to the
//! outside world through the traits in [`ports`].

pub mod change;
pub mod classify;
pub mod fingerprint;
pub mod merge;
pub mod pasteboard;
pub mod policy;
pub mod ports;
pub mod settings;
pub mod snapshot;

// Re-export commonly used types at the crate root
pub use change::{ChangeCounterState, ChangeOutcome};
pub use classify::{classify, ClassifiedContent};
pub use fingerprint::Fingerprint;
pub use merge::MergeAccumulator;
pub use pasteboard::{ObservedRepresentation, PasteboardFormat, RawCapture};
pub use policy::{PrivacyPolicy, SuppressReason};
pub use settings::{CaptureSettings, MergeSeparator};
pub use snapshot::{FileEntry, ImageArtifact, PasteboardSnapshot, RichText, SourceApp};
