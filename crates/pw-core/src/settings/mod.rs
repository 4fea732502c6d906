mod defaults;
pub mod model;

pub use model::{CaptureSettings, MergeSeparator, CURRENT_SCHEMA_VERSION};
