//! # pw-platform
//!
//! Operating-system adapters for PasteWatch: the pasteboard backends and the
//! frontmost-application lookup. Each target compiles exactly one system
//! backend per port; the in-memory pasteboard and the fixed active-app
//! source are always available for tests and headless targets.

#[cfg(target_os = "macos")]
#[allow(deprecated, unexpected_cfgs)]
mod foundation;

pub mod active_app;
pub mod pasteboard;

pub use active_app::{FixedActiveApp, SystemActiveApp};
pub use pasteboard::{MemoryPasteboard, SystemPasteboard};
