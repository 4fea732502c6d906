//! Frontmost-application lookup.
//!
//! Only macOS offers a reliable answer today; other targets fall back to the
//! fixed source, which reports nothing unless told otherwise.

pub mod fixed;

pub use fixed::FixedActiveApp;

#[cfg(target_os = "macos")]
#[allow(deprecated, unexpected_cfgs)]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacActiveApp as SystemActiveApp;

#[cfg(not(target_os = "macos"))]
pub use fixed::FixedActiveApp as SystemActiveApp;
