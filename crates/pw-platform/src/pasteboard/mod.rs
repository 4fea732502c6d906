//! Pasteboard backends.
//!
//! macOS talks to NSPasteboard directly and gets the OS change counter for
//! free. Everywhere else clipboard-rs does the reading and a watcher thread
//! emulates the counter. `SystemPasteboard` aliases whichever backend the
//! target compiles.

pub mod memory;

pub use memory::MemoryPasteboard;

#[cfg(target_os = "macos")]
#[allow(deprecated, unexpected_cfgs)]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacPasteboard as SystemPasteboard;

#[cfg(not(target_os = "macos"))]
mod common;

#[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
pub mod generic;

#[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
pub use generic::GenericPasteboard as SystemPasteboard;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsPasteboard as SystemPasteboard;
