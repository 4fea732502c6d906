use cocoa::base::{id, nil};
use objc::rc::autoreleasepool;
use objc::{class, msg_send, sel, sel_impl};
use pw_core::ports::ActiveAppPort;
use pw_core::snapshot::SourceApp;

use crate::foundation::to_rust_string;

/// Frontmost application via `NSWorkspace`.
///
/// Queried once per accepted capture. When the query fails (no frontmost
/// app during fast app switches, sandboxed contexts) the capture simply
/// carries no source attribution.
pub struct MacActiveApp;

impl MacActiveApp {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacActiveApp {
    fn default() -> Self {
        Self::new()
    }
}

unsafe fn url_path(url: id) -> Option<String> {
    if url == nil {
        return None;
    }
    let path: id = msg_send![url, path];
    to_rust_string(path)
}

impl ActiveAppPort for MacActiveApp {
    fn current_app(&self) -> Option<SourceApp> {
        autoreleasepool(|| unsafe {
            let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
            let app: id = msg_send![workspace, frontmostApplication];
            if app == nil {
                return None;
            }

            let bundle_url: id = msg_send![app, bundleURL];
            let path = match url_path(bundle_url) {
                Some(path) => path,
                None => {
                    // Bundle-less processes (command line tools) only carry
                    // an executable URL.
                    let exec_url: id = msg_send![app, executableURL];
                    url_path(exec_url)?
                }
            };

            let localized: id = msg_send![app, localizedName];
            let name = to_rust_string(localized).unwrap_or_else(|| {
                std::path::Path::new(&path)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.clone())
            });

            Some(SourceApp::new(path, name))
        })
    }
}
