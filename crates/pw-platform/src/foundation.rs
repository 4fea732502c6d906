//! Minimal NSString bridging shared by the macOS adapters.

use std::ffi::CStr;
use std::os::raw::c_char;

use cocoa::base::{id, nil};
use cocoa::foundation::NSString;
use objc::{msg_send, sel, sel_impl};

pub(crate) unsafe fn to_rust_string(ns: id) -> Option<String> {
    if ns == nil {
        return None;
    }
    let utf8: *const c_char = msg_send![ns, UTF8String];
    if utf8.is_null() {
        return None;
    }
    Some(CStr::from_ptr(utf8).to_string_lossy().into_owned())
}

/// Caller owns the returned object and must release it.
pub(crate) unsafe fn to_ns_string(s: &str) -> id {
    NSString::alloc(nil).init_str(s)
}

pub(crate) unsafe fn release(obj: id) {
    let _: () = msg_send![obj, release];
}
