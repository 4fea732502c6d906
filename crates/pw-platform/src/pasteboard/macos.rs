use anyhow::{ensure, Result};
use cocoa::base::{id, nil, BOOL, NO};
use objc::rc::autoreleasepool;
use objc::{class, msg_send, sel, sel_impl};
use pw_core::pasteboard::PasteboardFormat;
use pw_core::ports::PasteboardPort;

use crate::foundation::{release, to_ns_string, to_rust_string};

// UTIs and legacy names observed on the general pasteboard.
const UTI_TEXT: &str = "public.utf8-plain-text";
const UTI_HTML: &str = "public.html";
const UTI_RTF: &str = "public.rtf";
const UTI_PNG: &str = "public.png";
const UTI_TIFF: &str = "public.tiff";
const UTI_FILE_URL: &str = "public.file-url";
const FILENAMES_TYPE: &str = "NSFilenamesPboardType";
const UTI_TRANSIENT: &str = "org.nspasteboard.TransientType";
const UTI_CONCEALED: &str = "org.nspasteboard.ConcealedType";

/// Native NSPasteboard backend. The OS maintains the change counter, so
/// polling stays a single integer read until something actually changed.
///
/// All calls go to the general pasteboard singleton; the capture loop is
/// the only caller, so access is effectively single-threaded.
pub struct MacPasteboard;

impl MacPasteboard {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}

fn general_pasteboard() -> id {
    unsafe { msg_send![class!(NSPasteboard), generalPasteboard] }
}

fn map_native_type(name: &str) -> Option<PasteboardFormat> {
    match name {
        UTI_TEXT => Some(PasteboardFormat::text()),
        UTI_HTML => Some(PasteboardFormat::html()),
        UTI_RTF => Some(PasteboardFormat::rtf()),
        UTI_PNG | UTI_TIFF => Some(PasteboardFormat::image()),
        UTI_FILE_URL | FILENAMES_TYPE => Some(PasteboardFormat::file_list()),
        UTI_TRANSIENT => Some(PasteboardFormat::transient()),
        UTI_CONCEALED => Some(PasteboardFormat::concealed()),
        _ => None,
    }
}

unsafe fn data_for_type(pasteboard: id, uti: &str) -> Option<Vec<u8>> {
    let ns_type = to_ns_string(uti);
    let data: id = msg_send![pasteboard, dataForType: ns_type];
    release(ns_type);
    if data == nil {
        return None;
    }
    let len: usize = msg_send![data, length];
    if len == 0 {
        return Some(Vec::new());
    }
    let ptr: *const u8 = msg_send![data, bytes];
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(ptr, len).to_vec())
}

/// Legacy filenames property list: an NSArray of path strings, which is
/// still what Finder puts up alongside `public.file-url`.
unsafe fn file_list_bytes(pasteboard: id) -> Option<Vec<u8>> {
    let ns_type = to_ns_string(FILENAMES_TYPE);
    let paths: id = msg_send![pasteboard, propertyListForType: ns_type];
    release(ns_type);
    if paths == nil {
        return None;
    }
    let count: usize = msg_send![paths, count];
    let mut list = Vec::new();
    for i in 0..count {
        let ns: id = msg_send![paths, objectAtIndex: i];
        if let Some(path) = to_rust_string(ns) {
            list.push(path);
        }
    }
    if list.is_empty() {
        None
    } else {
        Some(list.join("\n").into_bytes())
    }
}

impl PasteboardPort for MacPasteboard {
    fn read_change_count(&self) -> Result<i64> {
        let count: i64 = unsafe { msg_send![general_pasteboard(), changeCount] };
        Ok(count)
    }

    fn read_formats(&self) -> Result<Vec<PasteboardFormat>> {
        autoreleasepool(|| {
            let mut formats = Vec::new();
            unsafe {
                let types: id = msg_send![general_pasteboard(), types];
                if types == nil {
                    return Ok(formats);
                }
                let count: usize = msg_send![types, count];
                for i in 0..count {
                    let ns: id = msg_send![types, objectAtIndex: i];
                    let Some(name) = to_rust_string(ns) else {
                        continue;
                    };
                    if let Some(format) = map_native_type(&name) {
                        if !formats.contains(&format) {
                            formats.push(format);
                        }
                    }
                }
            }
            Ok(formats)
        })
    }

    fn read_bytes(&self, format: &PasteboardFormat) -> Result<Option<Vec<u8>>> {
        autoreleasepool(|| unsafe {
            let pasteboard = general_pasteboard();
            let bytes = match format.as_str() {
                PasteboardFormat::TEXT => data_for_type(pasteboard, UTI_TEXT),
                PasteboardFormat::HTML => data_for_type(pasteboard, UTI_HTML),
                PasteboardFormat::RTF => data_for_type(pasteboard, UTI_RTF),
                PasteboardFormat::IMAGE => data_for_type(pasteboard, UTI_PNG)
                    .or_else(|| data_for_type(pasteboard, UTI_TIFF)),
                PasteboardFormat::FILE_LIST => file_list_bytes(pasteboard),
                _ => None,
            };
            Ok(bytes)
        })
    }

    fn write_text(&self, text: &str) -> Result<()> {
        autoreleasepool(|| unsafe {
            let pasteboard = general_pasteboard();
            let _: i64 = msg_send![pasteboard, clearContents];
            let ns_text = to_ns_string(text);
            let ns_type = to_ns_string(UTI_TEXT);
            let ok: BOOL = msg_send![pasteboard, setString: ns_text forType: ns_type];
            release(ns_text);
            release(ns_type);
            ensure!(ok != NO, "NSPasteboard refused the text write");
            Ok(())
        })
    }
}
