use anyhow::{anyhow, Result};
use clipboard_rs::{common::RustImage, Clipboard, ClipboardContext, ContentFormat};
use pw_core::pasteboard::PasteboardFormat;

/// Native format names that act as privacy markers off macOS: the Windows
/// monitor-exclusion format and the KDE password-manager hint.
const TRANSIENT_NATIVE: &[&str] = &["ExcludeClipboardContentFromMonitorProcessing"];
const CONCEALED_NATIVE: &[&str] = &["x-kde-passwordManagerHint"];

fn adapt_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

pub(super) fn read_formats(ctx: &mut ClipboardContext) -> Result<Vec<PasteboardFormat>> {
    let mut formats = Vec::new();

    if ctx.has(ContentFormat::Text) {
        formats.push(PasteboardFormat::text());
    }
    if ctx.has(ContentFormat::Html) {
        formats.push(PasteboardFormat::html());
    }
    if ctx.has(ContentFormat::Rtf) {
        formats.push(PasteboardFormat::rtf());
    }
    if ctx.has(ContentFormat::Image) {
        formats.push(PasteboardFormat::image());
    }
    if ctx.has(ContentFormat::Files) {
        formats.push(PasteboardFormat::file_list());
    }

    // Marker formats only show up in the raw native listing.
    if let Ok(native) = ctx.available_formats() {
        for name in &native {
            if TRANSIENT_NATIVE.contains(&name.as_str()) {
                formats.push(PasteboardFormat::transient());
            } else if CONCEALED_NATIVE.contains(&name.as_str()) {
                formats.push(PasteboardFormat::concealed());
            }
        }
    }

    Ok(formats)
}

pub(super) fn read_bytes(
    ctx: &mut ClipboardContext,
    format: &PasteboardFormat,
) -> Result<Option<Vec<u8>>> {
    let bytes = match format.as_str() {
        PasteboardFormat::TEXT => ctx.get_text().ok().map(String::into_bytes),
        PasteboardFormat::HTML => ctx.get_html().ok().map(String::into_bytes),
        PasteboardFormat::RTF => ctx.get_rich_text().ok().map(String::into_bytes),
        PasteboardFormat::FILE_LIST => ctx
            .get_files()
            .ok()
            .map(|files| files.join("\n").into_bytes()),
        PasteboardFormat::IMAGE => {
            let mut png_bytes = None;
            if let Ok(img) = ctx.get_image() {
                match img.to_png() {
                    Ok(png) => png_bytes = Some(png.get_bytes().to_vec()),
                    Err(err) => log::debug!("pasteboard image encode failed: {err}"),
                }
            }
            png_bytes
        }
        _ => None,
    };
    Ok(bytes)
}

pub(super) fn write_text(ctx: &mut ClipboardContext, text: &str) -> Result<()> {
    adapt_err(ctx.set_text(text.to_string()))
}
