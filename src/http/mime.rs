//! MIME type lookup
//!
//! Maps a file path to a `Content-Type` by extension. The `.js`, `.css`,
//! and `.html` entries are deliberate overrides with fixed values so that
//! browsers always accept UI assets cross-origin; everything else goes
//! through the extension table, with `application/octet-stream` as the
//! fallback for unknown extensions.

use std::ffi::OsStr;
use std::path::Path;

/// Content type for the file at `path`, determined by extension alone.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use uiserve::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("app.js")), "application/javascript");
/// assert_eq!(content_type_for(Path::new("data.bin")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(OsStr::to_str) {
        // Overridden types, served with these exact values
        Some("js" | "mjs") => "application/javascript",
        Some("css") => "text/css",
        Some("html" | "htm") => "text/html",

        // Text
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Media
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents and archives
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",

        _ => "application/octet-stream",
    }
}
