//! MIME type detection module
//!
//! Maps a lower-cased, dotted file extension to a Content-Type. Used for
//! file responses only; directory listings are always `text/html`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

static MIME_TABLE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Text
        (".html", "text/html"),
        (".htm", "text/html"),
        (".css", "text/css"),
        (".txt", "text/plain; charset=utf-8"),
        (".md", "text/markdown; charset=utf-8"),
        (".csv", "text/csv"),
        (".xml", "application/xml"),
        // JavaScript/WASM
        (".js", "application/javascript"),
        (".mjs", "application/javascript"),
        (".json", "application/json"),
        (".wasm", "application/wasm"),
        // Images
        (".png", "image/png"),
        (".jpg", "image/jpeg"),
        (".jpeg", "image/jpeg"),
        (".gif", "image/gif"),
        (".svg", "image/svg+xml"),
        (".ico", "image/x-icon"),
        (".webp", "image/webp"),
        // Video
        (".mp4", "video/mp4"),
        (".webm", "video/webm"),
        (".ogv", "video/ogg"),
        (".mov", "video/quicktime"),
        (".avi", "video/x-msvideo"),
        // Audio
        (".mp3", "audio/mpeg"),
        (".wav", "audio/wav"),
        (".flac", "audio/flac"),
        (".m4a", "audio/mp4"),
        (".ogg", "audio/ogg"),
        // Fonts
        (".woff", "font/woff"),
        (".woff2", "font/woff2"),
        (".ttf", "font/ttf"),
        (".otf", "font/otf"),
        // Documents and archives
        (".pdf", "application/pdf"),
        (".zip", "application/zip"),
        (".gz", "application/gzip"),
        (".gzip", "application/gzip"),
        (".tar", "application/x-tar"),
    ])
});

/// Get MIME Content-Type for a dotted extension (e.g. `".PNG"`)
///
/// # Examples
/// ```
/// use ctf_serve::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some(".JSON")), "application/json");
/// assert_eq!(get_content_type(Some(".xyz")), "application/octet-stream");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    extension
        .map(str::to_ascii_lowercase)
        .and_then(|ext| MIME_TABLE.get(ext.as_str()).copied())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// Content-Type for a filesystem path, based on its final extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"));
    get_content_type(extension.as_deref())
}
