//! Path resolution module
//!
//! Maps a decoded request path onto the served root and enforces that the
//! result never leaves it.

use crate::config::ServedRoot;
use crate::error::ServeError;
use std::path::{PathBuf, MAIN_SEPARATOR};

/// Resolve a decoded URL path to an absolute filesystem path under `root`
///
/// Leading separators are stripped, `.` and empty segments are dropped and
/// `..` removes the previous component, purely lexically (symbolic links
/// are not followed). The result must be `root` itself or a descendant of
/// it, compared component by component, so `/srv/data-other` is never
/// accepted for a root of `/srv/data`.
pub fn resolve(root: &ServedRoot, request_path: &str) -> Result<PathBuf, ServeError> {
    if request_path.contains('\0') {
        return Err(ServeError::BadRequest(format!(
            "path contains a NUL byte: {request_path:?}"
        )));
    }

    let mut resolved = root.path().to_path_buf();
    for segment in request_path.split(['/', MAIN_SEPARATOR]) {
        match segment {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            name => resolved.push(name),
        }
    }

    if !resolved.starts_with(root.path()) {
        return Err(ServeError::Forbidden(format!(
            "{request_path} -> {}",
            resolved.display()
        )));
    }

    Ok(resolved)
}

/// Lexically clean a URL path: empty and `.` segments dropped, `..` pops
/// the previous segment and never climbs above `/`
pub fn clean_url_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
