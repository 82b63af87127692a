//! Directory listing module
//!
//! Enumerates a directory into listing entries and renders them through a
//! small placeholder template:
//!
//! - `{{directory}}` - resolved filesystem path of the listed directory
//! - `{{icons}}` - URL prefix of the icon route
//! - `{{#entries}}...{{/entries}}` - repeated once per entry, with
//!   `{{name}}`, `{{url}}` and `{{icon}}` available inside
//!
//! Values are HTML-escaped and URLs percent-encoded per path segment.
//! Unknown placeholders are left untouched.

use super::icons::{self, Icon};
use super::resolve::clean_url_path;
use crate::error::ServeError;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs;

const EMBEDDED_TEMPLATE: &str = include_str!("../../templates/index.html");

const ENTRIES_OPEN: &str = "{{#entries}}";
const ENTRIES_CLOSE: &str = "{{/entries}}";

/// Characters escaped inside a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One listed child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    /// Decoded URL path of the child
    pub url: String,
    pub icon: Icon,
}

/// Where the listing template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTemplate {
    /// `templates/index.html`, compiled into the binary
    Embedded,
    /// Read from disk on every render
    File(PathBuf),
}

impl ListingTemplate {
    async fn source(&self) -> Result<Cow<'static, str>, ServeError> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(EMBEDDED_TEMPLATE)),
            Self::File(path) => fs::read_to_string(path).await.map(Cow::Owned).map_err(|e| {
                ServeError::Internal(format!("cannot load template '{}': {e}", path.display()))
            }),
        }
    }

    pub async fn render(
        &self,
        directory: &Path,
        entries: &[DirectoryEntry],
        icons_route: &str,
    ) -> Result<String, ServeError> {
        let source = self.source().await?;
        render(
            &source,
            &directory.to_string_lossy(),
            entries,
            icons_route,
        )
    }
}

/// Join a child name onto the request's URL path with a single `/`
///
/// The URL path is cleaned first, so `/a/./b/` and `/a/b` produce
/// identical child links.
pub fn child_url(url_path: &str, name: &str) -> String {
    let base = clean_url_path(url_path);
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Enumerate the immediate children of `dir`, sorted by name
pub async fn read_entries(dir: &Path, url_path: &str) -> Result<Vec<DirectoryEntry>, ServeError> {
    let read_err =
        |e: std::io::Error| ServeError::Internal(format!("cannot read '{}': {e}", dir.display()));

    let mut read_dir = fs::read_dir(dir).await.map_err(read_err)?;
    let mut entries = Vec::new();

    while let Some(child) = read_dir.next_entry().await.map_err(read_err)? {
        let name = child.file_name().to_string_lossy().into_owned();
        // Entry's own type: a symlink to a directory is not listed as a folder
        let is_dir = child.file_type().await.map_err(read_err)?.is_dir();
        entries.push(DirectoryEntry {
            url: child_url(url_path, &name),
            icon: icons::classify(&name, is_dir),
            name,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Render `template` with the given directory and entries
pub fn render(
    template: &str,
    directory: &str,
    entries: &[DirectoryEntry],
    icons_route: &str,
) -> Result<String, ServeError> {
    let (head, block, tail) = split_entries_block(template)?;

    let globals = |key: &str| match key {
        "directory" => Some(escape_html(directory)),
        "icons" => Some(escape_html(icons_route)),
        _ => None,
    };

    let mut out = String::with_capacity(template.len() + entries.len() * block.len());
    fill(&mut out, head, &globals);
    for entry in entries {
        fill(&mut out, block, &|key: &str| match key {
            "name" => Some(escape_html(&entry.name)),
            "url" => Some(escape_html(&encode_url(&entry.url))),
            "icon" => Some(escape_html(entry.icon.file_name())),
            other => globals(other),
        });
    }
    fill(&mut out, tail, &globals);
    Ok(out)
}

fn split_entries_block(template: &str) -> Result<(&str, &str, &str), ServeError> {
    match (template.find(ENTRIES_OPEN), template.find(ENTRIES_CLOSE)) {
        (Some(open), Some(close)) if open < close => Ok((
            &template[..open],
            &template[open + ENTRIES_OPEN.len()..close],
            &template[close + ENTRIES_CLOSE.len()..],
        )),
        (None, None) => Ok((template, "", "")),
        _ => Err(ServeError::Internal(format!(
            "listing template has an unbalanced {ENTRIES_OPEN} block"
        ))),
    }
}

/// Single-pass placeholder substitution; inserted values are never rescanned
fn fill(out: &mut String, mut text: &str, lookup: &dyn Fn(&str) -> Option<String>) {
    while let Some(start) = text.find("{{") {
        out.push_str(&text[..start]);
        let rest = &text[start + 2..];
        match rest.find("}}") {
            Some(end) => {
                let key = rest[..end].trim();
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&text[start..start + 2 + end + 2]),
                }
                text = &rest[end + 2..];
            }
            None => {
                out.push_str(&text[start..]);
                return;
            }
        }
    }
    out.push_str(text);
}

fn encode_url(url: &str) -> String {
    url.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
