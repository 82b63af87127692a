// Served root module
// The directory exposed by the server, validated once at startup

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Canonical, absolute directory that every resolved path must stay inside
///
/// Immutable after construction and shared read-only across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedRoot(PathBuf);

impl ServedRoot {
    /// Canonicalize `dir` and verify it exists, is a directory and is readable
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        let canonical = dir.canonicalize().map_err(|e| {
            io::Error::new(e.kind(), format!("cannot serve '{}': {e}", dir.display()))
        })?;

        if !canonical.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot serve '{}': not a directory", canonical.display()),
            ));
        }

        std::fs::read_dir(&canonical).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("cannot serve '{}': {e}", canonical.display()),
            )
        })?;

        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ServedRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ServedRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}
