//! Request error taxonomy
//!
//! Every failure inside the request handler maps to exactly one of these
//! variants and is terminal for the request.

use hyper::StatusCode;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Request path cannot be decoded or joined onto the served root
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Normalized path lies outside the served root
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Stat, enumeration, open or rendering failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServeError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map an I/O error the way a stock file server does:
    /// missing → 404, permission → 403, anything else → 500.
    pub fn from_io(err: &io::Error, what: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(what.to_string()),
            io::ErrorKind::PermissionDenied => Self::Forbidden(format!("{what}: {err}")),
            _ => Self::Internal(format!("{what}: {err}")),
        }
    }
}
