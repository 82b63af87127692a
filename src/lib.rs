//! ctf-serve: serve a directory tree over HTTP
//!
//! Directories are rendered as browsable listings, files are streamed with
//! a content type inferred from their extension. Every request path is
//! confined to the served root.

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod prompt;
pub mod server;
