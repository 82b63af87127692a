//! Request handler module
//!
//! Maps request paths onto the served root and produces listings or file
//! streams. Nothing here writes shared state, so requests run concurrently
//! without locking.

pub mod icons;
pub mod listing;
pub mod resolve;
pub mod respond;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
