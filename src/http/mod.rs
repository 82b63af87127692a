//! HTTP protocol layer module
//!
//! Protocol helpers decoupled from the directory-serving logic: response
//! bodies, MIME lookup, byte ranges, conditional requests and response
//! builders.

pub mod body;
pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use body::ServeBody;
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_416_response, build_error_response, build_file_response,
    build_html_response, build_partial_response,
};
