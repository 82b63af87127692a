//! HTTP response building module
//!
//! Builders for the status codes the handler emits. A builder failure is
//! logged and degrades to a bare response instead of panicking.

use super::body::{self, ServeBody};
use super::cache::Validators;
use super::range::ByteRange;
use crate::error::ServeError;
use hyper::header::{
    ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG, LAST_MODIFIED,
};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Plain-text error response for a request failure
pub fn build_error_response(err: &ServeError) -> Response<ServeBody> {
    let status = err.status();
    let text = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    finish(
        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .header(CONTENT_LENGTH, text.len()),
        body::full(text),
        status,
    )
}

/// Build 304 Not Modified response
pub fn build_304_response(validators: &Validators) -> Response<ServeBody> {
    let builder = with_validators(
        Response::builder().status(StatusCode::NOT_MODIFIED),
        validators,
    );
    finish(builder, body::empty(), StatusCode::NOT_MODIFIED)
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: u64) -> Response<ServeBody> {
    finish(
        Response::builder()
            .status(StatusCode::RANGE_NOT_SATISFIABLE)
            .header(CONTENT_RANGE, format!("bytes */{file_size}"))
            .header(CONTENT_LENGTH, 0),
        body::empty(),
        StatusCode::RANGE_NOT_SATISFIABLE,
    )
}

/// Build rendered listing response
pub fn build_html_response(content: String, is_head: bool) -> Response<ServeBody> {
    let content_length = content.len();
    let body = if is_head {
        body::empty()
    } else {
        body::full(content)
    };

    finish(
        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
            .header(CONTENT_LENGTH, content_length),
        body,
        StatusCode::OK,
    )
}

/// Build 200 response for a whole file
pub fn build_file_response(
    body: ServeBody,
    content_type: &str,
    file_size: u64,
    validators: &Validators,
) -> Response<ServeBody> {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, file_size)
        .header(ACCEPT_RANGES, "bytes");
    finish(with_validators(builder, validators), body, StatusCode::OK)
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    body: ServeBody,
    content_type: &str,
    range: ByteRange,
    file_size: u64,
    validators: &Validators,
) -> Response<ServeBody> {
    let builder = Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, range.content_length())
        .header(CONTENT_RANGE, range.content_range(file_size))
        .header(ACCEPT_RANGES, "bytes");
    finish(
        with_validators(builder, validators),
        body,
        StatusCode::PARTIAL_CONTENT,
    )
}

fn with_validators(mut builder: Builder, validators: &Validators) -> Builder {
    builder = builder.header(ETAG, validators.etag.as_str());
    if let Some(last_modified) = validators.last_modified_header() {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }
    builder
}

fn finish(builder: Builder, body: ServeBody, status: StatusCode) -> Response<ServeBody> {
    builder.body(body).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {status} response: {e}"));
        let mut resp = Response::new(body::empty());
        *resp.status_mut() = status;
        resp
    })
}
