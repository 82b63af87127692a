//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: decodes the path, picks the
//! icon route or the served root, and turns failures into error responses.

use super::resolve::{clean_url_path, resolve};
use super::respond::respond;
use super::static_files;
use crate::config::AppState;
use crate::error::ServeError;
use crate::http::{self, ServeBody};
use crate::logger::{self, AccessLogEntry};
use hyper::header::{self, HeaderMap, HeaderName};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Percent-decoded URL path
    pub path: String,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub if_range: Option<String>,
    pub range_header: Option<String>,
}

impl RequestContext {
    fn from_parts(path: String, method: &Method, headers: &HeaderMap) -> Self {
        Self {
            path,
            is_head: *method == Method::HEAD,
            if_none_match: header_string(headers, &header::IF_NONE_MATCH),
            if_modified_since: header_string(headers, &header::IF_MODIFIED_SINCE),
            if_range: header_string(headers, &header::IF_RANGE),
            range_header: header_string(headers, &header::RANGE),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Never fails: every error becomes a status response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<ServeBody>, Infallible> {
    let started = Instant::now();
    // The body is never read
    let (parts, _) = req.into_parts();
    let raw_path = parts.uri.path();

    let result = match decode_path(raw_path) {
        Ok(path) => {
            let ctx = RequestContext::from_parts(path, &parts.method, &parts.headers);
            route(&ctx, &state).await
        }
        Err(e) => Err(e),
    };

    let response = result.unwrap_or_else(|err| {
        let message = format!("{} {raw_path}: {err}", parts.method);
        if err.status().is_server_error() {
            logger::log_error(&message);
        } else {
            logger::log_debug(&message);
        }
        http::build_error_response(&err)
    });

    if state.config.logging.access_log {
        let entry = access_entry(&parts, remote_addr, &response, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch to the icon route or the served root
async fn route(ctx: &RequestContext, state: &AppState) -> Result<Response<ServeBody>, ServeError> {
    let icons_route = state.config.serve.icons_route.as_str();

    if let Some(icons) = &state.icons {
        let cleaned = clean_url_path(&ctx.path);
        if let Some(asset) = route_suffix(&cleaned, icons_route) {
            let resolved = resolve(icons, asset)?;
            return static_files::serve_file(ctx, &resolved).await;
        }
    }

    let resolved = resolve(&state.root, &ctx.path)?;
    respond(ctx, &resolved, &state.template, icons_route).await
}

/// Remainder of a cleaned URL path below `route`, if it lies under it
fn route_suffix<'a>(path: &'a str, route: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(route.trim_end_matches('/'))?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

fn decode_path(raw: &str) -> Result<String, ServeError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|p| p.into_owned())
        .map_err(|e| ServeError::BadRequest(format!("{raw}: {e}")))
}

fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn access_entry(
    req: &Parts,
    remote_addr: SocketAddr,
    response: &Response<ServeBody>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = version_label(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = if req.method == Method::HEAD {
        0
    } else {
        response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };
    entry.referer = header_string(&req.headers, &header::REFERER);
    entry.user_agent = header_string(&req.headers, &header::USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
