//! Static file serving module
//!
//! Streams a regular file with MIME detection, conditional requests and
//! single byte-range support.

use crate::error::ServeError;
use crate::handler::router::RequestContext;
use crate::http::{self, body, cache, mime, range::RangeParseResult};
use hyper::Response;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

/// Serve the file at `path`
///
/// The file is opened first and its metadata taken from the open handle, so
/// the length advertised always belongs to the file being streamed.
pub async fn serve_file(
    ctx: &RequestContext,
    path: &Path,
) -> Result<Response<http::ServeBody>, ServeError> {
    let what = path.display().to_string();
    let mut file = File::open(path)
        .await
        .map_err(|e| ServeError::from_io(&e, &what))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| ServeError::from_io(&e, &what))?;
    if metadata.is_dir() {
        return Err(ServeError::NotFound(what));
    }

    let file_size = metadata.len();
    let validators = cache::Validators::from_metadata(&metadata);
    let content_type = mime::content_type_for(path);

    if cache::is_not_modified(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
        &validators,
    ) {
        return Ok(http::build_304_response(&validators));
    }

    if cache::range_applies(ctx.if_range.as_deref(), &validators) {
        match http::parse_range_header(ctx.range_header.as_deref(), file_size) {
            RangeParseResult::Valid(range) => {
                let body = if ctx.is_head {
                    body::empty()
                } else {
                    file.seek(SeekFrom::Start(range.start))
                        .await
                        .map_err(|e| ServeError::Internal(format!("{what}: {e}")))?;
                    body::from_file(file, range.content_length())
                };
                return Ok(http::build_partial_response(
                    body,
                    content_type,
                    range,
                    file_size,
                    &validators,
                ));
            }
            RangeParseResult::NotSatisfiable => {
                return Ok(http::build_416_response(file_size));
            }
            RangeParseResult::None => {
                // No Range header or malformed, return full content
            }
        }
    }

    let body = if ctx.is_head {
        body::empty()
    } else {
        body::from_file(file, file_size)
    };
    Ok(http::build_file_response(
        body,
        content_type,
        file_size,
        &validators,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG, LAST_MODIFIED};
    use hyper::StatusCode;

    fn ctx() -> RequestContext {
        RequestContext {
            path: "/file".to_string(),
            ..RequestContext::default()
        }
    }

    fn write(contents: &[u8], name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    async fn body_bytes(resp: Response<http::ServeBody>) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_full_file() {
        let (_dir, path) = write(b"{\"ok\":true}", "data.json");
        let resp = serve_file(&ctx(), &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "11");
        assert!(resp.headers().contains_key(ETAG));
        assert!(resp.headers().contains_key(LAST_MODIFIED));
        assert_eq!(body_bytes(resp).await, b"{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let (_dir, path) = write(b"\x00\x01", "blob.xyz");
        let resp = serve_file(&ctx(), &path).await.unwrap();
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = serve_file(&ctx(), &dir.path().join("gone")).await.unwrap_err();
        assert!(matches!(err, ServeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_range() {
        let (_dir, path) = write(b"0123456789", "digits.txt");
        let ctx = RequestContext {
            range_header: Some("bytes=2-5".to_string()),
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()[CONTENT_RANGE], "bytes 2-5/10");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "4");
        assert_eq!(body_bytes(resp).await, b"2345");
    }

    #[tokio::test]
    async fn test_suffix_range() {
        let (_dir, path) = write(b"0123456789", "digits.txt");
        let ctx = RequestContext {
            range_header: Some("bytes=-3".to_string()),
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(body_bytes(resp).await, b"789");
    }

    #[tokio::test]
    async fn test_unsatisfiable_range() {
        let (_dir, path) = write(b"0123456789", "digits.txt");
        let ctx = RequestContext {
            range_header: Some("bytes=50-60".to_string()),
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(resp.headers()[CONTENT_RANGE], "bytes */10");
    }

    #[tokio::test]
    async fn test_if_range_mismatch_serves_full_body() {
        let (_dir, path) = write(b"0123456789", "digits.txt");
        let ctx = RequestContext {
            range_header: Some("bytes=2-5".to_string()),
            if_range: Some("\"stale\"".to_string()),
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, b"0123456789");
    }

    #[tokio::test]
    async fn test_etag_revalidation() {
        let (_dir, path) = write(b"cached", "page.html");
        let first = serve_file(&ctx(), &path).await.unwrap();
        let etag = first.headers()[ETAG].to_str().unwrap().to_string();

        let ctx = RequestContext {
            if_none_match: Some(etag),
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_if_modified_since_revalidation() {
        let (_dir, path) = write(b"cached", "page.html");
        let first = serve_file(&ctx(), &path).await.unwrap();
        let last_modified = first.headers()[LAST_MODIFIED].to_str().unwrap().to_string();

        let ctx = RequestContext {
            if_modified_since: Some(last_modified),
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_head_has_headers_but_no_body() {
        let (_dir, path) = write(b"0123456789", "digits.txt");
        let ctx = RequestContext {
            is_head: true,
            ..ctx()
        };
        let resp = serve_file(&ctx, &path).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "10");
        assert!(body_bytes(resp).await.is_empty());
    }
}
