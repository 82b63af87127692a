//! Responder
//!
//! Dispatches a resolved path to the listing view or the file streamer.

use super::listing::{self, ListingTemplate};
use super::router::RequestContext;
use super::static_files;
use crate::error::ServeError;
use crate::http::{self, ServeBody};
use hyper::Response;
use std::io;
use std::path::Path;
use tokio::fs;

/// Produce the response for an already resolved path
///
/// Directories render the listing template, everything else is streamed
/// as a file.
pub async fn respond(
    ctx: &RequestContext,
    resolved: &Path,
    template: &ListingTemplate,
    icons_route: &str,
) -> Result<Response<ServeBody>, ServeError> {
    let metadata = fs::metadata(resolved).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ServeError::NotFound(ctx.path.clone()),
        _ => ServeError::Internal(format!("cannot stat '{}': {e}", resolved.display())),
    })?;

    if metadata.is_dir() {
        let entries = listing::read_entries(resolved, &ctx.path).await?;
        let html = template.render(resolved, &entries, icons_route).await?;
        return Ok(http::build_html_response(html, ctx.is_head));
    }

    static_files::serve_file(ctx, resolved).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::CONTENT_TYPE;
    use hyper::StatusCode;

    fn ctx(path: &str) -> RequestContext {
        RequestContext {
            path: path.to_string(),
            ..RequestContext::default()
        }
    }

    #[tokio::test]
    async fn test_directory_renders_listing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("a/b.txt"), b"hi").unwrap();

        let resp = respond(
            &ctx("/a"),
            &dir.path().join("a"),
            &ListingTemplate::Embedded,
            "/icons/",
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("href=\"/a/b.txt\""));
        assert!(html.contains(">b.txt<"));
    }

    #[tokio::test]
    async fn test_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = respond(
            &ctx("/nope"),
            &dir.path().join("nope"),
            &ListingTemplate::Embedded,
            "/icons/",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_broken_template_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("broken.html");
        std::fs::write(&template, "{{#entries}}").unwrap();

        let err = respond(
            &ctx("/"),
            dir.path(),
            &ListingTemplate::File(template),
            "/icons/",
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_file_is_streamed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), b"body{}").unwrap();

        let resp = respond(
            &ctx("/style.css"),
            &dir.path().join("style.css"),
            &ListingTemplate::Embedded,
            "/icons/",
        )
        .await
        .unwrap();
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"body{}");
    }
}
