//! Static file serving module
//!
//! Resolves request paths against a directory root and builds file
//! responses with conditional-request and range support. Paths reaching
//! this module have already had their mount prefix stripped.

use crate::handler::router::RequestContext;
use crate::http::{self, conditional, mime};
use crate::http::conditional::RangeOutcome;
use crate::http::response::{build_file_response, build_partial_response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Index files probed when a directory is requested
const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Serve a file from a directory root
pub async fn serve_directory(
    ctx: &RequestContext,
    root: &Path,
    subpath: &str,
) -> Response<Full<Bytes>> {
    match resolve(root, subpath).await {
        Some((content, content_type)) => build_conditional_response(ctx, &content, content_type),
        None => http::build_404_response(),
    }
}

/// Serve one fixed file, 404 when absent
pub async fn serve_single(ctx: &RequestContext, file_path: &Path) -> Response<Full<Bytes>> {
    match load_single_file(file_path).await {
        Some((content, content_type)) => build_conditional_response(ctx, &content, content_type),
        None => http::build_404_response(),
    }
}

/// Resolve a stripped request path to file contents under `root`
///
/// Files are served strictly under `root`: `..` segments are scrubbed from
/// the cleaned path, and the canonicalized result must stay inside the
/// canonicalized root. Directories are probed for index files; a directory
/// without one resolves to nothing.
pub async fn resolve(root: &Path, subpath: &str) -> Option<(Vec<u8>, &'static str)> {
    let clean_path = subpath.trim_start_matches('/').replace("..", "");

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Asset root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let mut file_path = root.join(&clean_path);

    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in INDEX_FILES {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // A missing file is an ordinary 404, only traversal gets logged
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            subpath,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Load a single file without directory resolution
async fn load_single_file(file_path: &Path) -> Option<(Vec<u8>, &'static str)> {
    let content = fs::read(file_path).await.ok()?;
    let content_type = mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build the file response, honoring `If-None-Match` and `Range`
fn build_conditional_response(
    ctx: &RequestContext,
    data: &[u8],
    content_type: &str,
) -> Response<Full<Bytes>> {
    let etag = conditional::etag_for(data);

    if conditional::if_none_match_hits(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match conditional::evaluate_range(ctx.range_header.as_deref(), data.len()) {
        RangeOutcome::Partial(range) => {
            build_partial_response(data, content_type, &etag, range, data.len(), ctx.is_head)
        }
        RangeOutcome::NotSatisfiable => http::build_416_response(data.len()),
        RangeOutcome::Full => build_file_response(data, content_type, &etag, ctx.is_head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "excaliframe-static-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_resolve_existing_file() {
        let root = test_root("hit");
        std::fs::write(root.join("logo.png"), b"png-bytes").unwrap();

        let (content, content_type) = resolve(&root, "/logo.png").await.unwrap();
        assert_eq!(content, b"png-bytes");
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let root = test_root("miss");
        assert!(resolve(&root, "/absent.js").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_directory_index() {
        let root = test_root("index");
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::write(root.join("docs/index.html"), b"<html></html>").unwrap();

        let (content, content_type) = resolve(&root, "/docs").await.unwrap();
        assert_eq!(content, b"<html></html>");
        assert_eq!(content_type, "text/html; charset=utf-8");

        // Directory without an index resolves to nothing
        std::fs::create_dir_all(root.join("empty")).unwrap();
        assert!(resolve(&root, "/empty").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let root = test_root("traversal");
        let sibling = test_root("traversal-sibling");
        std::fs::write(sibling.join("secret.txt"), b"secret").unwrap();

        assert!(resolve(&root, "/../traversal-sibling/secret.txt").await.is_none());
        assert!(resolve(&root, "/..%2Fsecret.txt").await.is_none());
    }
}
