//! Drawing page handlers
//!
//! The editor and renderer are single prebuilt HTML documents at fixed
//! locations under the distribution root. Absent files are a plain 404
//! with no fallback.

use crate::handler::router::RequestContext;
use crate::handler::static_files;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use std::path::Path;

/// Map a stripped `/excalidraw` subpath to its page document
fn page_for(subpath: &str) -> Option<&'static str> {
    match subpath {
        "/editor" => Some("excalidraw/editor.html"),
        "/renderer" => Some("excalidraw/renderer.html"),
        _ => None,
    }
}

/// Handle a request under the `/excalidraw` mount (prefix already stripped)
pub async fn handle(
    ctx: &RequestContext,
    method: &Method,
    subpath: &str,
    dist_dir: &Path,
) -> Response<Full<Bytes>> {
    let Some(page) = page_for(subpath) else {
        return http::build_404_response();
    };

    if !matches!(*method, Method::GET | Method::HEAD) {
        return http::build_405_response("GET, HEAD");
    }

    static_files::serve_single(ctx, &dist_dir.join(page)).await
}
