//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Every request passes the
//! canonical-origin filter first; survivors are dispatched to the handler
//! of the first covering mount with the prefix stripped, and fall through
//! to the distribution-root file server otherwise. Each request is access
//! logged with its status, size, and duration.

use crate::config::AppState;
use crate::handler::{confluence, excalidraw, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::canonical::{canonical_redirect, effective_proto, FORWARDED_PROTO_HEADER};
use crate::routing::{self, MountTarget};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::header;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Request context shared by the file-serving handlers
pub struct RequestContext {
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

impl RequestContext {
    fn from_request(req: &Request<Incoming>) -> Self {
        Self {
            is_head: *req.method() == Method::HEAD,
            if_none_match: header_value(req, "if-none-match"),
            range_header: header_value(req, "range"),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    // Capture what the access log needs before the request body is consumed
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = format_version(req.version());
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let response = dispatch(req, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(remote_addr.ip().to_string(), method, path);
        entry.query = query;
        entry.http_version = http_version;
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run the canonical filter, then select exactly one handler
async fn dispatch(req: Request<Incoming>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    // 1. Canonical origin filter: a redirect short-circuits the pipeline
    if let Some(location) = check_canonical(&req, &state.config.site.canonical_domain) {
        return http::build_301_response(&location);
    }

    // 2. Mount dispatch with prefix stripping, dist root as fallback
    let ctx = RequestContext::from_request(&req);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let dist_dir = Path::new(&state.config.server.dist_dir);

    match routing::match_mount(state.routes.mounts(), &path) {
        Some((mount, subpath)) => match &mount.target {
            MountTarget::Confluence => confluence::handle(req, &ctx, &subpath, dist_dir).await,
            MountTarget::Excalidraw => {
                excalidraw::handle(&ctx, &method, &subpath, dist_dir).await
            }
            MountTarget::AssetDir(root) => serve_assets(&ctx, &method, root, &subpath).await,
        },
        None => serve_assets(&ctx, &method, state.routes.fallback_root(), &path).await,
    }
}

/// Evaluate the canonical-origin rules against the request
fn check_canonical(req: &Request<Incoming>, production_domain: &str) -> Option<String> {
    let host = req.headers().get(header::HOST)?.to_str().ok()?;
    let proto = header_value(req, FORWARDED_PROTO_HEADER);
    let request_uri = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);

    canonical_redirect(
        host,
        effective_proto(proto.as_deref()),
        &request_uri,
        production_domain,
    )
}

/// Serve from an asset root; file routes accept GET and HEAD only
async fn serve_assets(
    ctx: &RequestContext,
    method: &Method,
    root: &Path,
    subpath: &str,
) -> Response<Full<Bytes>> {
    if !matches!(*method, Method::GET | Method::HEAD) {
        return http::build_405_response("GET, HEAD");
    }
    static_files::serve_directory(ctx, root, subpath).await
}

fn header_value(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn format_version(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string()
}
