//! Atlassian Connect surface
//!
//! Serves the `atlassian-connect.json` descriptor and the install/uninstall
//! lifecycle webhooks. The lifecycle endpoints acknowledge every call with
//! 200: Confluence treats any error answer as a broken integration and may
//! retry indefinitely, so decode problems are logged locally instead.

use crate::handler::router::RequestContext;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Descriptor file name, owned by the Atlassian platform schema
const DESCRIPTOR_FILE: &str = "atlassian-connect.json";

/// Connect lifecycle webhook payload
///
/// Every field is defaulted: the platform's payload shape is not under our
/// control and a partial object still identifies the installation.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LifecyclePayload {
    pub client_key: String,
    pub shared_secret: String,
    pub base_url: String,
}

/// Lifecycle transition signaled by the platform
#[derive(Debug, Clone, Copy)]
enum LifecycleEvent {
    Installed,
    Uninstalled,
}

impl LifecycleEvent {
    const fn name(self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Uninstalled => "uninstalled",
        }
    }
}

/// Handle a request under the `/confluence` mount (prefix already stripped)
pub async fn handle(
    req: Request<hyper::body::Incoming>,
    ctx: &RequestContext,
    subpath: &str,
    dist_dir: &Path,
) -> Response<Full<Bytes>> {
    match subpath {
        "/atlassian-connect.json" => serve_descriptor(req.method(), ctx, dist_dir).await,
        "/lifecycle/installed" => lifecycle(req, LifecycleEvent::Installed).await,
        "/lifecycle/uninstalled" => lifecycle(req, LifecycleEvent::Uninstalled).await,
        _ => http::build_404_response(),
    }
}

/// Serve the Connect descriptor from the first existing candidate location
async fn serve_descriptor(
    method: &Method,
    ctx: &RequestContext,
    dist_dir: &Path,
) -> Response<Full<Bytes>> {
    if !matches!(*method, Method::GET | Method::HEAD) {
        return http::build_405_response("GET, HEAD");
    }

    match locate_descriptor(dist_dir).await {
        Some(path) => static_files::serve_single(ctx, &path).await,
        None => http::build_404_response(),
    }
}

/// Candidate locations for the descriptor, most specific first
///
/// The packaged deployment bakes the descriptor into the distribution
/// directory; the development layout keeps a copy next to the binary.
fn descriptor_candidates(dist_dir: &Path) -> [PathBuf; 2] {
    [dist_dir.join(DESCRIPTOR_FILE), PathBuf::from(DESCRIPTOR_FILE)]
}

/// First existing candidate wins
async fn locate_descriptor(dist_dir: &Path) -> Option<PathBuf> {
    for candidate in descriptor_candidates(dist_dir) {
        if tokio::fs::metadata(&candidate)
            .await
            .is_ok_and(|m| m.is_file())
        {
            return Some(candidate);
        }
    }
    None
}

/// Handle an install/uninstall webhook call
///
/// POST only. The body is consumed and decoded best-effort; read and decode
/// failures (including cut-short and empty bodies) are logged and the call
/// is acknowledged exactly like a well-formed one.
async fn lifecycle(
    req: Request<hyper::body::Incoming>,
    event: LifecycleEvent,
) -> Response<Full<Bytes>> {
    if req.method() != Method::POST {
        return http::build_405_response("POST");
    }

    match req.into_body().collect().await {
        Ok(collected) => record_event(event, &collected.to_bytes()),
        Err(e) => logger::log_warning(&format!(
            "Failed to read {} payload: {e}",
            event.name()
        )),
    }

    lifecycle_ack()
}

/// Decode the payload and log the transition; never fails the request
fn record_event(event: LifecycleEvent, body: &[u8]) {
    match serde_json::from_slice::<LifecyclePayload>(body) {
        Ok(payload) => match event {
            LifecycleEvent::Installed => {
                logger::log_plugin_installed(&payload.client_key, &payload.base_url);
            }
            LifecycleEvent::Uninstalled => {
                logger::log_plugin_uninstalled(&payload.client_key);
            }
        },
        Err(e) => logger::log_warning(&format!(
            "Failed to decode {} payload: {e}",
            event.name()
        )),
    }
}

/// The acknowledgment every lifecycle call receives
fn lifecycle_ack() -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, &serde_json::json!({"status": "ok"}))
}
