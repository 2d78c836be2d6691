//! Canonical host module
//!
//! Decides, before route dispatch, whether a request must be redirected to
//! the canonical origin: `www.` stripped and https enforced on the
//! production domain. Runs behind a TLS-terminating proxy, so the original
//! scheme arrives in the `X-Forwarded-Proto` header.

/// Header carrying the client-facing scheme, set by the fronting proxy
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Resolve the effective request scheme
///
/// The forwarded header wins when present. The in-process listener is
/// always plaintext, so an absent header means the connection itself was
/// not encrypted and the scheme defaults to `http`.
pub fn effective_proto(forwarded_proto: Option<&str>) -> &str {
    match forwarded_proto {
        Some(proto) if !proto.is_empty() => proto,
        _ => "http",
    }
}

/// Compute the canonical redirect target for a request, if one is needed
///
/// Redirects when the host carries a `www.` prefix, or when the scheme is
/// insecure and the host belongs to the production domain. Insecure
/// requests to other hosts (local development) pass through untouched.
pub fn canonical_redirect(
    host: &str,
    proto: &str,
    request_uri: &str,
    production_domain: &str,
) -> Option<String> {
    let (canonical_host, had_www) = match host.strip_prefix("www.") {
        Some(trimmed) => (trimmed, true),
        None => (host, false),
    };

    let insecure_production = proto == "http" && host.contains(production_domain);

    if had_www || insecure_production {
        Some(format!("https://{canonical_host}{request_uri}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "excaliframe.com";

    #[test]
    fn test_effective_proto() {
        assert_eq!(effective_proto(Some("https")), "https");
        assert_eq!(effective_proto(Some("http")), "http");
        assert_eq!(effective_proto(Some("")), "http");
        assert_eq!(effective_proto(None), "http");
    }

    #[test]
    fn test_www_redirects_on_any_proto() {
        assert_eq!(
            canonical_redirect("www.excaliframe.com", "https", "/excalidraw/editor", DOMAIN),
            Some("https://excaliframe.com/excalidraw/editor".to_string())
        );
        assert_eq!(
            canonical_redirect("www.excaliframe.com", "http", "/", DOMAIN),
            Some("https://excaliframe.com/".to_string())
        );
    }

    #[test]
    fn test_insecure_production_redirects() {
        assert_eq!(
            canonical_redirect("excaliframe.com", "http", "/static/app.js", DOMAIN),
            Some("https://excaliframe.com/static/app.js".to_string())
        );
    }

    #[test]
    fn test_secure_canonical_passes() {
        assert_eq!(
            canonical_redirect("excaliframe.com", "https", "/", DOMAIN),
            None
        );
    }

    #[test]
    fn test_insecure_local_development_passes() {
        assert_eq!(canonical_redirect("localhost:3000", "http", "/", DOMAIN), None);
        assert_eq!(canonical_redirect("127.0.0.1", "http", "/", DOMAIN), None);
    }

    #[test]
    fn test_query_string_survives_redirect() {
        assert_eq!(
            canonical_redirect(
                "www.excaliframe.com",
                "https",
                "/excalidraw/renderer?drawing=42",
                DOMAIN
            ),
            Some("https://excaliframe.com/excalidraw/renderer?drawing=42".to_string())
        );
    }

    #[test]
    fn test_port_is_preserved() {
        assert_eq!(
            canonical_redirect("www.excaliframe.com:8080", "https", "/", DOMAIN),
            Some("https://excaliframe.com:8080/".to_string())
        );
    }
}
