//! Mount matching module
//!
//! Prefix containment matching over the mount table. Registration order
//! decides precedence, and the matched prefix is stripped so sub-handlers
//! see paths relative to their own mount point.

use super::table::Mount;

/// Check if a prefix mount covers a request path
///
/// A mount matches on an exact path or as a proper path ancestor:
/// `/static` covers `/static` and `/static/app.js`, never `/staticfoo`.
pub fn prefix_covers(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Strip a mount prefix from a path, keeping a leading slash
///
/// Returns None when the mount does not cover the path.
pub fn strip_mount_prefix(prefix: &str, path: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        None
    }
}

/// Find the first mount covering a path and the stripped subpath
///
/// Returns None when only the root fallback applies.
pub fn match_mount<'a>(mounts: &'a [Mount], path: &str) -> Option<(&'a Mount, String)> {
    mounts
        .iter()
        .find_map(|m| strip_mount_prefix(m.prefix, path).map(|subpath| (m, subpath)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::{MountTarget, RouteTable};
    use std::path::Path;

    #[test]
    fn test_prefix_covers() {
        assert!(prefix_covers("/static", "/static"));
        assert!(prefix_covers("/static", "/static/"));
        assert!(prefix_covers("/static", "/static/js/app.js"));
        assert!(!prefix_covers("/static", "/staticfoo"));
        assert!(!prefix_covers("/static", "/"));
        assert!(!prefix_covers("/static", "/images/logo.png"));
    }

    #[test]
    fn test_strip_keeps_leading_slash() {
        assert_eq!(
            strip_mount_prefix("/static", "/static/app.js").as_deref(),
            Some("/app.js")
        );
        assert_eq!(strip_mount_prefix("/static", "/static").as_deref(), Some("/"));
        assert_eq!(strip_mount_prefix("/static", "/static/").as_deref(), Some("/"));
        assert_eq!(strip_mount_prefix("/static", "/staticfoo"), None);
    }

    #[test]
    fn test_specific_mount_wins_over_fallback() {
        let table = RouteTable::new(Path::new("dist"));

        let (mount, subpath) =
            match_mount(table.mounts(), "/confluence/lifecycle/installed").unwrap();
        assert_eq!(mount.target, MountTarget::Confluence);
        assert_eq!(subpath, "/lifecycle/installed");

        let (mount, subpath) = match_mount(table.mounts(), "/excalidraw/editor").unwrap();
        assert_eq!(mount.target, MountTarget::Excalidraw);
        assert_eq!(subpath, "/editor");

        let (mount, subpath) = match_mount(table.mounts(), "/images/logo.png").unwrap();
        assert!(matches!(mount.target, MountTarget::AssetDir(_)));
        assert_eq!(subpath, "/logo.png");
    }

    #[test]
    fn test_unmatched_paths_fall_through_to_root() {
        let table = RouteTable::new(Path::new("dist"));
        assert!(match_mount(table.mounts(), "/").is_none());
        assert!(match_mount(table.mounts(), "/favicon.ico").is_none());
        assert!(match_mount(table.mounts(), "/robots.txt").is_none());
        // Shared prefix without a path boundary is not a match
        assert!(match_mount(table.mounts(), "/staticfoo").is_none());
        assert!(match_mount(table.mounts(), "/confluenceX/lifecycle").is_none());
    }

    #[test]
    fn test_exact_mount_path_delegates_root() {
        let table = RouteTable::new(Path::new("dist"));
        let (_, subpath) = match_mount(table.mounts(), "/confluence").unwrap();
        assert_eq!(subpath, "/");
    }
}
