//! Mount table module
//!
//! The process-wide route table: an ordered list of prefix mounts built
//! once at startup and shared read-only across request tasks. Order
//! encodes precedence; the distribution root acts as the fallback when no
//! mount matches.

use std::path::{Path, PathBuf};

/// Handler capability bound to a mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    /// Atlassian Connect surface: descriptor and lifecycle webhooks
    Confluence,
    /// Drawing pages: editor and renderer
    Excalidraw,
    /// Files served from one directory root
    AssetDir(PathBuf),
}

/// A path prefix bound to a handler capability
#[derive(Debug, Clone)]
pub struct Mount {
    pub prefix: &'static str,
    pub target: MountTarget,
}

/// Ordered mount table plus the fallback file-server root
#[derive(Debug, Clone)]
pub struct RouteTable {
    mounts: Vec<Mount>,
    fallback_root: PathBuf,
}

impl RouteTable {
    /// Build the table for a distribution directory.
    ///
    /// Specific prefixes are registered before the implicit root fallback,
    /// and the list is never mutated after construction.
    pub fn new(dist_dir: &Path) -> Self {
        let mounts = vec![
            Mount {
                prefix: "/confluence",
                target: MountTarget::Confluence,
            },
            Mount {
                prefix: "/excalidraw",
                target: MountTarget::Excalidraw,
            },
            Mount {
                prefix: "/static",
                target: MountTarget::AssetDir(dist_dir.join("static")),
            },
            Mount {
                prefix: "/images",
                target: MountTarget::AssetDir(dist_dir.join("images")),
            },
        ];

        Self {
            mounts,
            fallback_root: dist_dir.to_path_buf(),
        }
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    pub fn fallback_root(&self) -> &Path {
        &self.fallback_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_registration_order() {
        let table = RouteTable::new(Path::new("dist"));
        let prefixes: Vec<_> = table.mounts().iter().map(|m| m.prefix).collect();
        assert_eq!(
            prefixes,
            vec!["/confluence", "/excalidraw", "/static", "/images"]
        );
        assert_eq!(table.fallback_root(), Path::new("dist"));
    }

    #[test]
    fn test_asset_roots_are_independent() {
        let table = RouteTable::new(Path::new("dist"));
        let roots: Vec<_> = table
            .mounts()
            .iter()
            .filter_map(|m| match &m.target {
                MountTarget::AssetDir(root) => Some(root.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            roots,
            vec![PathBuf::from("dist/static"), PathBuf::from("dist/images")]
        );
    }
}
