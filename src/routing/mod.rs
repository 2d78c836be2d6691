//! Routing module
//!
//! Prefix-mount routing for the single dispatch surface:
//! - Ordered mount table with a distribution-root fallback
//! - Longest-registered-prefix matching with prefix stripping
//! - Canonical host/scheme evaluation ahead of dispatch

pub mod canonical;
pub mod matcher;
pub mod table;

pub use matcher::match_mount;
pub use table::{Mount, MountTarget, RouteTable};
