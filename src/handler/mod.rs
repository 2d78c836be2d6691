//! Request handler module
//!
//! One sub-module per functional area mounted by the route table, plus the
//! dispatching router that composes them.

pub mod confluence;
pub mod excalidraw;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
