// Application state module
// Frozen per-process state shared across request tasks

use std::path::Path;

use super::types::Config;
use crate::routing::RouteTable;

/// Application state
///
/// Constructed once at startup and shared behind `Arc`. Nothing here is
/// mutated afterwards, so concurrent request tasks read it without locks.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let routes = RouteTable::new(Path::new(&config.server.dist_dir));
        Self { config, routes }
    }
}
