// Configuration module entry point
// Layered loading: optional config.toml, EXCALIFRAME_* environment
// variables, documented defaults, then the deployment platform's PORT and
// DIST_DIR variables on top.

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

impl Config {
    /// Load configuration from "config.toml" plus environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("EXCALIFRAME").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.dist_dir", "dist")?
            .set_default("site.canonical_domain", "excaliframe.com")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.apply_platform_env()?;
        Ok(cfg)
    }

    /// Apply the hosting platform's conventional variables.
    ///
    /// App Engine style deployments inject `PORT`; the asset pipeline sets
    /// `DIST_DIR` in development. An empty value counts as unset.
    fn apply_platform_env(&mut self) -> Result<(), config::ConfigError> {
        if let Ok(port) = std::env::var("PORT") {
            if !port.is_empty() {
                self.server.port = port
                    .parse()
                    .map_err(|e| config::ConfigError::Message(format!("Invalid PORT: {e}")))?;
            }
        }
        if let Ok(dist_dir) = std::env::var("DIST_DIR") {
            if !dist_dir.is_empty() {
                self.server.dist_dir = dist_dir;
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
