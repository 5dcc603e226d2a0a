use crate::config::ServerConfig;
use crate::paths::PathResolver;
use std::sync::Arc;

/// Per-process state shared by tool handlers.
///
/// Holds configuration and the path resolver only. Workbooks are loaded per
/// request and never cached here.
pub struct AppState {
    config: Arc<ServerConfig>,
    resolver: PathResolver,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let resolver = PathResolver::new(config.host_env());
        Self { config, resolver }
    }

    pub fn config(&self) -> Arc<ServerConfig> {
        self.config.clone()
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }
}
