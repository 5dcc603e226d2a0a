pub mod address;
pub mod config;
pub mod dates;
pub mod error;
pub mod literal;
pub mod logging;
pub mod paths;
pub mod platform;
pub mod render;
pub mod server;
pub mod state;
pub mod styles;
pub mod tools;
pub mod workbook;

pub use config::{CliArgs, ServerConfig};
pub use error::{ErrorCode, InspectError, to_mcp_error};
pub use logging::{LoggingConfig, init_logging};
pub use paths::{PathResolver, WorkbookPath};
pub use platform::{HostEnv, PlatformKind};
pub use server::InspectorServer;

use anyhow::Result;
use std::sync::Arc;

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);

    tracing::info!(
        platform = %config.platform,
        home_dir = ?config.host_env().home_dir(),
        enabled_tools = ?config.enabled_tools,
        "starting spreadsheet inspection MCP server on stdio",
    );

    InspectorServer::new(config).run_stdio().await
}
