use clap::Parser;
use xlsx_inspect_mcp::{CliArgs, LoggingConfig, ServerConfig, init_logging, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(logging_config)?;

    let cli = CliArgs::parse();
    let config = ServerConfig::from_args(cli)?;

    config.validate()?;

    let result = run_server(config).await;
    if let Err(error) = &result {
        tracing::error!(?error, "server exited with error");
    }
    result
}
