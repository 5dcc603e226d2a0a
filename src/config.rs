use crate::platform::{HostEnv, PlatformKind};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Names of every tool the server registers.
pub const TOOL_NAMES: &[&str] = &[
    "get_cell_details",
    "get_cell_value",
    "get_values_of_cell_range",
    "get_content_of_cell_list",
    "search_in_cell_range",
    "get_list_of_sheets",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub enabled_tools: Option<HashSet<String>>,
    pub platform: PlatformKind,
    /// Explicit home directory. `None` falls back to the detected one.
    pub home_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled_tools: None,
            platform: PlatformKind::current(),
            home_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            enabled_tools: cli_enabled_tools,
            platform: cli_platform,
            home_dir: cli_home_dir,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            enabled_tools: file_enabled_tools,
            platform: file_platform,
            home_dir: file_home_dir,
        } = file_config;

        let enabled_tools = cli_enabled_tools
            .or(file_enabled_tools)
            .map(|tools| {
                tools
                    .into_iter()
                    .map(|tool| tool.trim().to_ascii_lowercase())
                    .filter(|tool| !tool.is_empty())
                    .collect::<HashSet<_>>()
            })
            .filter(|set| !set.is_empty());

        let platform = cli_platform
            .or(file_platform)
            .unwrap_or_else(PlatformKind::current);

        let home_dir = cli_home_dir.or(file_home_dir);

        Ok(Self {
            enabled_tools,
            platform,
            home_dir,
        })
    }

    /// Fail fast on settings that would only surface at the first tool call.
    ///
    /// Only an explicit home directory is checked; a detected one that does not
    /// exist just makes the Desktop and Downloads lookups miss.
    pub fn validate(&self) -> Result<()> {
        if let Some(tools) = &self.enabled_tools {
            for tool in tools {
                anyhow::ensure!(
                    TOOL_NAMES.contains(&tool.as_str()),
                    "unknown tool '{}' in enabled tools (expected one of {:?})",
                    tool,
                    TOOL_NAMES
                );
            }
        }
        if let Some(home) = &self.home_dir {
            anyhow::ensure!(
                home.is_dir(),
                "home directory {:?} is not a directory",
                home
            );
        }
        Ok(())
    }

    pub fn host_env(&self) -> HostEnv {
        HostEnv::new(
            self.platform,
            self.home_dir.clone().or_else(dirs::home_dir),
        )
    }

    pub fn is_tool_enabled(&self, tool: &str) -> bool {
        match &self.enabled_tools {
            Some(set) => set.contains(&tool.to_ascii_lowercase()),
            None => true,
        }
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "xlsx-inspect-mcp",
    about = "Read-only spreadsheet inspection MCP server",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "XLSX_INSPECT_MCP_ENABLED_TOOLS",
        value_name = "TOOL",
        value_delimiter = ',',
        help = "Restrict execution to the provided tool names"
    )]
    pub enabled_tools: Option<Vec<String>>,

    #[arg(
        long,
        env = "XLSX_INSPECT_MCP_PLATFORM",
        value_enum,
        value_name = "PLATFORM",
        help = "Platform family used for Desktop/Downloads lookup (defaults to the host)"
    )]
    pub platform: Option<PlatformKind>,

    #[arg(
        long,
        env = "XLSX_INSPECT_MCP_HOME_DIR",
        value_name = "DIR",
        help = "Home directory used for '~' expansion and default folders"
    )]
    pub home_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    enabled_tools: Option<Vec<String>>,
    platform: Option<PlatformKind>,
    home_dir: Option<PathBuf>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
