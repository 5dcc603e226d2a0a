use crate::config::ServerConfig;
use crate::error::{InspectError, to_mcp_error};
use crate::logging::mcp_tool_span;
use crate::state::AppState;
use crate::tools;
use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

const INSTRUCTIONS: &str = "\
Spreadsheet inspection (read-only).

WORKFLOW:
1) get_list_of_sheets for sheet names and used-range dimensions
2) get_values_of_cell_range or search_in_cell_range to find data
3) get_cell_details for formatting, formulas, comments, hyperlinks, and merges of one cell

FILE PATHS: Absolute paths and '~' are accepted. A bare filename such as \"budget.xlsx\" \
is also looked up in the Desktop and Downloads folders on Windows and macOS.

CELLS: Use A1 notation (e.g., A1, B2, R5987).";

#[derive(Clone)]
pub struct InspectorServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<InspectorServer>,
}

impl InspectorServer {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self::from_state(Arc::new(AppState::new(config)))
    }

    pub fn from_state(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn run_stdio(self) -> Result<()> {
        let service = self
            .serve(stdio())
            .await
            .inspect_err(|error| tracing::error!("serving error: {:?}", error))?;
        service.waiting().await?;
        Ok(())
    }

    fn ensure_tool_enabled(&self, tool: &str) -> Result<()> {
        tracing::info!(tool = tool, "tool invocation requested");
        if self.state.config().is_tool_enabled(tool) {
            Ok(())
        } else {
            Err(InspectError::ToolDisabled {
                tool_name: tool.to_ascii_lowercase(),
            }
            .into())
        }
    }

    async fn run_tool<F>(&self, tool: &'static str, fut: F) -> Result<String, McpError>
    where
        F: Future<Output = Result<String>>,
    {
        self.ensure_tool_enabled(tool).map_err(to_mcp_error)?;
        let started = Instant::now();
        let result = fut.instrument(mcp_tool_span(tool)).await;
        let elapsed = started.elapsed();
        match result {
            Ok(text) => {
                crate::log_mcp_tool!(tool, "ok", elapsed, bytes = text.len(), "tool completed");
                Ok(text)
            }
            Err(error) => {
                let message = format!("{error:#}");
                tracing::warn!(
                    mcp.tool = tool,
                    duration_ms = elapsed.as_millis() as u64,
                    error = %message,
                    "tool failed"
                );
                Err(to_mcp_error(error))
            }
        }
    }
}

#[tool_router]
impl InspectorServer {
    #[tool(
        name = "get_cell_details",
        description = "Get value, data type, style, comments, formulas, hyperlinks, and other details for a single cell in a workbook."
    )]
    pub async fn get_cell_details(
        &self,
        Parameters(params): Parameters<tools::CellParams>,
    ) -> Result<String, McpError> {
        self.run_tool(
            "get_cell_details",
            tools::get_cell_details(self.state.clone(), params),
        )
        .await
    }

    #[tool(
        name = "get_cell_value",
        description = "Get the raw value of a single cell in a workbook."
    )]
    pub async fn get_cell_value(
        &self,
        Parameters(params): Parameters<tools::CellParams>,
    ) -> Result<String, McpError> {
        self.run_tool(
            "get_cell_value",
            tools::get_cell_value(self.state.clone(), params),
        )
        .await
    }

    #[tool(
        name = "get_values_of_cell_range",
        description = "Get the values of a continuous range of cells in an Excel workbook, one 'coordinate: value' line per cell."
    )]
    pub async fn get_values_of_cell_range(
        &self,
        Parameters(params): Parameters<tools::CellRangeParams>,
    ) -> Result<String, McpError> {
        self.run_tool(
            "get_values_of_cell_range",
            tools::get_values_of_cell_range(self.state.clone(), params),
        )
        .await
    }

    #[tool(
        name = "get_content_of_cell_list",
        description = "Get the raw values of a list of specific named cells in an Excel workbook."
    )]
    pub async fn get_content_of_cell_list(
        &self,
        Parameters(params): Parameters<tools::CellListParams>,
    ) -> Result<String, McpError> {
        self.run_tool(
            "get_content_of_cell_list",
            tools::get_content_of_cell_list(self.state.clone(), params),
        )
        .await
    }

    #[tool(
        name = "search_in_cell_range",
        description = "Search for a string in a continuous range of cells in an Excel workbook. Substring match unless exact_match is true."
    )]
    pub async fn search_in_cell_range(
        &self,
        Parameters(params): Parameters<tools::SearchParams>,
    ) -> Result<String, McpError> {
        self.run_tool(
            "search_in_cell_range",
            tools::search_in_cell_range(self.state.clone(), params),
        )
        .await
    }

    #[tool(
        name = "get_list_of_sheets",
        description = "Get a list of sheets in an Excel workbook. Each line contains a sheet's name and dimensions."
    )]
    pub async fn get_list_of_sheets(
        &self,
        Parameters(params): Parameters<tools::ListSheetsParams>,
    ) -> Result<String, McpError> {
        self.run_tool(
            "get_list_of_sheets",
            tools::get_list_of_sheets(self.state.clone(), params),
        )
        .await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for InspectorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..ServerInfo::default()
        }
    }
}
