use anyhow::Result;
use rmcp::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use std::collections::HashSet;
use std::sync::Arc;

use xlsx_inspect_mcp::InspectorServer;
use xlsx_inspect_mcp::tools::{CellParams, CellRangeParams, ListSheetsParams};

mod support;

#[tokio::test(flavor = "current_thread")]
async fn server_tool_handlers_return_text() -> Result<()> {
    let workspace = support::TestWorkspace::new();
    let path = workspace.create_workbook("simple.xlsx", support::sample_workbook);
    let filepath = path.display().to_string();

    let server = workspace.server();

    let sheets = server
        .get_list_of_sheets(Parameters(ListSheetsParams {
            filepath: filepath.clone(),
        }))
        .await
        .expect("list sheets");
    assert!(sheets.starts_with("Name: Sheet1, Dimensions: A1:"));

    let error = match server
        .get_cell_value(Parameters(CellParams {
            filepath: filepath.clone(),
            sheet_name: "Missing".to_string(),
            cell_name: "A1".to_string(),
        }))
        .await
    {
        Ok(_) => panic!("missing sheet should error"),
        Err(err) => err,
    };
    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    assert!(error.message.contains("Sheet Missing does not exist"));

    let values = server
        .get_values_of_cell_range(Parameters(CellRangeParams {
            filepath,
            sheet_name: "Sheet1".to_string(),
            top_left_cell: "A2".to_string(),
            bottom_right_cell: "B2".to_string(),
        }))
        .await
        .expect("range values");
    assert_eq!(values, "A2: Alpha\nB2: 10");

    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_cell_name_maps_to_invalid_params() {
    let workspace = support::TestWorkspace::new();
    let path = workspace.create_workbook("simple.xlsx", support::sample_workbook);

    let error = workspace
        .server()
        .get_cell_details(Parameters(CellParams {
            filepath: path.display().to_string(),
            sheet_name: "Sheet1".to_string(),
            cell_name: "not a cell".to_string(),
        }))
        .await
        .expect_err("invalid address");
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test(flavor = "current_thread")]
async fn disabled_tools_are_rejected() {
    let workspace = support::TestWorkspace::new();
    let path = workspace.create_workbook("simple.xlsx", support::sample_workbook);
    let config = workspace.config_with(|config| {
        config.enabled_tools = Some(HashSet::from(["get_cell_value".to_string()]));
    });
    let server = InspectorServer::new(Arc::new(config));

    let error = server
        .get_list_of_sheets(Parameters(ListSheetsParams {
            filepath: path.display().to_string(),
        }))
        .await
        .expect_err("tool should be disabled");
    assert_eq!(error.code, ErrorCode::INVALID_REQUEST);
    assert!(error.message.contains("get_list_of_sheets"));

    let allowed = server
        .get_cell_value(Parameters(CellParams {
            filepath: path.display().to_string(),
            sheet_name: "Sheet1".to_string(),
            cell_name: "A2".to_string(),
        }))
        .await
        .expect("enabled tool");
    assert_eq!(allowed, "{'Alpha'}");
}

#[test]
fn server_info_advertises_tools_and_instructions() {
    let workspace = support::TestWorkspace::new();
    let info = workspace.server().get_info();

    assert!(info.capabilities.tools.is_some());
    let instructions = info.instructions.expect("instructions");
    assert!(instructions.contains("get_list_of_sheets"));
    assert!(instructions.contains("Desktop and Downloads"));
}
