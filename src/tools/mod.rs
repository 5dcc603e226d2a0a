use crate::address::{CellAddress, RangeAddress, normalize_range};
use crate::render;
use crate::state::AppState;
use crate::workbook::{SheetHandle, Workbook};
use anyhow::Result;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tokio::task;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CellParams {
    /// The path to the Excel workbook. For example, "~/Downloads/test.xlsx" or
    /// "C:\\myfolder\\myfile.xlsx". If only a filename is provided, the file will be
    /// searched for in the Desktop and Downloads folders.
    pub filepath: String,
    /// The name of the sheet to get the value from.
    pub sheet_name: String,
    /// The name of the cell to get the value from. For example, "A1", "B2", "R5987".
    pub cell_name: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CellRangeParams {
    /// The path to the Excel workbook. A bare filename is also searched for in the
    /// Desktop and Downloads folders.
    pub filepath: String,
    /// The name of the sheet to read from.
    pub sheet_name: String,
    /// The top left cell of the range. For example, "A1".
    pub top_left_cell: String,
    /// The bottom right cell of the range. For example, "RC976".
    pub bottom_right_cell: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CellListParams {
    /// The path to the Excel workbook. A bare filename is also searched for in the
    /// Desktop and Downloads folders.
    pub filepath: String,
    /// The name of the sheet to read from.
    pub sheet_name: String,
    /// A list of cell names. For example, ["A1", "B2", "C3"].
    pub cell_name_list: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The path to the Excel workbook. A bare filename is also searched for in the
    /// Desktop and Downloads folders.
    pub filepath: String,
    /// The name of the sheet to search.
    pub sheet_name: String,
    /// The top left cell of the range. For example, "A1".
    pub top_left_cell: String,
    /// The bottom right cell of the range. For example, "RC976".
    pub bottom_right_cell: String,
    /// The string to search for.
    pub search_string: String,
    /// True if the entire cell value must match, false if it can be a substring.
    #[serde(default)]
    pub exact_match: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListSheetsParams {
    /// The path to the Excel workbook. A bare filename is also searched for in the
    /// Desktop and Downloads folders.
    pub filepath: String,
}

/// Resolve, load, and locate the sheet on a blocking thread, then render.
async fn query_sheet<F>(
    state: Arc<AppState>,
    filepath: String,
    sheet_name: String,
    render: F,
) -> Result<String>
where
    F: FnOnce(&SheetHandle<'_>) -> Result<String> + Send + 'static,
{
    let resolver = state.resolver().clone();
    let output = task::spawn_blocking(move || -> Result<String> {
        let path = resolver.resolve(&filepath)?;
        let workbook = Workbook::load(&path)?;
        let sheet = workbook.locate_sheet(&sheet_name)?;
        render(&sheet)
    })
    .await??;
    Ok(output)
}

pub async fn get_cell_details(state: Arc<AppState>, params: CellParams) -> Result<String> {
    let CellParams {
        filepath,
        sheet_name,
        cell_name,
    } = params;
    query_sheet(state, filepath, sheet_name, move |sheet| {
        let address = CellAddress::parse(&cell_name)?;
        Ok(render::cell_details(sheet, address))
    })
    .await
}

pub async fn get_cell_value(state: Arc<AppState>, params: CellParams) -> Result<String> {
    let CellParams {
        filepath,
        sheet_name,
        cell_name,
    } = params;
    query_sheet(state, filepath, sheet_name, move |sheet| {
        let address = CellAddress::parse(&cell_name)?;
        Ok(render::cell_value(sheet, address))
    })
    .await
}

pub async fn get_values_of_cell_range(
    state: Arc<AppState>,
    params: CellRangeParams,
) -> Result<String> {
    let range_expr = normalize_range(&params.top_left_cell, &params.bottom_right_cell);
    query_sheet(state, params.filepath, params.sheet_name, move |sheet| {
        let range = RangeAddress::parse(&range_expr)?;
        Ok(render::range_values(sheet, &range))
    })
    .await
}

pub async fn get_content_of_cell_list(
    state: Arc<AppState>,
    params: CellListParams,
) -> Result<String> {
    let CellListParams {
        filepath,
        sheet_name,
        cell_name_list,
    } = params;
    query_sheet(state, filepath, sheet_name, move |sheet| {
        let addresses = cell_name_list
            .iter()
            .map(|name| CellAddress::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(render::cell_list_values(sheet, &addresses))
    })
    .await
}

pub async fn search_in_cell_range(state: Arc<AppState>, params: SearchParams) -> Result<String> {
    let SearchParams {
        filepath,
        sheet_name,
        top_left_cell,
        bottom_right_cell,
        search_string,
        exact_match,
    } = params;
    let range_expr = normalize_range(&top_left_cell, &bottom_right_cell);
    query_sheet(state, filepath, sheet_name, move |sheet| {
        let range = RangeAddress::parse(&range_expr)?;
        Ok(render::search_range(
            sheet,
            &range,
            &search_string,
            exact_match,
        ))
    })
    .await
}

pub async fn get_list_of_sheets(state: Arc<AppState>, params: ListSheetsParams) -> Result<String> {
    let resolver = state.resolver().clone();
    let output = task::spawn_blocking(move || -> Result<String> {
        let path = resolver.resolve(&params.filepath)?;
        let workbook = Workbook::load(&path)?;
        Ok(render::sheet_list(&workbook))
    })
    .await??;
    Ok(output)
}
