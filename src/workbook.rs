use crate::address::{CellAddress, RangeAddress, cell_address};
use crate::dates::{self, DateValue};
use crate::error::InspectError;
use crate::literal::{bool_text, number_text, quoted};
use crate::paths::WorkbookPath;
use crate::styles::{self, StyleDescriptor};
use anyhow::{Context, Result};
use std::fmt;
use umya_spreadsheet::reader::xlsx;
use umya_spreadsheet::structs::EnumTrait;
use umya_spreadsheet::{Cell, Spreadsheet, Worksheet};

/// A workbook loaded for the duration of one request.
pub struct Workbook {
    spreadsheet: Spreadsheet,
}

impl Workbook {
    pub fn load(path: &WorkbookPath) -> Result<Self> {
        let spreadsheet = xlsx::read(path.as_path())
            .with_context(|| format!("failed to parse workbook {}", path))?;
        Ok(Self { spreadsheet })
    }

    pub fn sheets(&self) -> impl Iterator<Item = SheetHandle<'_>> {
        self.spreadsheet
            .get_sheet_collection()
            .iter()
            .map(SheetHandle::from)
    }

    /// Exact, case-sensitive lookup of a sheet by name.
    pub fn locate_sheet(&self, name: &str) -> Result<SheetHandle<'_>, InspectError> {
        self.sheets()
            .find(|handle| handle.name() == name)
            .ok_or_else(|| InspectError::SheetNotFound {
                sheet: name.to_string(),
            })
    }
}

#[derive(Clone, Copy)]
pub struct SheetHandle<'a> {
    sheet: &'a Worksheet,
}

impl<'a> From<&'a Worksheet> for SheetHandle<'a> {
    fn from(sheet: &'a Worksheet) -> Self {
        Self { sheet }
    }
}

impl<'a> SheetHandle<'a> {
    pub fn name(&self) -> &'a str {
        self.sheet.get_name()
    }

    /// Used-range dimensions covering every stored cell, `A1:A1` for a blank sheet.
    pub fn dimensions(&self) -> String {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for cell in self.sheet.get_cell_collection() {
            let coord = cell.get_coordinate();
            let col = *coord.get_col_num();
            let row = *coord.get_row_num();
            bounds = Some(match bounds {
                None => (col, row, col, row),
                Some((min_col, min_row, max_col, max_row)) => (
                    min_col.min(col),
                    min_row.min(row),
                    max_col.max(col),
                    max_row.max(row),
                ),
            });
        }
        let (min_col, min_row, max_col, max_row) = bounds.unwrap_or((1, 1, 1, 1));
        format!(
            "{}:{}",
            cell_address(min_col, min_row),
            cell_address(max_col, max_row)
        )
    }

    pub fn cell(&self, address: CellAddress) -> CellView<'a> {
        CellView {
            address,
            cell: self.sheet.get_cell(address.as_tuple()),
        }
    }

    /// Row-major views over `range`, looked up as the iterator advances.
    pub fn cells_in(&self, range: RangeAddress) -> impl Iterator<Item = CellView<'a>> {
        let sheet = *self;
        range.cells().map(move |address| sheet.cell(address))
    }

    /// Merged ranges in sheet order. Entries that do not parse are skipped.
    pub fn merged_ranges(&self) -> Vec<RangeAddress> {
        self.sheet
            .get_merge_cells()
            .iter()
            .filter_map(|range| RangeAddress::parse(&range.get_range()).ok())
            .collect()
    }

    pub fn conditional_formats(&self) -> Vec<ConditionalFormat> {
        self.sheet
            .get_conditional_formatting_collection()
            .iter()
            .map(|cf| {
                let sqref = cf.get_sequence_of_references().get_sqref().to_string();
                let rules = cf
                    .get_conditional_collection()
                    .iter()
                    .map(|rule| {
                        let rule_type = rule.get_type().get_value_string().to_string();
                        // The operator attribute only carries meaning on cellIs rules;
                        // the reader reports a default for every other type.
                        let operator = (rule_type == "cellIs")
                            .then(|| rule.get_operator().get_value_string().to_string());
                        ConditionalRule {
                            rule_type,
                            operator,
                            priority: *rule.get_priority(),
                            formulas: rule
                                .get_formula()
                                .map(|formula| formula.get_address_str())
                                .filter(|text| !text.is_empty())
                                .into_iter()
                                .collect(),
                            differential: rule.get_style().map(styles::descriptor_from_style),
                        }
                    })
                    .collect();
                ConditionalFormat {
                    ranges: RangeAddress::parse_list(&sqref).unwrap_or_default(),
                    sqref,
                    rules,
                }
            })
            .collect()
    }

    pub fn comment_at(&self, address: CellAddress) -> Option<CellComment> {
        let target = address.to_string();
        self.sheet
            .get_comments()
            .iter()
            .find(|comment| comment.get_coordinate().get_coordinate() == target)
            .map(|comment| CellComment {
                text: comment
                    .get_text()
                    .get_rich_text()
                    .map(|rich| rich.get_text().into_owned())
                    .unwrap_or_default(),
                author: comment.get_author().to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormat {
    pub sqref: String,
    pub ranges: Vec<RangeAddress>,
    pub rules: Vec<ConditionalRule>,
}

impl ConditionalFormat {
    pub fn applies_to(&self, address: &CellAddress) -> bool {
        self.ranges.iter().any(|range| range.contains(address))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalRule {
    pub rule_type: String,
    /// `None` for rule types other than `cellIs`.
    pub operator: Option<String>,
    pub priority: i32,
    pub formulas: Vec<String>,
    /// Differential style applied when the rule matches.
    pub differential: Option<StyleDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellComment {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub target: String,
    pub tooltip: Option<String>,
}

/// A coordinate on a sheet together with the stored cell, if any.
#[derive(Clone, Copy)]
pub struct CellView<'a> {
    pub address: CellAddress,
    cell: Option<&'a Cell>,
}

impl<'a> CellView<'a> {
    pub fn coordinate(&self) -> String {
        self.address.to_string()
    }

    pub fn value(&self) -> CellValue {
        self.cell.map(cell_to_value).unwrap_or(CellValue::Empty)
    }

    pub fn kind(&self) -> CellKind {
        self.value().kind()
    }

    pub fn formula(&self) -> Option<String> {
        self.cell
            .filter(|cell| cell.is_formula())
            .map(|cell| format!("={}", cell.get_formula()))
    }

    /// Style of the stored cell, or the workbook default for a coordinate with no cell.
    pub fn style(&self) -> StyleDescriptor {
        self.cell
            .map(|cell| styles::descriptor_from_style(cell.get_style()))
            .unwrap_or_default()
    }

    pub fn number_format(&self) -> String {
        self.cell
            .map(|cell| styles::number_format_code(cell.get_style()))
            .unwrap_or_else(|| styles::GENERAL_FORMAT.to_string())
    }

    pub fn hyperlink(&self) -> Option<Hyperlink> {
        let link = self.cell?.get_hyperlink()?;
        let target = link.get_url().to_string();
        if target.is_empty() {
            return None;
        }
        let tooltip = Some(link.get_tooltip().to_string()).filter(|t| !t.is_empty());
        Some(Hyperlink { target, tooltip })
    }
}

/// Value of a cell as the inspection tools present it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Error(String),
    /// Formula text including the leading `=`.
    Formula(String),
    /// Numeric cell whose number format renders a date, time or duration.
    Date(DateValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CellKind {
    Numeric,
    String,
    Formula,
    Boolean,
    Error,
    #[strum(to_string = "d")]
    Date,
}

impl CellValue {
    /// Type tag for the value. Empty cells report `numeric`.
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty | CellValue::Number(_) => CellKind::Numeric,
            CellValue::Text(_) => CellKind::String,
            CellValue::Bool(_) => CellKind::Boolean,
            CellValue::Error(_) => CellKind::Error,
            CellValue::Formula(_) => CellKind::Formula,
            CellValue::Date(_) => CellKind::Date,
        }
    }

    /// Quoted form used inside the singleton-set rendering of `get_cell_value`.
    pub fn repr(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Error(s) | CellValue::Formula(s) => quoted(s),
            CellValue::Date(date) => date.repr(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => f.write_str("None"),
            CellValue::Number(n) => f.write_str(&number_text(*n)),
            CellValue::Text(s) | CellValue::Error(s) | CellValue::Formula(s) => f.write_str(s),
            CellValue::Bool(b) => f.write_str(bool_text(*b)),
            CellValue::Date(date) => write!(f, "{date}"),
        }
    }
}

pub fn cell_to_value(cell: &Cell) -> CellValue {
    if cell.is_formula() {
        return CellValue::Formula(format!("={}", cell.get_formula()));
    }
    let raw = cell.get_value();
    if raw.is_empty() {
        return CellValue::Empty;
    }
    match cell.get_data_type() {
        "n" => match cell.get_value_number().or_else(|| raw.parse::<f64>().ok()) {
            Some(serial) => {
                let code = styles::number_format_code(cell.get_style());
                dates::is_date_format(&code)
                    .then(|| dates::from_serial(serial, &code))
                    .flatten()
                    .map(CellValue::Date)
                    .unwrap_or(CellValue::Number(serial))
            }
            None => CellValue::Text(raw.to_string()),
        },
        "b" => CellValue::Bool(raw.eq_ignore_ascii_case("true") || raw == "1"),
        "e" => CellValue::Error(raw.to_string()),
        _ => CellValue::Text(raw.to_string()),
    }
}
