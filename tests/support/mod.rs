#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::{TempDir, tempdir};
use umya_spreadsheet::{
    self, Color, Comment, ConditionalFormatValues, ConditionalFormatting,
    ConditionalFormattingOperatorValues, ConditionalFormattingRule, Fill, Formula, Hyperlink,
    PatternFill, PatternValues, RichText, SequenceOfReferences, Spreadsheet, Style,
};
use xlsx_inspect_mcp::state::AppState;
use xlsx_inspect_mcp::{InspectorServer, PlatformKind, ServerConfig};

pub fn write_workbook_to_path<F>(path: &Path, f: F)
where
    F: FnOnce(&mut Spreadsheet),
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dir");
    }
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("write workbook");
}

pub fn touch_file(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dir");
    }
    std::fs::write(path, b"test").expect("write file");
}

/// A temp directory holding workbooks plus a fake home with Desktop and Downloads.
pub struct TestWorkspace {
    _tempdir: TempDir,
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let tempdir = tempdir().expect("tempdir");
        let root = tempdir.path().to_path_buf();
        std::fs::create_dir_all(root.join("home").join("Desktop")).expect("desktop dir");
        std::fs::create_dir_all(root.join("home").join("Downloads")).expect("downloads dir");
        Self {
            _tempdir: tempdir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn home(&self) -> PathBuf {
        self.root.join("home")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn create_workbook<F>(&self, name: &str, f: F) -> PathBuf
    where
        F: FnOnce(&mut Spreadsheet),
    {
        let path = self.path(name);
        write_workbook_to_path(&path, f);
        path
    }

    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            enabled_tools: None,
            platform: PlatformKind::Other,
            home_dir: Some(self.home()),
        }
    }

    pub fn config_with<F>(&self, configure: F) -> ServerConfig
    where
        F: FnOnce(&mut ServerConfig),
    {
        let mut config = self.config();
        configure(&mut config);
        config
    }

    pub fn app_state(&self) -> Arc<AppState> {
        app_state_with_config(self.config())
    }

    pub fn server(&self) -> InspectorServer {
        InspectorServer::new(Arc::new(self.config()))
    }
}

pub fn app_state_with_config(config: ServerConfig) -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(config)))
}

/// Two data rows under a header, a formula, a dated cell, and a merged title.
pub fn sample_workbook(book: &mut Spreadsheet) {
    let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");
    sheet.get_cell_mut("A1").set_value("Name");
    sheet.get_cell_mut("B1").set_value("Value");
    sheet.get_cell_mut("A2").set_value("Alpha");
    sheet.get_cell_mut("B2").set_value_number(10);
    sheet.get_cell_mut("A3").set_value("Alphabet");
    sheet.get_cell_mut("B3").set_value_number(45000);
    sheet
        .get_cell_mut("B3")
        .get_style_mut()
        .get_number_format_mut()
        .set_format_code("yyyy-mm-dd");
    let formula = sheet.get_cell_mut("C2");
    formula.set_formula("B2*2");
    formula.set_formula_result_default("20");
    sheet
        .get_cell_mut("A1")
        .get_style_mut()
        .get_font_mut()
        .set_bold(true);
    sheet.add_merge_cells("D1:E2");
}

/// The sample workbook plus cells carrying a hyperlink, a comment, fill, border,
/// time-of-day and elapsed-time formats, and two conditional-format rules.
pub fn annotated_workbook(book: &mut Spreadsheet) {
    sample_workbook(book);
    let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");

    let mut link = Hyperlink::default();
    link.set_url("https://example.com/docs");
    sheet
        .get_cell_mut("G1")
        .set_value("Docs")
        .set_hyperlink(link);

    sheet.get_cell_mut("F1").set_value("Noted");
    let mut body = RichText::default();
    body.set_text("Check totals");
    let mut comment = Comment::default();
    comment.new_comment("F1").set_author("Reviewer");
    comment.get_text_mut().set_rich_text(body);
    sheet.add_comments(comment);

    sheet
        .get_cell_mut("G2")
        .set_value("Filled")
        .get_style_mut()
        .set_background_color_solid("FF336699");

    let bordered = sheet.get_cell_mut("G3");
    bordered.set_value("Boxed");
    let bottom = bordered.get_style_mut().get_borders_mut().get_bottom_border_mut();
    bottom.set_border_style("thin");
    bottom.get_color_mut().set_argb("FF1F4E79");

    sheet
        .get_cell_mut("G4")
        .set_value_number(0.25)
        .get_style_mut()
        .get_number_format_mut()
        .set_format_code("hh:mm");
    sheet
        .get_cell_mut("G5")
        .set_value_number(1.5)
        .get_style_mut()
        .get_number_format_mut()
        .set_format_code("[h]:mm:ss");

    let mut highlight = Style::default();
    highlight.get_font_mut().set_bold(true);
    highlight.get_font_mut().get_color_mut().set_argb("FF9C0006");
    let mut background = Color::default();
    background.set_argb("FFFFC7CE");
    let mut pattern = PatternFill::default();
    pattern.set_pattern_type(PatternValues::Solid);
    pattern.set_background_color(background);
    let mut fill = Fill::default();
    fill.set_pattern_fill(pattern);
    highlight.set_fill(fill);

    let mut threshold = Formula::default();
    threshold.set_string_value("3");
    let mut greater = ConditionalFormattingRule::default();
    greater
        .set_type(ConditionalFormatValues::CellIs)
        .set_operator(ConditionalFormattingOperatorValues::GreaterThan)
        .set_priority(1)
        .set_style(highlight)
        .set_formula(threshold);

    let mut long_name = Formula::default();
    long_name.set_string_value("LEN(A2)>5");
    let mut expression = ConditionalFormattingRule::default();
    expression
        .set_type(ConditionalFormatValues::Expression)
        .set_priority(2)
        .set_formula(long_name);

    let mut cell_rule = ConditionalFormatting::default();
    let mut values = SequenceOfReferences::default();
    values.set_sqref("B1:B5");
    cell_rule.set_sequence_of_references(values);
    cell_rule.set_conditional_collection(vec![greater]);

    let mut expression_rule = ConditionalFormatting::default();
    let mut names = SequenceOfReferences::default();
    names.set_sqref("A2:A3");
    expression_rule.set_sequence_of_references(names);
    expression_rule.set_conditional_collection(vec![expression]);

    sheet.set_conditional_formatting_collection(vec![cell_rule, expression_rule]);
}
