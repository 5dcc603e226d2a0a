//! Text renderings returned by the inspection tools.
//!
//! Every routine produces newline-joined lines without a trailing newline.

use crate::address::{CellAddress, RangeAddress};
use crate::literal::{bool_text, quoted_list};
use crate::styles::{BordersInfo, ColorRef, FillInfo, FontInfo, StyleDescriptor, stable_style_id};
use crate::workbook::{CellValue, CellView, ConditionalRule, SheetHandle, Workbook};

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

fn push_color(lines: &mut Vec<String>, label: &str, color: &ColorRef) {
    match color {
        ColorRef::Rgb(rgb) => lines.push(format!("{label} (RGB): {rgb}")),
        ColorRef::Theme(theme) => lines.push(format!("{label} (Theme): {theme}")),
        ColorRef::Default => lines.push(format!("{label}: Default")),
    }
}

/// Full detail dump of one cell.
pub fn cell_details(sheet: &SheetHandle<'_>, address: CellAddress) -> String {
    let cell = sheet.cell(address);
    let value = cell.value();
    let style = cell.style();
    let style_id = stable_style_id(&style);
    let number_format = cell.number_format();

    let mut lines = vec![
        format!("Cell: {}", cell.coordinate()),
        format!("Value: {value}"),
        format!("Data type: {}", value.kind()),
        format!("Style: {style_id}"),
        format!("Number format: {number_format}"),
    ];

    if let CellValue::Date(date) = &value {
        lines.push(date.detail_line());
    }

    if let Some(formula) = cell.formula() {
        lines.push(format!("Formula: {formula}"));
    }

    if let Some(link) = cell.hyperlink() {
        lines.push(format!("Hyperlink Target: {}", link.target));
        if let Some(tooltip) = &link.tooltip {
            lines.push(format!("Hyperlink Tooltip: {tooltip}"));
        }
    }

    if let Some(comment) = sheet.comment_at(address) {
        lines.push(format!("Comment: {}", comment.text));
        lines.push(format!("Comment Author: {}", comment.author));
    }

    push_style_lines(&mut lines, &style);

    let matching_rules = sheet
        .conditional_formats()
        .into_iter()
        .filter(|cf| cf.applies_to(&address));
    for (idx, cf) in matching_rules.enumerate() {
        lines.push(format!("Conditional Formatting Rule {}:", idx + 1));
        lines.push(format!("  Range: {}", cf.sqref));
        for rule in &cf.rules {
            push_rule_lines(&mut lines, rule);
        }
    }

    if let Some(merged) = sheet
        .merged_ranges()
        .into_iter()
        .find(|range| range.contains(&address))
    {
        lines.push(format!("Cell is part of merged range: {merged}"));
        lines.push(format!(
            "Merge starts at: {}, {}",
            merged.start.row, merged.start.column
        ));
        lines.push(format!(
            "Merge ends at: {}, {}",
            merged.end.row, merged.end.column
        ));
    }

    lines.join("\n")
}

fn push_style_lines(lines: &mut Vec<String>, style: &StyleDescriptor) {
    if let Some(font) = &style.font {
        lines.push(format!("Font Name: {}", font.name));
        lines.push(format!("Font Size: {}", font.size));
        lines.push(format!("Bold: {}", bool_text(font.bold)));
        lines.push(format!("Italic: {}", bool_text(font.italic)));
        lines.push(format!("Underline: {}", or_none(&font.underline)));
        push_color(lines, "Font Color", &font.color);
    }

    if let Some(fill) = &style.fill {
        match &fill.pattern_type {
            Some(pattern) => {
                lines.push(format!("Fill Pattern Type: {pattern}"));
                if let Some(fg) = &fill.foreground {
                    push_color(lines, "Fill Foreground Color", fg);
                }
                if let Some(bg) = &fill.background {
                    push_color(lines, "Fill Background Color", bg);
                }
            }
            None => lines.push("Fill: No fill pattern".to_string()),
        }
    }

    if let Some(alignment) = &style.alignment {
        lines.push(format!(
            "Horizontal Alignment: {}",
            or_none(&alignment.horizontal)
        ));
        lines.push(format!(
            "Vertical Alignment: {}",
            or_none(&alignment.vertical)
        ));
        lines.push(format!("Text Rotation: {}", alignment.text_rotation));
        lines.push(format!("Wrap Text: {}", bool_text(alignment.wrap_text)));
    }

    if let Some(borders) = &style.borders {
        for (side, info) in borders.sides() {
            lines.push(format!("Border {side} Style: {}", info.style));
            push_color(lines, &format!("Border {side} Color"), &info.color);
        }
    }

    lines.push(format!(
        "Is Cell Locked: {}",
        bool_text(style.protection.locked)
    ));
    lines.push(format!(
        "Is Cell Hidden: {}",
        bool_text(style.protection.hidden)
    ));
}

fn push_rule_lines(lines: &mut Vec<String>, rule: &ConditionalRule) {
    lines.push(format!("  Type: {}", rule.rule_type));
    lines.push(format!(
        "  Formula: {}",
        quoted_list(rule.formulas.iter().map(String::as_str))
    ));
    lines.push(format!("  Operator: {}", or_none(&rule.operator)));
    lines.push(format!("  Priority: {}", rule.priority));

    let Some(dxf) = &rule.differential else {
        return;
    };
    lines.push("  Differential Style:".to_string());
    if let Some(font) = &dxf.font {
        lines.push(format!("    Font: {}", font_summary(font)));
    }
    if let Some(fill) = &dxf.fill {
        lines.push(format!("    Fill: {}", fill_summary(fill)));
    }
    if let Some(borders) = &dxf.borders {
        lines.push(format!("    Border: {}", border_summary(borders)));
    }
}

fn color_text(color: &ColorRef) -> String {
    match color {
        ColorRef::Rgb(rgb) => rgb.clone(),
        ColorRef::Theme(theme) => format!("theme {theme}"),
        ColorRef::Default => "None".to_string(),
    }
}

fn font_summary(font: &FontInfo) -> String {
    format!(
        "bold={}, italic={}, underline={}, color={}",
        bool_text(font.bold),
        bool_text(font.italic),
        or_none(&font.underline),
        color_text(&font.color)
    )
}

fn fill_summary(fill: &FillInfo) -> String {
    let color = |c: &Option<ColorRef>| c.as_ref().map_or("None".to_string(), color_text);
    format!(
        "patternType={}, fgColor={}, bgColor={}",
        or_none(&fill.pattern_type),
        color(&fill.foreground),
        color(&fill.background)
    )
}

fn border_summary(borders: &BordersInfo) -> String {
    borders
        .sides()
        .map(|(side, info)| {
            format!(
                "{}={} {}",
                side.to_ascii_lowercase(),
                info.style,
                color_text(&info.color)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The value wrapped in a one-element set literal, e.g. `{None}` or `{'abc'}`.
pub fn cell_value(sheet: &SheetHandle<'_>, address: CellAddress) -> String {
    format!("{{{}}}", sheet.cell(address).value().repr())
}

fn value_line(cell: &CellView<'_>) -> String {
    format!("{}: {}", cell.coordinate(), cell.value())
}

pub fn range_values(sheet: &SheetHandle<'_>, range: &RangeAddress) -> String {
    sheet
        .cells_in(*range)
        .map(|cell| value_line(&cell))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn cell_list_values(sheet: &SheetHandle<'_>, addresses: &[CellAddress]) -> String {
    addresses
        .iter()
        .map(|address| value_line(&sheet.cell(*address)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cells whose rendered value contains (or equals) `needle`, row-major.
pub fn search_range(
    sheet: &SheetHandle<'_>,
    range: &RangeAddress,
    needle: &str,
    exact_match: bool,
) -> String {
    sheet
        .cells_in(*range)
        .filter(|cell| {
            let text = cell.value().to_string();
            if exact_match {
                text == needle
            } else {
                text.contains(needle)
            }
        })
        .map(|cell| value_line(&cell))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sheet_list(workbook: &Workbook) -> String {
    workbook
        .sheets()
        .map(|sheet| format!("Name: {}, Dimensions: {}", sheet.name(), sheet.dimensions()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use umya_spreadsheet::{Hyperlink, Worksheet};

    fn details(sheet: &Worksheet, cell: &str) -> String {
        let address = CellAddress::parse(cell).unwrap();
        cell_details(&SheetHandle::from(sheet), address)
    }

    #[test]
    fn hyperlink_tooltip_follows_target() {
        let mut sheet = Worksheet::default();
        let mut link = Hyperlink::default();
        link.set_url("https://example.com").set_tooltip("Open docs");
        sheet.get_cell_mut("A1").set_value("Docs").set_hyperlink(link);

        let output = details(&sheet, "A1");
        assert!(
            output.contains("Hyperlink Target: https://example.com\nHyperlink Tooltip: Open docs"),
            "{output}"
        );
    }

    #[test]
    fn protection_lines_are_reported_without_a_stored_cell() {
        let sheet = Worksheet::default();
        let output = details(&sheet, "C7");
        assert!(
            output.ends_with("Is Cell Locked: True\nIs Cell Hidden: False"),
            "{output}"
        );
    }

    #[test]
    fn rules_without_style_or_formula_render_empty_list() {
        let rule = ConditionalRule {
            rule_type: "containsBlanks".to_string(),
            operator: None,
            priority: 4,
            formulas: Vec::new(),
            differential: None,
        };
        let mut lines = Vec::new();
        push_rule_lines(&mut lines, &rule);
        assert_eq!(
            lines,
            vec![
                "  Type: containsBlanks",
                "  Formula: []",
                "  Operator: None",
                "  Priority: 4",
            ]
        );
    }
}
