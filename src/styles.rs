//! Typed views over umya-spreadsheet cell styles.
//!
//! Each attribute group is extracted as an `Option`: a cell that does not define
//! a font, fill, border side, or alignment yields `None` and the detail dump
//! simply skips that block.

use serde::Serialize;
use sha2::{Digest, Sha256};
use umya_spreadsheet::structs::{EnumTrait, HorizontalAlignmentValues, VerticalAlignmentValues};
use umya_spreadsheet::{Alignment, Border, Color, Fill, Font, Style};

pub const GENERAL_FORMAT: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRef {
    Rgb(String),
    Theme(u32),
    Default,
}

impl ColorRef {
    /// RGB (explicit or indexed) first, then theme. Theme 0 is a real theme slot,
    /// so any colour element that carries attributes but no RGB is a theme reference.
    fn from_color(color: &Color) -> Self {
        let argb = color.get_argb();
        if !argb.is_empty() {
            ColorRef::Rgb(argb.to_string())
        } else if color != &Color::default() {
            ColorRef::Theme(*color.get_theme_index())
        } else {
            ColorRef::Default
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontInfo {
    pub name: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<String>,
    pub color: ColorRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillInfo {
    pub pattern_type: Option<String>,
    pub foreground: Option<ColorRef>,
    pub background: Option<ColorRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderSideInfo {
    pub style: String,
    pub color: ColorRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BordersInfo {
    pub left: Option<BorderSideInfo>,
    pub right: Option<BorderSideInfo>,
    pub top: Option<BorderSideInfo>,
    pub bottom: Option<BorderSideInfo>,
    pub diagonal: Option<BorderSideInfo>,
}

impl BordersInfo {
    /// Sides that carry a border style, labelled for display.
    pub fn sides(&self) -> impl Iterator<Item = (&'static str, &BorderSideInfo)> {
        [
            ("Left", &self.left),
            ("Right", &self.right),
            ("Top", &self.top),
            ("Bottom", &self.bottom),
            ("Diagonal", &self.diagonal),
        ]
        .into_iter()
        .filter_map(|(label, side)| side.as_ref().map(|side| (label, side)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentInfo {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
    pub text_rotation: u32,
    pub wrap_text: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProtectionInfo {
    pub locked: bool,
    pub hidden: bool,
}

impl Default for ProtectionInfo {
    fn default() -> Self {
        Self {
            locked: true,
            hidden: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDescriptor {
    pub font: Option<FontInfo>,
    pub fill: Option<FillInfo>,
    pub borders: Option<BordersInfo>,
    pub alignment: Option<AlignmentInfo>,
    pub protection: ProtectionInfo,
    pub number_format: String,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            font: None,
            fill: None,
            borders: None,
            alignment: None,
            protection: ProtectionInfo::default(),
            number_format: GENERAL_FORMAT.to_string(),
        }
    }
}

pub fn descriptor_from_style(style: &Style) -> StyleDescriptor {
    let borders = style.get_borders().and_then(|borders| {
        let info = BordersInfo {
            left: border_side(borders.get_left_border()),
            right: border_side(borders.get_right_border()),
            top: border_side(borders.get_top_border()),
            bottom: border_side(borders.get_bottom_border()),
            diagonal: border_side(borders.get_diagonal_border()),
        };
        if info == BordersInfo::default() {
            None
        } else {
            Some(info)
        }
    });

    let protection = style
        .get_protection()
        .map(|p| {
            // `get_hidden` takes `&mut self` in umya.
            let mut p = p.clone();
            ProtectionInfo {
                locked: *p.get_locked(),
                hidden: *p.get_hidden(),
            }
        })
        .unwrap_or_default();

    StyleDescriptor {
        font: style.get_font().map(font_info),
        fill: style.get_fill().map(fill_info),
        borders,
        alignment: style.get_alignment().map(alignment_info),
        protection,
        number_format: number_format_code(style),
    }
}

pub fn number_format_code(style: &Style) -> String {
    style
        .get_number_format()
        .map(|fmt| fmt.get_format_code().to_string())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| GENERAL_FORMAT.to_string())
}

/// Short deterministic identifier for a style, stable across loads.
pub fn stable_style_id(descriptor: &StyleDescriptor) -> String {
    let bytes = serde_json::to_vec(descriptor).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let hex = format!("{digest:x}");
    hex.chars().take(12).collect()
}

fn font_info(font: &Font) -> FontInfo {
    let underline = font.get_underline();
    FontInfo {
        name: font.get_name().to_string(),
        size: *font.get_size(),
        bold: *font.get_bold(),
        italic: *font.get_italic(),
        underline: if underline.is_empty() || underline.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(underline.to_string())
        },
        color: ColorRef::from_color(font.get_color()),
    }
}

fn fill_info(fill: &Fill) -> FillInfo {
    let Some(pattern) = fill.get_pattern_fill() else {
        return FillInfo {
            pattern_type: None,
            foreground: None,
            background: None,
        };
    };
    let kind = pattern.get_pattern_type().get_value_string();
    FillInfo {
        pattern_type: if kind.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(kind.to_string())
        },
        foreground: pattern.get_foreground_color().map(ColorRef::from_color),
        background: pattern.get_background_color().map(ColorRef::from_color),
    }
}

fn border_side(border: &Border) -> Option<BorderSideInfo> {
    let style = border.get_border_style();
    if style.is_empty() || style.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(BorderSideInfo {
        style: style.to_string(),
        color: ColorRef::from_color(border.get_color()),
    })
}

fn alignment_info(alignment: &Alignment) -> AlignmentInfo {
    let horizontal = if alignment.get_horizontal() != &HorizontalAlignmentValues::General {
        Some(alignment.get_horizontal().get_value_string().to_string())
    } else {
        None
    };
    let vertical = if alignment.get_vertical() != &VerticalAlignmentValues::Bottom {
        Some(alignment.get_vertical().get_value_string().to_string())
    } else {
        None
    };
    AlignmentInfo {
        horizontal,
        vertical,
        text_rotation: *alignment.get_text_rotation(),
        wrap_text: *alignment.get_wrap_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_has_general_format_and_locked_protection() {
        let descriptor = descriptor_from_style(&Style::default());
        assert_eq!(descriptor.number_format, GENERAL_FORMAT);
        assert_eq!(descriptor.protection, ProtectionInfo::default());
        assert!(descriptor.borders.is_none());
    }

    #[test]
    fn bold_font_is_reported() {
        let mut style = Style::default();
        style.get_font_mut().set_bold(true);
        style.get_font_mut().get_color_mut().set_argb("FFFF0000");
        let font = descriptor_from_style(&style).font.expect("font present");
        assert!(font.bold);
        assert_eq!(font.color, ColorRef::Rgb("FFFF0000".to_string()));
    }

    #[test]
    fn theme_zero_is_not_the_default_colour() {
        let mut color = Color::default();
        assert_eq!(ColorRef::from_color(&color), ColorRef::Default);
        color.set_theme_index(0);
        assert_eq!(ColorRef::from_color(&color), ColorRef::Theme(0));
        color.set_theme_index(4);
        assert_eq!(ColorRef::from_color(&color), ColorRef::Theme(4));
    }

    #[test]
    fn hidden_protection_is_read() {
        let mut style = Style::default();
        style.get_protection_mut().set_hidden(true);
        let protection = descriptor_from_style(&style).protection;
        assert!(protection.hidden);
    }

    #[test]
    fn style_id_is_stable_and_distinguishes_styles() {
        let plain = descriptor_from_style(&Style::default());
        let mut bold = Style::default();
        bold.get_font_mut().set_bold(true);
        let bold = descriptor_from_style(&bold);
        assert_eq!(stable_style_id(&plain), stable_style_id(&plain));
        assert_ne!(stable_style_id(&plain), stable_style_id(&bold));
        assert_eq!(stable_style_id(&plain).len(), 12);
    }
}
