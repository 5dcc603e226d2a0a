//! A1-style cell and range addressing.

use crate::error::InspectError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]+)$").expect("valid cell regex"));

pub fn column_number_to_name(column: u32) -> String {
    let mut column = column;
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

pub fn column_name_to_number(name: &str) -> u32 {
    name.bytes()
        .map(|b| (b.to_ascii_uppercase() - b'A' + 1) as u32)
        .fold(0, |acc, digit| acc * 26 + digit)
}

pub fn cell_address(column: u32, row: u32) -> String {
    format!("{}{}", column_number_to_name(column), row)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub column: u32,
    pub row: u32,
}

impl CellAddress {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    pub fn parse(input: &str) -> Result<Self, InspectError> {
        let invalid = || InspectError::InvalidCellAddress {
            address: input.to_string(),
        };
        let caps = CELL_RE.captures(input.trim()).ok_or_else(invalid)?;
        let column = column_name_to_number(&caps[1]);
        let row: u32 = caps[2].parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Self { column, row })
    }

    /// `(column, row)` in the order umya-spreadsheet expects coordinates.
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.column, self.row)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_number_to_name(self.column), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rectangle between two corners, kept exactly as written.
///
/// A range whose start lies below or right of its end covers no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeAddress {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl RangeAddress {
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self { start, end }
    }

    pub fn parse(input: &str) -> Result<Self, InspectError> {
        let trimmed = input.trim();
        let invalid = || InspectError::InvalidRange {
            range: input.to_string(),
        };
        match trimmed.split_once(':') {
            Some((a, b)) => {
                let start = CellAddress::parse(a).map_err(|_| invalid())?;
                let end = CellAddress::parse(b).map_err(|_| invalid())?;
                Ok(Self { start, end })
            }
            None => {
                let cell = CellAddress::parse(trimmed).map_err(|_| invalid())?;
                Ok(Self {
                    start: cell,
                    end: cell,
                })
            }
        }
    }

    /// Space-separated list of ranges, as found in conditional-format `sqref`s.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, InspectError> {
        input.split_whitespace().map(Self::parse).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.start.row > self.end.row || self.start.column > self.end.column
    }

    pub fn contains(&self, cell: &CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.column..=self.end.column).contains(&cell.column)
    }

    /// Every cell of the range, row by row.
    pub fn cells(self) -> impl Iterator<Item = CellAddress> {
        let (first_col, last_col) = (self.start.column, self.end.column);
        (self.start.row..=self.end.row).flat_map(move |row| {
            (first_col..=last_col).map(move |column| CellAddress { column, row })
        })
    }
}

impl fmt::Display for RangeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for RangeAddress {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Join two corners into a range expression after a plain string sort.
///
/// The sort is lexical, not row/column aware: `("A10", "A9")` gives `"A10:A9"`,
/// which then covers no cells. Callers rely on this exact text.
pub fn normalize_range(corner_a: &str, corner_b: &str) -> String {
    let mut corners = [corner_a, corner_b];
    corners.sort_unstable();
    corners.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_and_lowercase_addresses() {
        assert_eq!(CellAddress::parse("$b$12").unwrap(), CellAddress::new(2, 12));
        assert_eq!(CellAddress::parse("AA1").unwrap().to_string(), "AA1");
        assert_eq!(CellAddress::parse("r5987").unwrap().to_string(), "R5987");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "1A", "A0", "ABCD1", "A1:B2", "A-1"] {
            assert!(CellAddress::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn normalization_is_lexical() {
        assert_eq!(normalize_range("B2", "A1"), "A1:B2");
        assert_eq!(normalize_range("A10", "A9"), "A10:A9");
        assert_eq!(normalize_range("B1", "AA1"), "AA1:B1");
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = RangeAddress::parse("A10:A9").unwrap();
        assert!(range.is_empty());
        assert_eq!(range.cells().count(), 0);
    }

    #[test]
    fn cells_are_row_major() {
        let range = RangeAddress::parse("A1:B2").unwrap();
        let cells: Vec<String> = range.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
        assert!(range.contains(&CellAddress::new(2, 2)));
        assert!(!range.contains(&CellAddress::new(3, 1)));
    }

    #[test]
    fn single_cell_is_one_by_one_range() {
        let range = RangeAddress::parse("C3").unwrap();
        assert_eq!(range.to_string(), "C3:C3");
        assert_eq!(range.cells().count(), 1);
    }

    #[test]
    fn parses_sqref_lists() {
        let ranges = RangeAddress::parse_list("A1:A5 C2").unwrap();
        assert_eq!(ranges.len(), 2);
        assert!(ranges[1].contains(&CellAddress::new(3, 2)));
    }
}
