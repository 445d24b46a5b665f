// Raw spreadsheet contents and A1 cell addressing.
use std::fmt;

/// Full contents of one sheet: the first row holds the headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(sheet_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        SheetGrid { sheet_name: sheet_name.into(), rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Cell at a 0-based `data_index` (first row after the headers) and
    /// column. Rows returned by the Sheets API are ragged: trailing blank
    /// cells are simply missing.
    pub fn cell(&self, data_index: usize, column: usize) -> Option<&str> {
        self.data_rows()
            .get(data_index)
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }

    /// Overwrites one cell, padding the grid as needed.
    pub fn set_cell(&mut self, address: &CellAddress, value: String) {
        let row_idx = address.row - 1;
        if self.rows.len() <= row_idx {
            self.rows.resize_with(row_idx + 1, Vec::new);
        }
        let row = &mut self.rows[row_idx];
        if row.len() <= address.column {
            row.resize(address.column + 1, String::new());
        }
        row[address.column] = value;
    }
}

/// A single cell location in A1 notation terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub sheet_name: String,
    /// 0-based column index.
    pub column: usize,
    /// 1-based sheet row, headers being row 1.
    pub row: usize,
}

impl CellAddress {
    pub fn for_data_row(sheet_name: &str, data_index: usize, column: usize) -> Self {
        CellAddress { sheet_name: sheet_name.to_string(), column, row: data_index + 2 }
    }

    /// `F12` without the sheet prefix.
    pub fn cell_ref(&self) -> String {
        format!("{}{}", column_letters(self.column), self.row)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", quote_sheet_name(&self.sheet_name), self.cell_ref())
    }
}

/// Spreadsheet column letters: 0 → `A`, 25 → `Z`, 26 → `AA`.
pub fn column_letters(column: usize) -> String {
    let mut n = column + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Sheet names with anything beyond ASCII letters, digits and `_` must be
/// single-quoted in a range, with inner quotes doubled.
pub fn quote_sheet_name(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(5), "F");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(51), "AZ");
        assert_eq!(column_letters(52), "BA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_cell_address_display() {
        let addr = CellAddress::for_data_row("Sheet1", 0, 14);
        assert_eq!(addr.row, 2);
        assert_eq!(addr.to_string(), "Sheet1!O2");

        let quoted = CellAddress::for_data_row("Plan de inversión", 3, 1);
        assert_eq!(quoted.to_string(), "'Plan de inversión'!B5");
    }

    #[test]
    fn test_quote_sheet_name_escapes_quotes() {
        assert_eq!(quote_sheet_name("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn test_ragged_rows_and_set_cell() {
        let mut grid = SheetGrid::new(
            "Sheet1",
            vec![vec!["a".into(), "b".into(), "c".into()], vec!["1".into()]],
        );
        assert_eq!(grid.cell(0, 0), Some("1"));
        assert_eq!(grid.cell(0, 2), None);

        grid.set_cell(&CellAddress::for_data_row("Sheet1", 0, 2), "9".into());
        assert_eq!(grid.cell(0, 2), Some("9"));
        assert_eq!(grid.cell(0, 1), Some(""));
    }

    #[test]
    fn test_empty_grid() {
        let grid = SheetGrid::default();
        assert!(grid.is_empty());
        assert!(grid.headers().is_empty());
        assert!(grid.data_rows().is_empty());
    }
}
