//! In-memory view of a fetched worksheet.
//!
//! Spreadsheet APIs return ragged rows: trailing empty cells are simply
//! absent. `Grid` papers over that by answering `""` for any cell outside
//! the stored data, so the rest of the crate can index freely.

/// A rectangular-by-convention grid of trimmed text cells.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Wrap raw worksheet rows, trimming every cell.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows the worksheet actually contained.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at (row, col); `""` for any cell the worksheet omitted.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Stored width of one row (`0` for rows the worksheet omitted).
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map(Vec::len).unwrap_or(0)
    }
}

impl From<Vec<Vec<String>>> for Grid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
