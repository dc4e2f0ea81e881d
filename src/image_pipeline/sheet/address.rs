//! A1-style cell addressing.

use std::fmt;

/// Last addressable column of a worksheet (XFD).
pub const MAX_COLUMNS: u32 = 16_384;
/// Last addressable row of a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Column letters for a 1-based column number: 1 -> "A", 27 -> "AA".
pub fn column_name(column: u32) -> String {
    debug_assert!(column >= 1, "column numbers are 1-based");
    let mut remaining = column;
    let mut letters = Vec::new();
    while remaining > 0 {
        let rem = (remaining - 1) % 26;
        letters.push(b'A' + rem as u8);
        remaining = (remaining - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Rectangular block of cells, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_column: u32,
    pub last_column: u32,
    pub first_row: u32,
    pub last_row: u32,
}

impl CellRange {
    /// One full-height column: `first_row = 1`, `last_row = rows`.
    pub fn column(column: u32, rows: u32) -> Self {
        Self {
            first_column: column,
            last_column: column,
            first_row: 1,
            last_row: rows,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_name(self.first_column),
            self.first_row,
            column_name(self.last_column),
            self.last_row
        )
    }
}
