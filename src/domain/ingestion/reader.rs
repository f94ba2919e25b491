//! Spreadsheet reader seam

use std::fmt::Debug;
use std::path::Path;

use super::cell::Cell;
use crate::domain::DomainError;

/// One worksheet row with its 1-based sheet row number
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub number: usize,
    /// Cells from column A onwards
    pub cells: Vec<Cell>,
}

/// Reads the rows of a workbook's first worksheet
pub trait SpreadsheetReader: Send + Sync + Debug {
    /// Blocking; run it off the async executor. Fails with `Ingestion` when
    /// the file is not a readable workbook or has no worksheet.
    fn read_first_sheet(&self, path: &Path) -> Result<Vec<SheetRow>, DomainError>;
}
