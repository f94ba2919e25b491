//! Question bank ingestion
//!
//! Spreadsheet rows are read as loosely typed cells and extracted into
//! questions by fixed column position. Rows that fail extraction are
//! reported individually; they never abort the upload.

mod cell;
mod extractor;
mod reader;
mod report;

pub use cell::Cell;
pub use extractor::{extract_row, ExtractedQuestion, SkipReason};
pub use reader::{SheetRow, SpreadsheetReader};
pub use report::{IngestionReport, RowOutcome};
