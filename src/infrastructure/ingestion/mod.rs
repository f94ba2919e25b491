//! Spreadsheet ingestion infrastructure

mod xlsx;

pub use xlsx::XlsxReader;
